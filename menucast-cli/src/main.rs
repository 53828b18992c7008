//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

#[expect(
    clippy::print_stderr,
    reason = "the binary reports fatal errors on stderr before exiting"
)]
fn main() {
    if let Err(err) = menucast_cli::run() {
        eprintln!("menucast: {err}");
        std::process::exit(1);
    }
}
