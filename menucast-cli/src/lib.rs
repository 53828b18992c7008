//! Command-line interface for the Menucast recommendation engine.
//!
//! Two subcommands are provided:
//! - `recommend` ranks the candidates of a JSON request against the
//!   embedded or a user-supplied reference bundle.
//! - `weather` normalises an observation (or raw forecast items) and prints
//!   the resulting weights and flags.
//!
//! Options layer CLI flags over `MENUCAST_CMDS_*` environment variables over
//! configuration files, via `ortho_config`.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod files;
mod recommend;
mod weather;

pub use error::CliError;

use recommend::{RecommendArgs, run_recommend};
use weather::{WeatherArgs, run_weather};

const ARG_RECOMMEND_REQUEST: &str = "request";
const ARG_RECOMMEND_REFERENCE_DATA: &str = "reference-data";
const ARG_RECOMMEND_MAX_RESULTS: &str = "max-results";
const ARG_RECOMMEND_WALKING_PACE: &str = "walking-pace";
const ARG_RECOMMEND_DISLIKE_POLICY: &str = "dislike-policy";
const ARG_RECOMMEND_OUTPUT: &str = "output";
const ENV_RECOMMEND_REQUEST: &str = "MENUCAST_CMDS_RECOMMEND_REQUEST_PATH";

const ARG_WEATHER_OBSERVATION: &str = "observation";
const ARG_WEATHER_FORMAT: &str = "format";
const ENV_WEATHER_OBSERVATION: &str = "MENUCAST_CMDS_WEATHER_OBSERVATION_PATH";

/// Run the Menucast CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments fail to parse, configuration cannot
/// be merged, inputs are missing or malformed, or output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Recommend(args) => run_recommend(args),
        Command::Weather(args) => run_weather(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "menucast",
    about = "Weather-aware menu and restaurant recommendations",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank the candidates of a recommendation request.
    Recommend(RecommendArgs),
    /// Show the weights and flags derived from a weather observation.
    Weather(WeatherArgs),
}

#[cfg(test)]
mod tests;
