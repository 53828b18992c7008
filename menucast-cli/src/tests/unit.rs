//! Argument parsing tests for the top-level command.

use super::*;
use clap::Parser;
use rstest::rstest;

#[rstest]
fn parses_recommend_flags() {
    let cli = Cli::try_parse_from([
        "menucast",
        "recommend",
        "request.json",
        "--max-results",
        "3",
        "--walking-pace",
        "60",
        "--dislike-policy",
        "exclude",
    ])
    .expect("arguments should parse");
    let Command::Recommend(args) = cli.command else {
        panic!("expected recommend command");
    };
    assert_eq!(args.request_path.as_deref().map(camino::Utf8Path::as_str), Some("request.json"));
    assert_eq!(args.max_results, Some(3));
    assert_eq!(args.walking_pace, Some(60.0));
    assert_eq!(args.dislike_policy, Some(recommend::DislikeMode::Exclude));
}

#[rstest]
fn parses_weather_format() {
    let cli = Cli::try_parse_from(["menucast", "weather", "obs.json", "--format", "kma"])
        .expect("arguments should parse");
    let Command::Weather(args) = cli.command else {
        panic!("expected weather command");
    };
    assert_eq!(args.format, Some(weather::ObservationFormat::Kma));
}

#[rstest]
#[case::no_subcommand(&["menucast"])]
#[case::unknown_policy(&["menucast", "recommend", "r.json", "--dislike-policy", "ignore"])]
#[case::bad_number(&["menucast", "recommend", "r.json", "--max-results", "many"])]
fn rejects_invalid_arguments(#[case] argv: &[&str]) {
    let err = Cli::try_parse_from(argv.iter().copied()).expect_err("arguments should fail");
    let wrapped = CliError::from(err);
    assert!(matches!(wrapped, CliError::ArgumentParsing(_)));
}
