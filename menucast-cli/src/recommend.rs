//! Recommend command implementation for the Menucast CLI.

use std::io::Write;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use menucast_core::{DislikePolicy, Recommend, RecommendationRequest, RecommendationResult};
use menucast_scorer::{RecommendConfig as EngineConfig, Recommender};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::files::{read_json, require_existing, write_json};
use crate::{
    ARG_RECOMMEND_DISLIKE_POLICY, ARG_RECOMMEND_MAX_RESULTS, ARG_RECOMMEND_OUTPUT,
    ARG_RECOMMEND_REFERENCE_DATA, ARG_RECOMMEND_REQUEST, ARG_RECOMMEND_WALKING_PACE, CliError,
    ENV_RECOMMEND_REQUEST,
};

const REQUEST_DOCUMENT: &str = "recommendation request";

/// How candidates carrying a disliked tag are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum DislikeMode {
    /// Keep the candidate at the bottom of the list.
    #[default]
    Demote,
    /// Drop the candidate entirely.
    Exclude,
}

impl From<DislikeMode> for DislikePolicy {
    fn from(mode: DislikeMode) -> Self {
        match mode {
            DislikeMode::Demote => Self::Demote,
            DislikeMode::Exclude => Self::Exclude,
        }
    }
}

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank the candidates of a JSON-encoded recommendation request \
                 (candidates, weather, preferences and an optional origin) \
                 and print the results as JSON, best first. Category tables, \
                 allergen groups and dishes come from the embedded reference \
                 bundle unless --reference-data names another.",
    about = "Recommend places for the current weather"
)]
#[ortho_config(prefix = "MENUCAST")]
pub(crate) struct RecommendArgs {
    /// Path to a JSON file containing a recommendation request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Reference bundle to use instead of the embedded one.
    #[arg(long = ARG_RECOMMEND_REFERENCE_DATA, value_name = "path")]
    #[serde(default)]
    pub(crate) reference_data: Option<Utf8PathBuf>,
    /// Maximum number of results to print.
    #[arg(long = ARG_RECOMMEND_MAX_RESULTS, value_name = "n")]
    #[serde(default)]
    pub(crate) max_results: Option<usize>,
    /// Walking pace in metres per minute used for ETAs.
    #[arg(long = ARG_RECOMMEND_WALKING_PACE, value_name = "m/min")]
    #[serde(default)]
    pub(crate) walking_pace: Option<f64>,
    /// Whether disliked candidates are demoted or excluded.
    #[arg(long = ARG_RECOMMEND_DISLIKE_POLICY, value_enum, value_name = "policy")]
    #[serde(default)]
    pub(crate) dislike_policy: Option<DislikeMode>,
    /// Write the results to this file instead of stdout.
    #[arg(long = ARG_RECOMMEND_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecommendConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Optional reference bundle replacing the embedded one.
    pub(crate) reference_data: Option<Utf8PathBuf>,
    /// Validated engine options.
    pub(crate) engine: EngineConfig,
    /// Optional output file.
    pub(crate) output: Option<Utf8PathBuf>,
}

impl RecommendConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.request_path, ARG_RECOMMEND_REQUEST)?;
        if let Some(path) = &self.reference_data {
            require_existing(path, ARG_RECOMMEND_REFERENCE_DATA)?;
        }
        Ok(())
    }
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_RECOMMEND_REQUEST,
            env: ENV_RECOMMEND_REQUEST,
        })?;

        let defaults = EngineConfig::default();
        let engine = defaults
            .with_max_results(args.max_results.unwrap_or(defaults.max_results))
            .with_walking_pace(
                args.walking_pace
                    .unwrap_or(defaults.walking_pace_m_per_min),
            )
            .with_dislike_policy(
                args.dislike_policy
                    .map_or(defaults.dislike_policy, DislikePolicy::from),
            )
            .validate()?;

        Ok(Self {
            request_path,
            reference_data: args.reference_data,
            engine,
            output: args.output,
        })
    }
}

/// Builds a recommender for the current invocation.
pub(super) trait RecommenderBuilder {
    fn build(&self, config: &RecommendConfig) -> Result<Box<dyn Recommend>, CliError>;
}

pub(super) struct DefaultRecommenderBuilder;

impl RecommenderBuilder for DefaultRecommenderBuilder {
    fn build(&self, config: &RecommendConfig) -> Result<Box<dyn Recommend>, CliError> {
        let reference = config
            .reference_data
            .as_deref()
            .map_or_else(menucast_data::builtin, menucast_data::load)?;
        if reference.is_empty() {
            log::warn!("reference data is empty; every candidate scores the baseline");
        }
        let recommender = Recommender::with_config(Arc::new(reference), config.engine)?;
        Ok(Box::new(recommender))
    }
}

pub(super) fn run_recommend(args: RecommendArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultRecommenderBuilder;
    run_recommend_with(args, &builder, &mut stdout)
}

pub(super) fn run_recommend_with(
    args: RecommendArgs,
    builder: &dyn RecommenderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_recommend_config(args)?;
    let results = execute_recommend(&config, builder)?;
    write_json(writer, config.output.as_deref(), &results)
}

fn execute_recommend(
    config: &RecommendConfig,
    builder: &dyn RecommenderBuilder,
) -> Result<Vec<RecommendationResult>, CliError> {
    let request = load_recommend_request(&config.request_path)?;
    let recommender = builder.build(config)?;
    let results = recommender.recommend(&request);
    log::info!(
        "ranked {} of {} candidate(s) from {}",
        results.len(),
        request.candidates.len(),
        config.request_path
    );
    Ok(results)
}

fn resolve_recommend_config(args: RecommendArgs) -> Result<RecommendConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads a JSON-encoded [`RecommendationRequest`] from disk.
pub(super) fn load_recommend_request(path: &Utf8Path) -> Result<RecommendationRequest, CliError> {
    read_json(path, REQUEST_DOCUMENT)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RecommendConfig, CliError> {
    let merged = RecommendArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RecommendConfig::try_from(merged)
}
