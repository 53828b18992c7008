//! Weather command: show how an observation is normalised.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use menucast_core::{WeatherFlag, WeatherObservation, WeatherSummary, WeatherWeights};
use menucast_data::kma::{fields_from_json, observation_from_fields};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::files::{read_json, read_text, require_existing, write_json};
use crate::{ARG_WEATHER_FORMAT, ARG_WEATHER_OBSERVATION, CliError, ENV_WEATHER_OBSERVATION};

const OBSERVATION_DOCUMENT: &str = "weather observation";
const KMA_DOCUMENT: &str = "KMA forecast";

/// Shape of the weather input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ObservationFormat {
    /// A `WeatherObservation` document.
    #[default]
    Observation,
    /// KMA forecast items, bare or wrapped in the API envelope.
    Kma,
}

/// CLI arguments for the `weather` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Normalise a weather observation into the continuous weights \
                 and discrete flags used for scoring. The input is either a \
                 WeatherObservation JSON document or, with --format kma, the \
                 forecast items returned by the KMA short-term forecast API.",
    about = "Show weather weights and flags"
)]
#[ortho_config(prefix = "MENUCAST")]
pub(crate) struct WeatherArgs {
    /// Path to the observation JSON file.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) observation_path: Option<Utf8PathBuf>,
    /// Input format.
    #[arg(long = ARG_WEATHER_FORMAT, value_enum, value_name = "format")]
    #[serde(default)]
    pub(crate) format: Option<ObservationFormat>,
}

impl WeatherArgs {
    pub(crate) fn into_config(self) -> Result<WeatherConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        WeatherConfig::try_from(merged)
    }
}

/// Resolved `weather` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WeatherConfig {
    pub(crate) observation_path: Utf8PathBuf,
    pub(crate) format: ObservationFormat,
}

impl TryFrom<WeatherArgs> for WeatherConfig {
    type Error = CliError;

    fn try_from(args: WeatherArgs) -> Result<Self, Self::Error> {
        let observation_path = args.observation_path.ok_or(CliError::MissingArgument {
            field: ARG_WEATHER_OBSERVATION,
            env: ENV_WEATHER_OBSERVATION,
        })?;
        Ok(Self {
            observation_path,
            format: args.format.unwrap_or_default(),
        })
    }
}

/// Printed summary of a normalised observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct WeatherReport {
    pub(crate) observation: WeatherObservation,
    pub(crate) apparent_temperature_c: Option<f64>,
    pub(crate) weights: WeatherWeights,
    pub(crate) flags: Vec<WeatherFlag>,
}

impl WeatherReport {
    pub(crate) fn from_observation(observation: WeatherObservation) -> Self {
        let clean = observation.sanitised();
        let summary = WeatherSummary::from_observation(&clean);
        Self {
            observation: clean,
            apparent_temperature_c: clean.apparent_temperature(),
            weights: summary.weights,
            flags: summary.flags.iter().collect(),
        }
    }
}

pub(super) fn run_weather(args: WeatherArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_weather_with(args, &mut stdout)
}

pub(super) fn run_weather_with(args: WeatherArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.observation_path, ARG_WEATHER_OBSERVATION)?;
    let observation = load_observation(&config.observation_path, config.format)?;
    write_json(writer, None, &WeatherReport::from_observation(observation))
}

pub(super) fn load_observation(
    path: &Utf8Path,
    format: ObservationFormat,
) -> Result<WeatherObservation, CliError> {
    match format {
        ObservationFormat::Observation => read_json(path, OBSERVATION_DOCUMENT),
        ObservationFormat::Kma => {
            let text = read_text(path, KMA_DOCUMENT)?;
            let fields = fields_from_json(&text).map_err(|source| CliError::ParseInput {
                what: KMA_DOCUMENT,
                path: path.to_path_buf(),
                source,
            })?;
            log::debug!("read {} KMA item(s) from {path}", fields.len());
            Ok(observation_from_fields(&fields))
        }
    }
}
