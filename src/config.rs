use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use jsonschema::{JSONSchema, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    director::DirectorConfig,
    model::NetworkSpec,
    signal::{Signal, Token},
};

/// One `sr-run` run file: the network, how to direct it, and what to feed
/// its boundary inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub network: NetworkSpec,
    #[serde(default)]
    pub director: DirectorConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// One entry per boundary input; `null` drives the input absent for that
    /// tick.
    #[serde(default)]
    pub stimuli: BTreeMap<String, Vec<Option<Token>>>,
    /// Ticks to run. Defaults to the longest stimulus sequence.
    #[serde(default)]
    pub ticks: Option<u64>,
}

fn default_enabled_true() -> bool {
    true
}

fn default_logging_dir() -> PathBuf {
    PathBuf::from("./logs/sr-run")
}

fn default_logging_filter() -> String {
    "info".to_string()
}

fn default_logging_rotation() -> LoggingRotation {
    LoggingRotation::Daily
}

fn default_logging_retention_days() -> usize {
    14
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LoggingRotation {
    Daily,
    Hourly,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_logging_filter")]
    pub filter: String,
    #[serde(default = "default_logging_rotation")]
    pub rotation: LoggingRotation,
    #[serde(default = "default_logging_retention_days")]
    pub retention_days: usize,
    #[serde(default = "default_enabled_true")]
    pub stderr_warn_enabled: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_logging_dir(),
            filter: default_logging_filter(),
            rotation: default_logging_rotation(),
            retention_days: default_logging_retention_days(),
            stderr_warn_enabled: true,
        }
    }
}

impl Config {
    pub fn load(config_path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        let config_value: Value = json5::from_str(&config_content)
            .with_context(|| format!("failed to parse {}", config_path.display()))?;

        let config_base = config_path.parent().unwrap_or_else(|| Path::new("."));
        let schema_path = resolve_schema_path(config_base, &config_value)?;
        validate_against_schema(&config_value, &schema_path)?;

        let mut config: Config =
            serde_json::from_value(config_value).context("failed to deserialize run config")?;

        if !config.logging.dir.is_absolute() {
            config.logging.dir = config_base.join(&config.logging.dir);
        }
        config.check_stimuli()?;

        Ok(config)
    }

    /// Ticks to run: `ticks` when given, else the longest stimulus.
    pub fn tick_count(&self) -> u64 {
        self.ticks.unwrap_or_else(|| {
            self.stimuli
                .values()
                .map(|values| values.len() as u64)
                .max()
                .unwrap_or(0)
        })
    }

    /// Boundary input signals for `tick` (counted from 1), in the network's
    /// input order. Inputs without a stimulus, or past its end, are absent.
    pub fn stimuli_for_tick(&self, tick: u64) -> Vec<Signal> {
        let index = tick.saturating_sub(1) as usize;
        self.network
            .inputs
            .iter()
            .map(|input| {
                self.stimuli
                    .get(input)
                    .and_then(|values| values.get(index))
                    .cloned()
                    .flatten()
                    .map_or(Signal::Absent, Signal::Present)
            })
            .collect()
    }

    fn check_stimuli(&self) -> Result<()> {
        for name in self.stimuli.keys() {
            if !self.network.inputs.contains(name) {
                return Err(anyhow!(
                    "stimuli refer to '{name}', which is not a boundary input of network '{}'",
                    self.network.name
                ));
            }
        }
        Ok(())
    }
}

fn resolve_schema_path(config_base: &Path, config_value: &Value) -> Result<PathBuf> {
    if let Some(path_text) = config_value.get("$schema").and_then(|value| value.as_str()) {
        let configured = PathBuf::from(path_text);
        if configured.is_absolute() {
            return Ok(configured);
        }
        return Ok(config_base.join(&configured));
    }

    let local_default = config_base.join("sr-run.schema.json");
    if local_default.exists() {
        return Ok(local_default);
    }

    Err(anyhow!(
        "unable to resolve schema path: expected $schema in config or sr-run.schema.json next to it"
    ))
}

fn validate_against_schema(config_value: &Value, schema_path: &Path) -> Result<()> {
    let schema_content = fs::read_to_string(schema_path)
        .with_context(|| format!("failed to read schema {}", schema_path.display()))?;
    let schema: Value = serde_json::from_str(&schema_content)
        .with_context(|| format!("failed to parse schema {}", schema_path.display()))?;

    let compiled =
        JSONSchema::compile(&schema).map_err(|e| anyhow!("failed to compile schema: {e}"))?;

    match compiled.validate(config_value) {
        Ok(()) => Ok(()),
        Err(errors_iter) => {
            let validation_errors: Vec<ValidationError> = errors_iter.collect();
            let messages: Vec<String> = validation_errors
                .into_iter()
                .map(|error| error.to_string())
                .collect();
            Err(anyhow!("config validation failed: {}", messages.join("; ")))
        }
    }
}
