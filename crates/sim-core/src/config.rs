//! Run configuration.
//!
//! All run settings can be loaded from a TOML file; CLI flags override
//! individual fields. Every field has a default, so a partial file (or none
//! at all) is enough to run.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::model::ModelConfig;
use crate::policy::{ActivationPolicy, PolicySet, SelectionKind, TimingKind};

/// How the initial opinion values are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum InitialValues {
    /// Evenly spread values `0, 1, ..., n-1`.
    Spread,
    /// Uniform draws from `[low, high)`.
    Uniform { low: f64, high: f64 },
    /// Normal draws with the given mean and standard deviation.
    Normal { mean: f64, std_dev: f64 },
}

impl Default for InitialValues {
    fn default() -> Self {
        InitialValues::Normal {
            mean: 0.0,
            std_dev: 1.0,
        }
    }
}

/// Complete configuration of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Seed for every random draw of the run.
    pub seed: u64,
    /// Node count when no edge list is supplied.
    pub nodes: usize,
    /// Simulation end time.
    pub horizon: f64,
    /// Snapshot cadence.
    pub log_interval: f64,
    /// Neighbor selection policy.
    pub selection: SelectionKind,
    /// Inter-event-time policy.
    pub timing: TimingKind,
    /// Activation rule.
    pub activation: ActivationPolicy,
    /// Record every move, not just the periodic snapshots.
    pub event_logging: bool,
    /// Initial opinion distribution.
    pub initial_values: InitialValues,
    /// Inter-event-time parameter shared by all agents.
    pub speed: f64,
    /// Fraction of agents that start active, in `[0, 1]`.
    pub active_fraction: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            nodes: 100,
            horizon: 50.0,
            log_interval: 1.0,
            selection: SelectionKind::default(),
            timing: TimingKind::default(),
            activation: ActivationPolicy::default(),
            event_logging: false,
            initial_values: InitialValues::default(),
            speed: 1.0,
            active_fraction: 1.0,
        }
    }
}

impl RunConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the setup-level fields. Engine-level fields (horizon, log
    /// interval, speed) are validated again by the model itself.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.active_fraction) {
            return Err(ConfigError::InvalidActiveFraction(self.active_fraction));
        }
        if let InitialValues::Uniform { low, high } = self.initial_values {
            if !(low < high) {
                return Err(ConfigError::InvalidValueRange { low, high });
            }
        }
        if let InitialValues::Normal { std_dev, .. } = self.initial_values {
            if !(std_dev >= 0.0) {
                return Err(ConfigError::InvalidStdDev(std_dev));
            }
        }
        Ok(())
    }

    /// The engine-level slice of this configuration.
    pub fn model_config(&self) -> ModelConfig {
        ModelConfig {
            horizon: self.horizon,
            log_interval: self.log_interval,
            event_logging: self.event_logging,
            time_logging: true,
            seed: self.seed,
        }
    }

    /// Builds the policy set named by this configuration.
    pub fn policy_set(&self) -> PolicySet {
        PolicySet::from_kinds(self.selection, self.timing, self.activation)
    }
}

/// Errors that can occur while loading a run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the config file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Error parsing the TOML content.
    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// The active fraction is outside `[0, 1]`.
    #[error("active_fraction {0} is outside [0, 1]")]
    InvalidActiveFraction(f64),
    /// The uniform value range is empty or inverted.
    #[error("initial value range [{low}, {high}) is empty or inverted")]
    InvalidValueRange { low: f64, high: f64 },
    /// The normal standard deviation is negative or not a number.
    #[error("initial value standard deviation {0} must be non-negative")]
    InvalidStdDev(f64),
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Opinion-dynamics run configuration

seed = 42
nodes = 100
horizon = 50.0
log_interval = 1.0
selection = "uniform"
timing = "exponential"
activation = "from_features"
event_logging = false
speed = 1.0
active_fraction = 1.0

[initial_values]
kind = "normal"
mean = 0.0
std_dev = 1.0
"#
    .to_string()
}
