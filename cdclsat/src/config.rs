//! Solver configuration.
use serde::Deserialize;
use thiserror::Error;

/// Configurable parameters used during solving.
#[derive(Clone, PartialEq, Debug)]
pub struct SolverConfig {
    /// Multiplicative decay for the VSIDS decision heuristic. (Default: 0.95)
    pub vsids_decay: f64,

    /// Number of learned clauses between VSIDS decays. (Default: 500)
    pub vsids_decay_interval: u64,

    /// Scaling factor for luby sequence based restarts (number of conflicts). (Default: 1)
    pub luby_restart_interval_scale: u64,

    /// Assign variables occurring with a single polarity before searching. (Default: true)
    pub pure_literals: bool,

    /// Seed for choosing the polarity of variables without a saved phase. (Default: none,
    /// seeded from system entropy)
    pub random_seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> SolverConfig {
        SolverConfig {
            vsids_decay: 0.95,
            vsids_decay_interval: 500,
            luby_restart_interval_scale: 1,
            pure_literals: true,
            random_seed: None,
        }
    }
}

impl SolverConfig {
    /// Description of all options with their default values.
    pub fn help() -> String {
        let default = SolverConfig::default();
        let mut help = String::new();
        let options: [(&str, &str, String); 5] = [
            (
                "vsids_decay",
                "Multiplicative decay for the VSIDS decision heuristic.",
                default.vsids_decay.to_string(),
            ),
            (
                "vsids_decay_interval",
                "Number of learned clauses between VSIDS decays.",
                default.vsids_decay_interval.to_string(),
            ),
            (
                "luby_restart_interval_scale",
                "Scaling factor for luby sequence based restarts (number of conflicts).",
                default.luby_restart_interval_scale.to_string(),
            ),
            (
                "pure_literals",
                "Assign variables occurring with a single polarity before searching.",
                default.pure_literals.to_string(),
            ),
            (
                "random_seed",
                "Seed for choosing the polarity of variables without a saved phase.",
                "none".to_string(),
            ),
        ];
        for (name, description, default) in options.iter() {
            help.push_str(&format!(
                "{}:\n    {} (Default: {})\n",
                name, description, default
            ));
        }
        help
    }
}

/// Invalid configuration value.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("vsids_decay must be between 0 and 1 (exclusive), got {0}")]
    VsidsDecay(f64),
    #[error("{0} must be positive")]
    ZeroInterval(&'static str),
}

/// Changes to a [`SolverConfig`].
///
/// Every field that is `Some` overrides the corresponding option. This can be deserialized, so
/// options can be read from TOML files or command line arguments.
#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolverConfigUpdate {
    pub vsids_decay: Option<f64>,
    pub vsids_decay_interval: Option<u64>,
    pub luby_restart_interval_scale: Option<u64>,
    pub pure_literals: Option<bool>,
    pub random_seed: Option<u64>,
}

impl SolverConfigUpdate {
    /// An update that changes nothing.
    pub fn new() -> SolverConfigUpdate {
        SolverConfigUpdate::default()
    }

    /// Combine two updates, options set in `other` take precedence.
    pub fn merge(&mut self, other: SolverConfigUpdate) {
        self.vsids_decay = other.vsids_decay.or(self.vsids_decay);
        self.vsids_decay_interval = other.vsids_decay_interval.or(self.vsids_decay_interval);
        self.luby_restart_interval_scale = other
            .luby_restart_interval_scale
            .or(self.luby_restart_interval_scale);
        self.pure_literals = other.pure_literals.or(self.pure_literals);
        self.random_seed = other.random_seed.or(self.random_seed);
    }

    /// Validate all options of the update and apply them to a config.
    ///
    /// The config is left unchanged when any value is invalid.
    pub fn apply(&self, config: &mut SolverConfig) -> Result<(), ConfigError> {
        if let Some(decay) = self.vsids_decay {
            if !(decay > 0.0 && decay < 1.0) {
                return Err(ConfigError::VsidsDecay(decay));
            }
        }
        if self.vsids_decay_interval == Some(0) {
            return Err(ConfigError::ZeroInterval("vsids_decay_interval"));
        }
        if self.luby_restart_interval_scale == Some(0) {
            return Err(ConfigError::ZeroInterval("luby_restart_interval_scale"));
        }

        if let Some(decay) = self.vsids_decay {
            config.vsids_decay = decay;
        }
        if let Some(interval) = self.vsids_decay_interval {
            config.vsids_decay_interval = interval;
        }
        if let Some(scale) = self.luby_restart_interval_scale {
            config.luby_restart_interval_scale = scale;
        }
        if let Some(pure_literals) = self.pure_literals {
            config.pure_literals = pure_literals;
        }
        if self.random_seed.is_some() {
            config.random_seed = self.random_seed;
        }
        Ok(())
    }
}
