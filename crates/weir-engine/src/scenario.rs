//! JSON scenario files.
//!
//! A scenario is a [`SimulationConfig`] in JSON. Fields with defaults
//! (`gravity`, `courant`, `boundaries`, `cadence`, `max_steps`) may be
//! left out; unknown fields are rejected.
//!
//! ```text
//! {
//!   "length": 1000.0,
//!   "node_count": 101,
//!   "t_end": 60.0,
//!   "boundaries": { "left": "reflective", "right": { "fixed": { "depth": 1.0, "velocity": 0.0 } } },
//!   "initial": {
//!     "dam_break": { "gate_position": 500.0, "left": { "depth": 5.0 }, "right": { "depth": 1.0 } }
//!   },
//!   "cadence": { "interval": 5.0 }
//! }
//! ```
//!
//! Per-node arrays are given as
//! `"initial": { "explicit": { "depth": [...], "velocity": [...] } }`.

use std::error::Error;
use std::fmt;

use weir_core::ConfigError;

use crate::config::SimulationConfig;

/// Errors from reading or writing a scenario.
#[derive(Debug)]
pub enum ScenarioError {
    /// The text is not valid JSON or does not match the config layout.
    Parse(serde_json::Error),
    /// The scenario parsed but describes an invalid run.
    Config(ConfigError),
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "malformed scenario: {e}"),
            Self::Config(e) => write!(f, "invalid scenario: {e}"),
        }
    }
}

impl Error for ScenarioError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for ScenarioError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

impl From<ConfigError> for ScenarioError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Parse and validate a scenario.
///
/// # Errors
///
/// [`ScenarioError::Parse`] for malformed JSON, unknown fields or
/// missing required fields; [`ScenarioError::Config`] from
/// [`SimulationConfig::validate`].
pub fn parse_scenario(text: &str) -> Result<SimulationConfig, ScenarioError> {
    let config: SimulationConfig = serde_json::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Render a config as pretty-printed scenario JSON.
pub fn to_scenario(config: &SimulationConfig) -> Result<String, ScenarioError> {
    Ok(serde_json::to_string_pretty(config)?)
}
