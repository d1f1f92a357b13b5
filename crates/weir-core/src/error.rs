//! Error types for the Weir solver.
//!
//! Organized by when they can occur: configuration errors are detected
//! eagerly at construction, numerical instabilities are detected while
//! stepping, and sink errors come from the snapshot hand-off.

use std::error::Error;
use std::fmt;

use crate::id::{Side, StepId};
use crate::status::RunStatus;

// ── ConfigError ────────────────────────────────────────────────────

/// Invalid grid, state, boundary policy, or run parameter.
///
/// Always raised before the first step; a run never produces one.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Grid length or node count is unusable.
    InvalidGrid {
        /// Description of the problem.
        reason: String,
    },
    /// A scalar run parameter is out of range or not finite.
    InvalidParameter {
        /// Parameter name (`gravity`, `courant`, `t_end`, ...).
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// State arrays are structurally inconsistent (length mismatch,
    /// non-finite discharge, wrong node count).
    InvalidState {
        /// Description of the inconsistency.
        reason: String,
    },
    /// A node's initial depth is zero, negative, or not finite.
    NonPositiveDepth {
        /// Index of the first offending node.
        node: usize,
        /// The rejected depth in metres.
        value: f64,
    },
    /// A boundary policy references a value incompatible with positivity.
    InvalidBoundary {
        /// Which end of the reach.
        side: Side,
        /// Description of the problem.
        reason: String,
    },
    /// The initial condition cannot be realized on the grid.
    InvalidInitialCondition {
        /// Description of the problem.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGrid { reason } => write!(f, "invalid grid: {reason}"),
            Self::InvalidParameter { name, value } => {
                write!(f, "invalid parameter {name}: {value}")
            }
            Self::InvalidState { reason } => write!(f, "invalid state: {reason}"),
            Self::NonPositiveDepth { node, value } => {
                write!(f, "depth at node {node} must be finite and > 0, got {value}")
            }
            Self::InvalidBoundary { side, reason } => {
                write!(f, "invalid {side} boundary: {reason}")
            }
            Self::InvalidInitialCondition { reason } => {
                write!(f, "invalid initial condition: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

// ── NumericalInstability ───────────────────────────────────────────

/// Which derived or conserved quantity tripped an instability check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quantity {
    /// Water depth `h`.
    Depth,
    /// Discharge per unit width `hu`.
    Discharge,
    /// Depth-averaged velocity `u = hu / h`.
    Velocity,
    /// Signal speed `|u| + sqrt(g h)`.
    WaveSpeed,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Depth => write!(f, "depth"),
            Self::Discharge => write!(f, "discharge"),
            Self::Velocity => write!(f, "velocity"),
            Self::WaveSpeed => write!(f, "wave speed"),
        }
    }
}

/// A non-finite or non-positive value found while scanning a state.
///
/// Raised by the flux evaluator and the CFL controller. Always fatal to
/// the run: the explicit scheme has no local recovery once a node's depth
/// collapses or diverges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NumericalInstability {
    /// Offending node, or `None` for a whole-state quantity such as a
    /// zero maximum wave speed.
    pub node: Option<usize>,
    /// The quantity that failed the check.
    pub quantity: Quantity,
    /// The offending value.
    pub value: f64,
}

impl fmt::Display for NumericalInstability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.quantity, self.value)?;
        if let Some(node) = self.node {
            write!(f, " at node {node}")?;
        }
        Ok(())
    }
}

impl Error for NumericalInstability {}

/// Diagnostic record of the step at which a run failed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FailureRecord {
    /// The step that was being attempted.
    pub step: StepId,
    /// Simulated time (seconds) of the state that failed validation.
    pub time: f64,
    /// What was detected.
    pub instability: NumericalInstability,
}

impl fmt::Display for FailureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "numerical instability at step {} (t = {} s): {}",
            self.step, self.time, self.instability
        )
    }
}

// ── StepError ──────────────────────────────────────────────────────

/// Errors returned when requesting a step from the driver.
#[derive(Clone, Debug, PartialEq)]
pub enum StepError {
    /// The pre-step state failed validation; the run is now `Failed`.
    Instability(FailureRecord),
    /// The run already reached a terminal status.
    Terminal(RunStatus),
    /// The configured step budget ran out before `t_end`; the run is now
    /// `Failed`.
    StepBudgetExhausted {
        /// Steps taken when the budget was hit.
        steps: u64,
    },
    /// A caller-forced time step was zero, negative, or not finite.
    InvalidTimeStep {
        /// The rejected dt in seconds.
        dt: f64,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instability(record) => write!(f, "{record}"),
            Self::Terminal(status) => write!(f, "run is {status}; no further steps accepted"),
            Self::StepBudgetExhausted { steps } => {
                write!(f, "step budget exhausted after {steps} steps")
            }
            Self::InvalidTimeStep { dt } => {
                write!(f, "time step must be finite and > 0, got {dt}")
            }
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Instability(record) => Some(&record.instability),
            _ => None,
        }
    }
}

// ── SinkError ──────────────────────────────────────────────────────

/// Errors from handing a snapshot to a [`SnapshotSink`](crate::SnapshotSink).
///
/// Sink errors never fail a run; the driver counts and logs them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SinkError {
    /// The sink's bounded buffer is full.
    Backpressure,
    /// The consumer side of the sink has gone away.
    Disconnected,
    /// Writing the snapshot failed.
    Io {
        /// Description of the I/O failure.
        reason: String,
    },
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backpressure => write!(f, "sink buffer full"),
            Self::Disconnected => write!(f, "sink consumer disconnected"),
            Self::Io { reason } => write!(f, "sink i/o failed: {reason}"),
        }
    }
}

impl Error for SinkError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instability_display_names_node_and_quantity() {
        let err = NumericalInstability {
            node: Some(17),
            quantity: Quantity::Depth,
            value: -0.25,
        };
        let msg = err.to_string();
        assert!(msg.contains("depth"));
        assert!(msg.contains("-0.25"));
        assert!(msg.contains("node 17"));
    }

    #[test]
    fn instability_without_node_omits_location() {
        let err = NumericalInstability {
            node: None,
            quantity: Quantity::WaveSpeed,
            value: 0.0,
        };
        assert_eq!(err.to_string(), "wave speed = 0");
    }

    #[test]
    fn step_error_source_is_instability() {
        let record = FailureRecord {
            step: StepId(3),
            time: 1.5,
            instability: NumericalInstability {
                node: Some(2),
                quantity: Quantity::Discharge,
                value: f64::NAN,
            },
        };
        let err = StepError::Instability(record);
        assert!(err.source().is_some());
        assert!(err.to_string().contains("step 3"));
        assert!(StepError::Terminal(RunStatus::Completed).source().is_none());
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::InvalidBoundary {
            side: Side::Right,
            reason: "fixed depth must be > 0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid right boundary: fixed depth must be > 0"
        );
        let err = ConfigError::NonPositiveDepth { node: 4, value: 0.0 };
        assert!(err.to_string().contains("node 4"));
    }
}
