//! Run configuration and initial conditions.
//!
//! [`SimulationConfig`] is the single immutable value a run is built
//! from. [`validate()`](SimulationConfig::validate) checks every
//! parameter eagerly, including realizing the initial condition on the
//! grid, so a run never discovers a configuration problem mid-way.
//!
//! Every type here is serde-serializable; see [`crate::scenario`] for
//! the file format built on that.

use serde::{Deserialize, Serialize};
use weir_arena::State;
use weir_core::ConfigError;
use weir_grid::Grid;
use weir_scheme::BoundaryPair;

use crate::sampling::SampleCadence;

// ── FlowState ──────────────────────────────────────────────────────

/// A uniform depth and velocity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlowState {
    /// Depth in metres.
    pub depth: f64,
    /// Velocity in m/s. Defaults to still water.
    #[serde(default)]
    pub velocity: f64,
}

impl FlowState {
    /// Still water of the given depth.
    pub fn still(depth: f64) -> Self {
        Self {
            depth,
            velocity: 0.0,
        }
    }
}

// ── InitialCondition ───────────────────────────────────────────────

/// Parametric dam break: two uniform states separated by a gate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DamBreak {
    /// Gate position in metres from the left end. Nodes with
    /// `x < gate_position` take the left state, the rest the right state.
    pub gate_position: f64,
    /// Upstream state.
    pub left: FlowState,
    /// Downstream state.
    pub right: FlowState,
}

/// How the `t = 0` state is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialCondition {
    /// Per-node depth and velocity arrays, one entry per grid node.
    Explicit {
        /// Depth per node, metres.
        depth: Vec<f64>,
        /// Velocity per node, m/s.
        velocity: Vec<f64>,
    },
    /// Two-state dam break.
    DamBreak(DamBreak),
}

impl InitialCondition {
    /// Realize the condition on `grid`.
    ///
    /// # Errors
    ///
    /// `InvalidInitialCondition` if explicit arrays do not match the node
    /// count or the gate lies outside the open reach; `NonPositiveDepth`
    /// or `InvalidState` from [`State`] validation.
    pub fn realize(&self, grid: &Grid) -> Result<State, ConfigError> {
        match self {
            Self::Explicit { depth, velocity } => {
                if depth.len() != grid.node_count() || velocity.len() != grid.node_count() {
                    return Err(ConfigError::InvalidInitialCondition {
                        reason: format!(
                            "explicit arrays have {} depths and {} velocities for {} nodes",
                            depth.len(),
                            velocity.len(),
                            grid.node_count()
                        ),
                    });
                }
                State::from_primitive(depth, velocity)
            }
            Self::DamBreak(dam) => {
                let gate = dam.gate_position;
                if !(gate > 0.0 && gate < grid.length()) {
                    return Err(ConfigError::InvalidInitialCondition {
                        reason: format!(
                            "gate position {gate} must lie strictly inside (0, {})",
                            grid.length()
                        ),
                    });
                }
                let (depth, velocity): (Vec<f64>, Vec<f64>) = (0..grid.node_count())
                    .map(|j| {
                        let side = if grid.position(j) < gate {
                            dam.left
                        } else {
                            dam.right
                        };
                        (side.depth, side.velocity)
                    })
                    .unzip();
                State::from_primitive(&depth, &velocity)
            }
        }
    }
}

// ── SimulationConfig ───────────────────────────────────────────────

/// Everything needed to build a [`Simulation`](crate::Simulation).
///
/// Fields are public; use [`new()`](Self::new) for the common defaults
/// and override what differs. When deserialized, the defaulted fields
/// may be omitted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Reach length in metres.
    pub length: f64,
    /// Number of grid nodes, including both edges. Must be >= 3.
    pub node_count: usize,
    /// Gravitational acceleration, m/s². Default: 9.81.
    #[serde(default = "default_gravity")]
    pub gravity: f64,
    /// Courant safety factor in `(0, 1]`. Default: 0.5.
    #[serde(default = "default_courant")]
    pub courant: f64,
    /// End time in seconds.
    pub t_end: f64,
    /// Edge policies. Default: reflective at both ends.
    #[serde(default)]
    pub boundaries: BoundaryPair,
    /// The `t = 0` state.
    pub initial: InitialCondition,
    /// When states are handed to the sink during [`run`](crate::Simulation::run).
    /// Default: never.
    #[serde(default)]
    pub cadence: SampleCadence,
    /// Optional cap on the number of steps. Exceeding it fails the run.
    #[serde(default)]
    pub max_steps: Option<u64>,
}

fn default_gravity() -> f64 {
    SimulationConfig::DEFAULT_GRAVITY
}

fn default_courant() -> f64 {
    SimulationConfig::DEFAULT_COURANT
}

impl SimulationConfig {
    /// Default gravitational acceleration, m/s².
    pub const DEFAULT_GRAVITY: f64 = 9.81;
    /// Default Courant safety factor.
    pub const DEFAULT_COURANT: f64 = 0.5;

    /// Config with default gravity, Courant factor, boundaries and cadence.
    pub fn new(length: f64, node_count: usize, t_end: f64, initial: InitialCondition) -> Self {
        Self {
            length,
            node_count,
            gravity: Self::DEFAULT_GRAVITY,
            courant: Self::DEFAULT_COURANT,
            t_end,
            boundaries: BoundaryPair::closed(),
            initial,
            cadence: SampleCadence::Never,
            max_steps: None,
        }
    }

    /// Build the grid this config describes.
    pub fn grid(&self) -> Result<Grid, ConfigError> {
        Grid::new(self.length, self.node_count)
    }

    /// Check all parameters and realize the initial condition.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, checked in this order: grid,
    /// `gravity`, `courant`, `t_end`, `max_steps`, cadence, boundaries,
    /// initial condition.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validated_state().map(|_| ())
    }

    /// Validate and return the grid plus the raw `t = 0` state.
    pub(crate) fn validated_state(&self) -> Result<(Grid, State), ConfigError> {
        let grid = self.grid()?;
        if !(self.gravity.is_finite() && self.gravity > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "gravity",
                value: self.gravity,
            });
        }
        if !(self.courant > 0.0 && self.courant <= 1.0) {
            return Err(ConfigError::InvalidParameter {
                name: "courant",
                value: self.courant,
            });
        }
        if !(self.t_end.is_finite() && self.t_end > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "t_end",
                value: self.t_end,
            });
        }
        if self.max_steps == Some(0) {
            return Err(ConfigError::InvalidParameter {
                name: "max_steps",
                value: 0.0,
            });
        }
        self.cadence.validate()?;
        self.boundaries.validate()?;
        let state = self.initial.realize(&grid)?;
        Ok((grid, state))
    }
}
