//! Edge-node policies.

use std::fmt;

use serde::{Deserialize, Serialize};
use weir_arena::State;
use weir_core::{ConfigError, Side};

/// How an edge node is filled after each interior update.
///
/// The edge node is set from its single interior neighbour (node 1 on
/// the left, node `N-2` on the right) or from a prescribed state.
///
/// Serialized in snake case: `"reflective"`, `"transmissive"` or
/// `{"fixed": {"depth": 1.0, "velocity": 0.0}}`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryCondition {
    /// Solid wall: depth copied, velocity negated, so no mass crosses.
    Reflective,
    /// Zero-gradient outflow: both components copied unchanged.
    Transmissive,
    /// Prescribed constant depth (m) and velocity (m/s).
    Fixed {
        /// Edge depth, must be > 0.
        depth: f64,
        /// Edge velocity.
        velocity: f64,
    },
}

impl BoundaryCondition {
    /// Check that the policy is compatible with positive depth.
    pub fn validate(&self, side: Side) -> Result<(), ConfigError> {
        if let Self::Fixed { depth, velocity } = *self {
            if !(depth.is_finite() && depth > 0.0) {
                return Err(ConfigError::InvalidBoundary {
                    side,
                    reason: format!("fixed depth must be finite and > 0, got {depth}"),
                });
            }
            if !velocity.is_finite() {
                return Err(ConfigError::InvalidBoundary {
                    side,
                    reason: format!("fixed velocity must be finite, got {velocity}"),
                });
            }
        }
        Ok(())
    }

    /// Fill the edge node on `side` of `state`.
    ///
    /// # Panics
    ///
    /// Panics if `state` has fewer than two nodes.
    pub fn apply(&self, side: Side, state: &mut State) {
        let last = state.len() - 1;
        let (edge, adjacent) = match side {
            Side::Left => (0, 1),
            Side::Right => (last, last - 1),
        };
        match *self {
            Self::Reflective => {
                let (h, hu) = state.fields_mut();
                h[edge] = h[adjacent];
                hu[edge] = -hu[adjacent];
            }
            Self::Transmissive => state.copy_node(adjacent, edge),
            Self::Fixed { depth, velocity } => state.set_node(edge, depth, velocity),
        }
    }
}

impl fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reflective => write!(f, "reflective"),
            Self::Transmissive => write!(f, "transmissive"),
            Self::Fixed { depth, velocity } => write!(f, "fixed {depth} {velocity}"),
        }
    }
}

/// Policies for both ends of the reach. A missing side deserializes
/// as a wall.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoundaryPair {
    /// Policy at node 0.
    pub left: BoundaryCondition,
    /// Policy at node `N-1`.
    pub right: BoundaryCondition,
}

impl BoundaryPair {
    /// Pair two policies.
    pub fn new(left: BoundaryCondition, right: BoundaryCondition) -> Self {
        Self { left, right }
    }

    /// Walls at both ends.
    pub fn closed() -> Self {
        Self::new(BoundaryCondition::Reflective, BoundaryCondition::Reflective)
    }

    /// Zero-gradient outflow at both ends.
    pub fn open() -> Self {
        Self::new(BoundaryCondition::Transmissive, BoundaryCondition::Transmissive)
    }

    /// Validate both ends, left first.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.left.validate(Side::Left)?;
        self.right.validate(Side::Right)
    }

    /// Fill both edge nodes.
    pub fn apply(&self, state: &mut State) {
        self.left.apply(Side::Left, state);
        self.right.apply(Side::Right, state);
    }
}

impl Default for BoundaryPair {
    fn default() -> Self {
        Self::closed()
    }
}
