//! Physical flux of the shallow-water equations.
//!
//! ```text
//! F1 = hu
//! F2 = hu·u + ½·g·h²     where u = hu / h
//! ```

use weir_arena::State;
use weir_core::{ConfigError, NumericalInstability, Quantity};

/// Flux of both conserved variables at one node.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Flux {
    /// Mass flux `hu`, m²/s.
    pub mass: f64,
    /// Momentum flux `hu·u + ½gh²`, m³/s².
    pub momentum: f64,
}

/// Maps a state to per-node flux pairs.
///
/// Refuses to divide by a depth at or below `dry_depth`; such a node is
/// reported as a [`NumericalInstability`] instead.
#[derive(Clone, Debug, PartialEq)]
pub struct FluxEvaluator {
    gravity: f64,
    dry_depth: f64,
}

impl FluxEvaluator {
    /// Depth (m) at or below which a node is treated as dry.
    pub const DEFAULT_DRY_DEPTH: f64 = 1e-10;

    /// Create an evaluator with the default dry-depth threshold.
    pub fn new(gravity: f64) -> Result<Self, ConfigError> {
        if !(gravity.is_finite() && gravity > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "gravity",
                value: gravity,
            });
        }
        Ok(Self {
            gravity,
            dry_depth: Self::DEFAULT_DRY_DEPTH,
        })
    }

    /// Replace the dry-depth threshold. Must be finite and `>= 0`.
    pub fn with_dry_depth(mut self, dry_depth: f64) -> Result<Self, ConfigError> {
        if !(dry_depth.is_finite() && dry_depth >= 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "dry_depth",
                value: dry_depth,
            });
        }
        self.dry_depth = dry_depth;
        Ok(self)
    }

    /// Gravitational acceleration, m/s².
    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Dry-depth threshold, metres.
    pub fn dry_depth(&self) -> f64 {
        self.dry_depth
    }

    /// Flux of a single wet node. No validation.
    #[inline]
    pub fn node_flux(&self, h: f64, hu: f64) -> Flux {
        Flux {
            mass: hu,
            momentum: hu * hu / h + 0.5 * self.gravity * h * h,
        }
    }

    /// Compute the flux at every node of `state` into `out`.
    ///
    /// `out` is cleared and refilled, so a driver can reuse one buffer
    /// across steps. On error its contents are unspecified.
    pub fn evaluate(&self, state: &State, out: &mut Vec<Flux>) -> Result<(), NumericalInstability> {
        out.clear();
        out.reserve(state.len());
        for (j, (&h, &hu)) in state.depth().iter().zip(state.discharge()).enumerate() {
            if !h.is_finite() || h <= self.dry_depth {
                return Err(NumericalInstability {
                    node: Some(j),
                    quantity: Quantity::Depth,
                    value: h,
                });
            }
            if !hu.is_finite() {
                return Err(NumericalInstability {
                    node: Some(j),
                    quantity: Quantity::Discharge,
                    value: hu,
                });
            }
            let flux = self.node_flux(h, hu);
            if !flux.momentum.is_finite() {
                return Err(NumericalInstability {
                    node: Some(j),
                    quantity: Quantity::Velocity,
                    value: hu / h,
                });
            }
            out.push(flux);
        }
        Ok(())
    }
}
