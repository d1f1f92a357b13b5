//! Courant-Friedrichs-Lewy time-step control.
//!
//! The signal speed at node `j` is `|u_j| + sqrt(g·h_j)`. The largest
//! stable step for the explicit scheme is
//!
//! ```text
//! dt = C · Δx / max_j(|u_j| + sqrt(g·h_j))
//! ```
//!
//! clamped to the time remaining so a run lands exactly on its end time.
//! The bound only holds going forward: it is computed from the pre-update
//! state of each step.

use weir_arena::State;
use weir_core::{ConfigError, NumericalInstability, Quantity};

/// Maximum signal speed over a state and where it occurs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveSpeed {
    /// `max_j |u_j| + sqrt(g·h_j)`, m/s.
    pub speed: f64,
    /// Node attaining the maximum (first one on ties).
    pub node: usize,
}

/// Result of a CFL step computation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StableStep {
    /// Time step to take, seconds.
    pub dt: f64,
    /// Signal speed that bounded the step.
    pub wave: WaveSpeed,
    /// Whether `dt` was shortened to the remaining time.
    pub clamped: bool,
}

/// Derives the largest stable time step for a state.
#[derive(Clone, Debug, PartialEq)]
pub struct CflController {
    gravity: f64,
    courant: f64,
    spacing: f64,
}

impl CflController {
    /// Create a controller.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `gravity` or `spacing` is not finite and positive,
    /// or `courant` is outside `(0, 1]`.
    pub fn new(gravity: f64, courant: f64, spacing: f64) -> Result<Self, ConfigError> {
        if !(gravity.is_finite() && gravity > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "gravity",
                value: gravity,
            });
        }
        if !(courant > 0.0 && courant <= 1.0) {
            return Err(ConfigError::InvalidParameter {
                name: "courant",
                value: courant,
            });
        }
        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "spacing",
                value: spacing,
            });
        }
        Ok(Self {
            gravity,
            courant,
            spacing,
        })
    }

    /// Courant safety factor.
    pub fn courant(&self) -> f64 {
        self.courant
    }

    /// Scan `state` for its maximum signal speed.
    ///
    /// Fails on the first node with a non-positive or non-finite depth,
    /// a non-finite discharge, or a non-finite signal speed.
    pub fn max_wave_speed(&self, state: &State) -> Result<WaveSpeed, NumericalInstability> {
        let mut best = WaveSpeed {
            speed: 0.0,
            node: 0,
        };
        for (j, (&h, &hu)) in state.depth().iter().zip(state.discharge()).enumerate() {
            if !h.is_finite() || h <= 0.0 {
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
            let speed = (hu / h).abs() + (self.gravity * h).sqrt();
            if !speed.is_finite() {
                return Err(NumericalInstability {
                    node: Some(j),
                    quantity: Quantity::WaveSpeed,
                    value: speed,
                });
            }
            if speed > best.speed {
                best = WaveSpeed { speed, node: j };
            }
        }
        if best.speed <= 0.0 {
            return Err(NumericalInstability {
                node: None,
                quantity: Quantity::WaveSpeed,
                value: best.speed,
            });
        }
        Ok(best)
    }

    /// Largest stable step for `state`, clamped to `t_remaining`.
    pub fn stable_dt(
        &self,
        state: &State,
        t_remaining: f64,
    ) -> Result<StableStep, NumericalInstability> {
        let wave = self.max_wave_speed(state)?;
        let dt = self.courant * self.spacing / wave.speed;
        Ok(if dt > t_remaining {
            StableStep {
                dt: t_remaining,
                wave,
                clamped: true,
            }
        } else {
            StableStep {
                dt,
                wave,
                clamped: false,
            }
        })
    }
}
