//! Snapshot sampling cadence.

use serde::{Deserialize, Serialize};
use weir_core::{ConfigError, StepId};

/// When published states are offered to the snapshot sink.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleCadence {
    /// Only the final state on completion.
    #[default]
    Never,
    /// After every step.
    EveryStep,
    /// After every k-th step (`k >= 1`).
    EveryNthStep(u64),
    /// Whenever simulated time crosses a multiple of the interval (seconds).
    Interval(f64),
}

impl SampleCadence {
    /// Reject a zero step stride or a non-positive interval.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::EveryNthStep(0) => Err(ConfigError::InvalidParameter {
                name: "every_nth_step",
                value: 0.0,
            }),
            Self::Interval(dt) if !(dt.is_finite() && dt > 0.0) => {
                Err(ConfigError::InvalidParameter {
                    name: "interval",
                    value: dt,
                })
            }
            _ => Ok(()),
        }
    }
}

/// Tracks which published states are due under a cadence.
#[derive(Clone, Debug)]
pub(crate) struct Sampler {
    cadence: SampleCadence,
    next_due: f64,
    tolerance: f64,
}

impl Sampler {
    pub(crate) fn new(cadence: SampleCadence, tolerance: f64) -> Self {
        let next_due = match cadence {
            SampleCadence::Interval(dt) => dt,
            _ => f64::INFINITY,
        };
        Self {
            cadence,
            next_due,
            tolerance,
        }
    }

    /// Whether the initial state is sampled at all.
    pub(crate) fn samples_initial(&self) -> bool {
        self.cadence != SampleCadence::Never
    }

    /// Whether the state published as `step` at `time` is due.
    ///
    /// Interval sampling emits at most one sample per step even if the
    /// step crossed several interval marks.
    pub(crate) fn due(&mut self, step: StepId, time: f64) -> bool {
        match self.cadence {
            SampleCadence::Never => false,
            SampleCadence::EveryStep => true,
            SampleCadence::EveryNthStep(k) => step.0 % k == 0,
            SampleCadence::Interval(dt) => {
                if time + self.tolerance < self.next_due {
                    return false;
                }
                while self.next_due <= time + self.tolerance {
                    self.next_due += dt;
                }
                true
            }
        }
    }
}
