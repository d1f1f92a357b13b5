//! Summary of a completed, failed or cancelled run.

use std::fmt;

use weir_core::{FailureRecord, RunStatus};

/// What [`Simulation::run`](crate::Simulation::run) returns.
///
/// A failed run still reports everything up to the failure; samples
/// already handed to the sink remain valid.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    /// Status when the run loop stopped.
    pub status: RunStatus,
    /// Steps published.
    pub steps: u64,
    /// Simulated time of the last published state, seconds.
    pub final_time: f64,
    /// Diagnostic record if a numerical instability ended the run.
    pub failure: Option<FailureRecord>,
    /// Whether the run failed by exhausting its step budget.
    pub budget_exhausted: bool,
    /// `Σ h·Δx` of the `t = 0` state, m².
    pub initial_mass: f64,
    /// `Σ h·Δx` of the last published state, m².
    pub final_mass: f64,
    /// Samples the sink accepted.
    pub samples_emitted: u64,
    /// Samples the sink rejected.
    pub sink_rejections: u64,
    /// Whether the loop stopped on a cancellation request.
    pub cancelled: bool,
}

impl RunReport {
    /// Relative change in mass over the run.
    pub fn relative_mass_drift(&self) -> f64 {
        (self.final_mass - self.initial_mass) / self.initial_mass
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} after {} steps at t = {:.6} s (mass drift {:+.3e}, {} samples, {} rejected)",
            self.status,
            self.steps,
            self.final_time,
            self.relative_mass_drift(),
            self.samples_emitted,
            self.sink_rejections
        )?;
        if let Some(failure) = &self.failure {
            write!(f, ": {failure}")?;
        }
        if self.cancelled {
            write!(f, " [cancelled]")?;
        }
        Ok(())
    }
}
