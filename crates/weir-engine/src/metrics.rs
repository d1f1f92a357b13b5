//! Per-step performance and stability metrics.
//!
//! [`StepMetrics`] captures the time step, the signal speed that bounded
//! it, and wall-clock timings for each phase of a single step.

/// Metrics collected during a single step.
///
/// All durations are in microseconds. The driver populates these after
/// each successful step; read them from
/// [`Simulation::last_metrics()`](crate::Simulation::last_metrics) or the
/// returned [`StepOutcome`](crate::StepOutcome).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// Time step taken, seconds.
    pub dt: f64,
    /// Maximum signal speed of the pre-update state, m/s.
    pub max_wave_speed: f64,
    /// Node at which the maximum signal speed occurred.
    pub wave_speed_node: usize,
    /// Whether `dt` was caller-forced rather than CFL-derived.
    pub forced_dt: bool,
    /// Wall-clock time for the entire step.
    pub total_us: u64,
    /// Time spent computing the CFL step.
    pub cfl_us: u64,
    /// Time spent evaluating fluxes.
    pub flux_us: u64,
    /// Time spent in the interior update.
    pub update_us: u64,
    /// Time spent filling boundary nodes.
    pub boundary_us: u64,
}

impl StepMetrics {
    /// Courant number actually used, `dt · max_wave_speed / Δx`.
    pub fn courant_number(&self, spacing: f64) -> f64 {
        self.dt * self.max_wave_speed / spacing
    }
}
