//! Time-stepping driver: the single-threaded simulation loop.
//!
//! [`Simulation`] owns both state buffers, the simulated time and the
//! run status. Each [`step()`](Simulation::step) runs the full explicit
//! sequence against the published buffer and publishes the result:
//!
//! ```text
//! (a) CFL dt from current      ─┐ instability ─▶ Failed
//! (b) fluxes from current      ─┘
//! (c) Lax-Friedrichs interior ─▶ staging
//! (d) boundary policies       ─▶ staging edges
//! (e) publish (swap), (f) t += dt
//! (g) t >= t_end - tol        ─▶ Completed
//! ```
//!
//! # Ownership model
//!
//! `Simulation` is [`Send`] but needs no [`Sync`]. All mutating methods
//! take `&mut self`, and [`snapshot()`](Simulation::snapshot) borrows from
//! `self`, so no step can run while a borrowed view is alive.

use std::time::Instant;

use weir_arena::{OwnedSnapshot, PingPongState, Snapshot};
use weir_core::{
    ConfigError, FailureRecord, NumericalInstability, RunStatus, SinkError, SnapshotSink,
    StepError, StepId,
};
use weir_grid::Grid;
use weir_scheme::{BoundaryPair, CflController, Flux, FluxEvaluator, LaxFriedrichs, StableStep};

use crate::cancel::CancelToken;
use crate::config::SimulationConfig;
use crate::metrics::StepMetrics;
use crate::report::RunReport;
use crate::sampling::Sampler;

// Compile-time assertion: Simulation is Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Simulation>();
    }
};

// ── StepOutcome ────────────────────────────────────────────────────

/// Result of a successful step.
#[derive(Clone, Debug, PartialEq)]
pub struct StepOutcome {
    /// Id of the newly published state.
    pub step_id: StepId,
    /// Simulated time of the newly published state, seconds.
    pub time: f64,
    /// Status after the step (`Running` or `Completed`).
    pub status: RunStatus,
    /// Metrics for this step.
    pub metrics: StepMetrics,
}

// ── Simulation ─────────────────────────────────────────────────────

/// A single dam-break run.
///
/// Created from a [`SimulationConfig`] via [`new()`](Simulation::new).
/// Drive it one step at a time with [`step()`](Simulation::step), or to
/// the end with [`run()`](Simulation::run).
///
/// # Example
///
/// ```
/// use weir_engine::{DamBreak, FlowState, InitialCondition, Simulation, SimulationConfig};
/// use weir_engine::sink::VecSink;
/// use weir_core::RunStatus;
///
/// let config = SimulationConfig::new(
///     100.0,
///     21,
///     2.0,
///     InitialCondition::DamBreak(DamBreak {
///         gate_position: 50.0,
///         left: FlowState::still(2.0),
///         right: FlowState::still(1.0),
///     }),
/// );
/// let mut sim = Simulation::new(config).unwrap();
/// let report = sim.run(&mut VecSink::new(), None);
/// assert_eq!(report.status, RunStatus::Completed);
/// assert_eq!(report.final_time, 2.0);
/// ```
pub struct Simulation {
    config: SimulationConfig,
    grid: Grid,
    arena: PingPongState,
    flux: FluxEvaluator,
    cfl: CflController,
    boundaries: BoundaryPair,
    fluxes: Vec<Flux>,
    tolerance: f64,
    sampler: Sampler,
    status: RunStatus,
    failure: Option<FailureRecord>,
    budget_exhausted: bool,
    initial_mass: f64,
    last_metrics: StepMetrics,
}

impl Simulation {
    /// Validate `config` and build the `t = 0` state.
    ///
    /// Boundary policies are applied to the initial state so the edge
    /// nodes are consistent before the first step.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        let (grid, mut initial) = config.validated_state()?;
        config.boundaries.apply(&mut initial);

        let flux = FluxEvaluator::new(config.gravity)?;
        let cfl = CflController::new(config.gravity, config.courant, grid.spacing())?;
        let tolerance = 1e-9 * config.t_end.max(1.0);
        let initial_mass = initial.mass(grid.spacing());

        log::debug!(
            "simulation built: {} nodes, dx = {} m, t_end = {} s, boundaries {} | {}",
            grid.node_count(),
            grid.spacing(),
            config.t_end,
            config.boundaries.left,
            config.boundaries.right
        );

        Ok(Self {
            arena: PingPongState::new(initial, grid.spacing()),
            fluxes: Vec::with_capacity(grid.node_count()),
            boundaries: config.boundaries,
            sampler: Sampler::new(config.cadence, tolerance),
            grid,
            flux,
            cfl,
            tolerance,
            status: RunStatus::Initialized,
            failure: None,
            budget_exhausted: false,
            initial_mass,
            last_metrics: StepMetrics::default(),
            config,
        })
    }

    /// Advance one CFL-limited step.
    ///
    /// # Errors
    ///
    /// - [`StepError::Terminal`] if the run already completed or failed.
    /// - [`StepError::StepBudgetExhausted`] if `max_steps` was reached;
    ///   the run is now `Failed`.
    /// - [`StepError::Instability`] if the published state failed the
    ///   pre-step scan; the run is now `Failed`. The published state is
    ///   left as is, so [`snapshot()`](Self::snapshot) shows the state that
    ///   failed, and the [`FailureRecord`] names its node and bad value.
    ///   The state published before it is the last one that passed.
    pub fn step(&mut self) -> Result<StepOutcome, StepError> {
        self.advance(None)
    }

    /// Advance one step with a caller-chosen `dt` instead of the CFL bound.
    ///
    /// `dt` is still clamped to the remaining time and the published state
    /// is still scanned first. A `dt` above the CFL bound is accepted:
    /// the resulting blow-up is detected by a later step's scan.
    pub fn step_with_dt(&mut self, dt: f64) -> Result<StepOutcome, StepError> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(StepError::InvalidTimeStep { dt });
        }
        self.advance(Some(dt))
    }

    fn advance(&mut self, forced_dt: Option<f64>) -> Result<StepOutcome, StepError> {
        if self.status.is_terminal() {
            return Err(StepError::Terminal(self.status));
        }
        if let Some(max) = self.config.max_steps {
            let steps = self.arena.step_id().0;
            if steps >= max {
                self.status = RunStatus::Failed;
                self.budget_exhausted = true;
                log::error!(
                    "step budget of {max} exhausted at t = {} s (t_end = {} s)",
                    self.arena.time(),
                    self.config.t_end
                );
                return Err(StepError::StepBudgetExhausted { steps });
            }
        }
        let step_start = Instant::now();
        self.status = RunStatus::Running;
        let remaining = self.config.t_end - self.arena.time();

        // (a) CFL step from the pre-update state.
        let cfl_start = Instant::now();
        let stable: StableStep = match self.cfl.stable_dt(self.arena.current(), remaining) {
            Ok(stable) => stable,
            Err(instability) => return Err(self.fail(instability)),
        };
        let dt = forced_dt.map_or(stable.dt, |dt| dt.min(remaining));
        let cfl_us = cfl_start.elapsed().as_micros() as u64;

        // (b) Fluxes from the pre-update state.
        let flux_start = Instant::now();
        if let Err(instability) = self.flux.evaluate(self.arena.current(), &mut self.fluxes) {
            return Err(self.fail(instability));
        }
        let flux_us = flux_start.elapsed().as_micros() as u64;

        // (c)-(f) Interior, edges, publish.
        let spacing = self.grid.spacing();
        let fluxes = &self.fluxes;
        let boundaries = &self.boundaries;
        let mut update_us = 0;
        let mut boundary_us = 0;
        self.arena.advance(dt, |guard| {
            let update_start = Instant::now();
            LaxFriedrichs::update_interior(guard.previous, fluxes, dt, spacing, guard.next);
            update_us = update_start.elapsed().as_micros() as u64;

            let boundary_start = Instant::now();
            boundaries.apply(guard.next);
            boundary_us = boundary_start.elapsed().as_micros() as u64;
        });

        // (g) Completion within tolerance lands exactly on t_end.
        if self.arena.time() >= self.config.t_end - self.tolerance {
            self.arena.set_time(self.config.t_end);
            self.status = RunStatus::Completed;
        }

        self.last_metrics = StepMetrics {
            dt,
            max_wave_speed: stable.wave.speed,
            wave_speed_node: stable.wave.node,
            forced_dt: forced_dt.is_some(),
            total_us: step_start.elapsed().as_micros() as u64,
            cfl_us,
            flux_us,
            update_us,
            boundary_us,
        };

        log::trace!(
            "step {}: dt = {:.6e} s, t = {:.6} s, max speed {:.4} m/s at node {}",
            self.arena.step_id(),
            dt,
            self.arena.time(),
            stable.wave.speed,
            stable.wave.node
        );

        Ok(StepOutcome {
            step_id: self.arena.step_id(),
            time: self.arena.time(),
            status: self.status,
            metrics: self.last_metrics.clone(),
        })
    }

    /// Move to `Failed`, recording where and when.
    fn fail(&mut self, instability: NumericalInstability) -> StepError {
        let record = FailureRecord {
            step: self.arena.step_id().next(),
            time: self.arena.time(),
            instability,
        };
        log::error!("{record}");
        self.status = RunStatus::Failed;
        self.failure = Some(record);
        StepError::Instability(record)
    }

    /// Step until a terminal status or a cancellation request.
    ///
    /// If the run has not started and the cadence samples at all, the
    /// `t = 0` state is offered first. After each step the published state
    /// is offered when due, and the final state is always offered on
    /// completion. Sink rejections are counted and logged, never retried,
    /// and never fail the run. Cancellation is observed only between steps.
    ///
    /// A state is only scanned when the next step starts, so on an
    /// instability the failing state may already have been offered to
    /// `sink`. Check [`RunReport::failure`] before trusting the last sample.
    pub fn run<S>(&mut self, sink: &mut S, cancel: Option<&CancelToken>) -> RunReport
    where
        S: SnapshotSink + ?Sized,
    {
        let mut tally = SinkTally::default();
        log::info!(
            "run starting at t = {} s toward t_end = {} s",
            self.arena.time(),
            self.config.t_end
        );

        if self.status == RunStatus::Initialized && self.sampler.samples_initial() {
            self.offer(sink, &mut tally);
        }

        let mut cancelled = false;
        while !self.status.is_terminal() {
            if cancel.is_some_and(CancelToken::is_cancelled) {
                log::warn!(
                    "run cancelled after {} steps at t = {} s",
                    self.arena.step_id(),
                    self.arena.time()
                );
                cancelled = true;
                break;
            }
            match self.step() {
                Ok(outcome) => {
                    let due = self.sampler.due(outcome.step_id, outcome.time);
                    if due || outcome.status == RunStatus::Completed {
                        self.offer(sink, &mut tally);
                    }
                }
                Err(_) => break,
            }
        }

        let report = self.report(tally, cancelled);
        match report.status {
            RunStatus::Failed => log::error!("run failed: {report}"),
            _ => log::info!("run finished: {report}"),
        }
        report
    }

    fn offer<S>(&self, sink: &mut S, tally: &mut SinkTally)
    where
        S: SnapshotSink + ?Sized,
    {
        match sink.accept(&self.arena.snapshot()) {
            Ok(()) => tally.emitted += 1,
            Err(err) => {
                tally.rejected += 1;
                match err {
                    SinkError::Backpressure => log::warn!(
                        "sink rejected step {} (t = {} s): {err}",
                        self.arena.step_id(),
                        self.arena.time()
                    ),
                    _ => log::warn!("sink error at step {}: {err}", self.arena.step_id()),
                }
            }
        }
    }

    fn report(&self, tally: SinkTally, cancelled: bool) -> RunReport {
        RunReport {
            status: self.status,
            steps: self.arena.step_id().0,
            final_time: self.arena.time(),
            failure: self.failure,
            budget_exhausted: self.budget_exhausted,
            initial_mass: self.initial_mass,
            final_mass: self.mass(),
            samples_emitted: tally.emitted,
            sink_rejections: tally.rejected,
            cancelled,
        }
    }

    // ── Accessors ──────────────────────────────────────────────────

    /// Borrowed view of the published state.
    pub fn snapshot(&self) -> Snapshot<'_> {
        self.arena.snapshot()
    }

    /// Owned copy of the published state.
    pub fn owned_snapshot(&self) -> OwnedSnapshot {
        self.arena.owned_snapshot()
    }

    /// Current run status.
    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Simulated time of the published state, seconds.
    pub fn time(&self) -> f64 {
        self.arena.time()
    }

    /// Id of the published state.
    pub fn step_id(&self) -> StepId {
        self.arena.step_id()
    }

    /// Failure record, if the run failed on an instability.
    pub fn failure(&self) -> Option<&FailureRecord> {
        self.failure.as_ref()
    }

    /// Metrics from the most recent successful step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// The grid of this run.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The configuration this run was built from.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// `Σ h·Δx` of the published state, m².
    pub fn mass(&self) -> f64 {
        self.arena.current().mass(self.grid.spacing())
    }

    /// `Σ h·Δx` of the `t = 0` state, m².
    pub fn initial_mass(&self) -> f64 {
        self.initial_mass
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct SinkTally {
    emitted: u64,
    rejected: u64,
}
