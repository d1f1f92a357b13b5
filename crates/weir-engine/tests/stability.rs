//! Integration test: the CFL bound, instability detection and what the
//! driver leaves published after a failure.

use weir_core::{Quantity, RunStatus, StateView, StepError};
use weir_engine::{SampleCadence, Simulation, VecSink};
use weir_record::snapshot_hash;
use weir_test_utils::fixtures::small_dam_break;

// ── Helpers ─────────────────────────────────────────────────────

/// A dt at `factor` times the Courant-one limit of the initial state.
fn courant_multiple(sim: &Simulation, factor: f64) -> f64 {
    let snap = sim.snapshot();
    let g = sim.config().gravity;
    let speed = snap
        .depth()
        .iter()
        .zip(snap.discharge())
        .map(|(h, q)| (q / h).abs() + (g * h).sqrt())
        .fold(0.0, f64::max);
    factor * snap.spacing() / speed
}

// ── CFL ─────────────────────────────────────────────────────────

#[test]
fn cfl_limited_run_completes() {
    let mut config = small_dam_break(101, 20.0);
    config.cadence = SampleCadence::EveryStep;
    let mut sim = Simulation::new(config).unwrap();
    let mut sink = VecSink::new();
    let report = sim.run(&mut sink, None);

    assert_eq!(report.status, RunStatus::Completed);
    assert!(report.failure.is_none());
    for frame in sink.frames() {
        assert!(frame.depth().iter().all(|h| h.is_finite() && *h > 0.0));
    }
}

#[test]
fn cfl_steps_respect_courant_number() {
    let mut sim = Simulation::new(small_dam_break(101, 5.0)).unwrap();
    let spacing = sim.grid().spacing();
    while sim.status() != RunStatus::Completed {
        let outcome = sim.step().unwrap();
        assert!(!outcome.metrics.forced_dt);
        assert!(outcome.metrics.courant_number(spacing) <= 0.5 + 1e-12);
    }
}

#[test]
fn oversized_dt_blows_up() {
    let mut config = small_dam_break(101, 10_000.0);
    config.cadence = SampleCadence::EveryStep;
    let mut sim = Simulation::new(config).unwrap();
    let dt = courant_multiple(&sim, 4.0);

    let mut failure = None;
    for _ in 0..1000 {
        if let Err(err) = sim.step_with_dt(dt) {
            failure = Some(err);
            break;
        }
    }
    assert!(
        matches!(failure, Some(StepError::Instability(_))),
        "expected instability, got {failure:?}"
    );
    assert_eq!(sim.status(), RunStatus::Failed);
}

#[test]
fn same_dt_below_courant_one_stays_stable() {
    let mut sim = Simulation::new(small_dam_break(101, 10_000.0)).unwrap();
    let dt = courant_multiple(&sim, 0.4);
    for _ in 0..300 {
        sim.step_with_dt(dt).unwrap();
    }
    assert_eq!(sim.status(), RunStatus::Running);
    assert!(sim.snapshot().depth().iter().all(|h| h.is_finite() && *h > 0.0));
}

// ── Failure semantics ───────────────────────────────────────────

#[test]
fn failure_record_names_the_published_bad_state() {
    let mut sim = Simulation::new(small_dam_break(101, 10_000.0)).unwrap();
    let dt = courant_multiple(&sim, 4.0);

    let mut history = vec![sim.owned_snapshot()];
    let record = loop {
        match sim.step_with_dt(dt) {
            Ok(_) => history.push(sim.owned_snapshot()),
            Err(StepError::Instability(record)) => break record,
            Err(other) => panic!("unexpected error {other}"),
        }
        assert!(history.len() < 1000, "run never failed");
    };

    // The state that failed the scan is still the published one.
    let last = history.last().unwrap();
    assert_eq!(snapshot_hash(&sim.snapshot()), snapshot_hash(last));
    assert_eq!(record.step, last.step_id().next());
    assert_eq!(record.time, last.time());
    assert_eq!(sim.failure(), Some(&record));

    // A dry-out under the oversized step: negative depth at a named node.
    assert_eq!(record.instability.quantity, Quantity::Depth);
    assert!(record.instability.value <= 0.0, "{record}");
    let node = record.instability.node.expect("depth failures name a node");
    assert_eq!(
        last.depth()[node].to_bits(),
        record.instability.value.to_bits()
    );
    assert!(last.depth().iter().any(|h| !(h.is_finite() && *h > 0.0)));

    // Every earlier state passed.
    assert!(history[..history.len() - 1]
        .iter()
        .all(|s| s.depth().iter().all(|h| h.is_finite() && *h > 0.0)));

    assert!(matches!(sim.step(), Err(StepError::Terminal(RunStatus::Failed))));
    assert_eq!(snapshot_hash(&sim.snapshot()), snapshot_hash(last));
}

#[test]
fn samples_before_failure_remain_valid() {
    let mut config = small_dam_break(41, 10_000.0);
    config.cadence = SampleCadence::EveryStep;
    config.max_steps = Some(25);
    let mut sim = Simulation::new(config).unwrap();
    let mut sink = VecSink::new();
    let report = sim.run(&mut sink, None);

    assert_eq!(report.status, RunStatus::Failed);
    assert!(report.budget_exhausted);
    assert!(report.failure.is_none());
    assert_eq!(report.steps, 25);
    // t = 0 plus one sample per step.
    assert_eq!(sink.len(), 26);
    let frames = sink.frames();
    assert!(frames.windows(2).all(|w| w[1].time() > w[0].time()));
    assert_eq!(frames.last().unwrap().time(), report.final_time);
}
