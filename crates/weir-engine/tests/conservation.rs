//! Integration test: steady states, mass balance and mirror symmetry.
//!
//! With walls at both ends the interior sum `Σ_{1..n-2} h` is conserved
//! by the update, so the total mass can only move through the two edge
//! nodes. These tests check that balance, that it tightens under grid
//! refinement, and that lake-at-rest and mirror-symmetric states stay so.

use weir_core::{RunStatus, StateView};
use weir_engine::{
    DamBreak, FlowState, InitialCondition, SampleCadence, Simulation, SimulationConfig, VecSink,
};
use weir_scheme::{BoundaryCondition, BoundaryPair};
use weir_test_utils::fixtures::{reference_dam_break, still_water};
use weir_test_utils::{max_abs_diff, total_mass};

// ── Helpers ─────────────────────────────────────────────────────

/// Largest mass change the edge nodes alone can explain.
fn edge_bound(initial: &dyn StateView, last: &dyn StateView) -> f64 {
    let n = initial.node_count();
    let dh_left = (last.depth()[0] - initial.depth()[0]).abs();
    let dh_right = (last.depth()[n - 1] - initial.depth()[n - 1]).abs();
    (dh_left + dh_right) * initial.spacing()
}

fn closed_dam_break(node_count: usize) -> SimulationConfig {
    SimulationConfig::new(
        100.0,
        node_count,
        30.0,
        InitialCondition::DamBreak(DamBreak {
            gate_position: 35.0,
            left: FlowState::still(2.0),
            right: FlowState::still(1.0),
        }),
    )
}

// ── Lake at rest ────────────────────────────────────────────────

#[test]
fn still_water_is_exactly_steady() {
    for boundaries in [
        BoundaryPair::open(),
        BoundaryPair::closed(),
        BoundaryPair::new(
            BoundaryCondition::Fixed {
                depth: 1.25,
                velocity: 0.0,
            },
            BoundaryCondition::Reflective,
        ),
    ] {
        let mut config = still_water(51, 1.25, 20.0);
        config.boundaries = boundaries;
        let mut sim = Simulation::new(config).unwrap();
        let before = sim.owned_snapshot();

        let report = sim.run(&mut VecSink::new(), None);
        assert_eq!(report.status, RunStatus::Completed);
        assert!(report.steps > 0);

        let after = sim.snapshot();
        assert_eq!(after.depth(), before.depth());
        assert!(after.discharge().iter().all(|&q| q == 0.0));
        assert_eq!(report.final_mass, report.initial_mass);
    }
}

// ── Mass balance ────────────────────────────────────────────────

#[test]
fn closed_reach_mass_moves_only_through_edges() {
    let mut sim = Simulation::new(closed_dam_break(101)).unwrap();
    let initial = sim.owned_snapshot();
    let report = sim.run(&mut VecSink::new(), None);
    assert_eq!(report.status, RunStatus::Completed);

    let last = sim.owned_snapshot();
    let drift = (report.final_mass - report.initial_mass).abs();
    assert!(
        drift <= edge_bound(&initial, &last) + 1e-9 * report.initial_mass,
        "drift {drift} exceeds edge bound {}",
        edge_bound(&initial, &last)
    );
    assert!((total_mass(&last) - report.final_mass).abs() < 1e-9);
}

#[test]
fn mass_drift_bound_shrinks_under_refinement() {
    let bound = |node_count: usize| {
        let mut sim = Simulation::new(closed_dam_break(node_count)).unwrap();
        let initial = sim.owned_snapshot();
        let report = sim.run(&mut VecSink::new(), None);
        assert_eq!(report.status, RunStatus::Completed);
        let last = sim.owned_snapshot();
        let drift = (report.final_mass - report.initial_mass).abs();
        let bound = edge_bound(&initial, &last);
        assert!(drift <= bound + 1e-9 * report.initial_mass);
        bound / report.initial_mass
    };
    let coarse = bound(51);
    let fine = bound(401);
    assert!(fine < coarse, "fine {fine} vs coarse {coarse}");
}

#[test]
fn reference_run_mass_drift_is_small() {
    let mut sim = Simulation::new(reference_dam_break()).unwrap();
    let report = sim.run(&mut VecSink::new(), None);
    assert_eq!(report.status, RunStatus::Completed);
    assert!(report.relative_mass_drift().abs() < 1e-2);
}

// ── Symmetry ────────────────────────────────────────────────────

#[test]
fn symmetric_hump_between_walls_stays_symmetric() {
    let n = 101;
    let (depth, velocity): (Vec<f64>, Vec<f64>) = (0..n)
        .map(|j| {
            let offset = (j as f64 - 50.0).abs();
            (if offset <= 10.0 { 1.5 } else { 1.0 }, 0.0)
        })
        .unzip();
    let mut config =
        SimulationConfig::new(100.0, n, 40.0, InitialCondition::Explicit { depth, velocity });
    config.cadence = SampleCadence::Interval(5.0);

    let mut sim = Simulation::new(config).unwrap();
    let mut sink = VecSink::new();
    let report = sim.run(&mut sink, None);
    assert_eq!(report.status, RunStatus::Completed);
    assert!(sink.len() >= 8);

    for frame in sink.frames() {
        let h = frame.depth();
        let q = frame.discharge();
        let h_mirror: Vec<f64> = h.iter().rev().copied().collect();
        let q_mirror: Vec<f64> = q.iter().rev().map(|v| -v).collect();
        assert!(max_abs_diff(h, &h_mirror) < 1e-12, "t = {}", frame.time());
        assert!(max_abs_diff(q, &q_mirror) < 1e-12, "t = {}", frame.time());
    }
}
