//! Integration test: a backwater profile as the initial condition.
//!
//! A subcritical profile computed by `weir_numerics` seeds the solver,
//! which then advances it with open ends.

use weir::numerics::{backwater_profile, flood_volume, RectangularChannel};
use weir::prelude::*;
use weir::record::{read_columnar, snapshot_hash};

const G: f64 = 9.81;

fn profile_config() -> SimulationConfig {
    let channel = RectangularChannel::new(10.0, 0.001, 0.03).unwrap();
    let q = channel.discharge(2.0);
    let profile = backwater_profile(&channel, q, G, 3.0, 1000.0, 100).unwrap();

    let depth: Vec<f64> = profile.iter().map(|&(_, y)| y).collect();
    let velocity: Vec<f64> = depth.iter().map(|y| q / (10.0 * y)).collect();
    let mut config = SimulationConfig::new(
        1000.0,
        profile.len(),
        30.0,
        InitialCondition::Explicit { depth, velocity },
    );
    config.boundaries = BoundaryPair::open();
    config
}

#[test]
fn profile_builds_a_valid_simulation() {
    let config = profile_config();
    config.validate().unwrap();
    let sim = Simulation::new(config).unwrap();
    let snap = sim.snapshot();
    assert_eq!(snap.node_count(), 101);
    assert!(snap.depth().windows(2).all(|w| w[1] >= w[0]));
}

#[test]
fn profile_run_records_and_reads_back() {
    let mut config = profile_config();
    config.cadence = SampleCadence::Interval(5.0);
    let mut sim = Simulation::new(config).unwrap();
    let mut writer = ColumnarWriter::new(Vec::new()).unwrap();
    let report = sim.run(&mut writer, None);
    assert_eq!(report.status, RunStatus::Completed);

    let bytes = writer.into_inner().unwrap();
    let frames = read_columnar(bytes.as_slice()).unwrap();
    assert_eq!(frames.len(), 7);
    let last = frames.last().unwrap();
    assert_eq!(last.time, 30.0);
    for (a, b) in last.depth.iter().zip(sim.snapshot().depth()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }

    // Discharge through the downstream section over the run, per metre of width.
    let (times, outflow): (Vec<f64>, Vec<f64>) = frames
        .iter()
        .map(|f| (f.time, f.discharge()[f.node_count() - 1]))
        .unzip();
    let volume = flood_volume(&times, &outflow, 0.0).unwrap();
    assert!(volume > 0.0);
}

#[test]
fn reruns_hash_identically() {
    let run = || {
        let mut sim = Simulation::new(profile_config()).unwrap();
        sim.run(&mut VecSink::new(), None);
        snapshot_hash(&sim.snapshot())
    };
    assert_eq!(run(), run());
}
