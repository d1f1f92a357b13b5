//! Reusable scenario fixtures.
//!
//! - [`reference_dam_break`]: the 1 km, 101-node, 5 m | 1 m closed reach.
//! - [`small_dam_break`]: same shape on a coarser, shorter run.
//! - [`still_water`]: constant depth at rest, open at both ends.
//! - [`bore_toward_right_wall`]: a raised, right-moving slab next to a wall.
//! - [`pulse_toward_right_wall`]: a smooth right-running hump that reflects off a wall.

use weir_engine::{DamBreak, FlowState, InitialCondition, SimulationConfig};
use weir_scheme::{BoundaryCondition, BoundaryPair};

/// 1000 m reach, 101 nodes, gate at 500 m, 5 m upstream and 1 m
/// downstream at rest, g = 9.81, C = 0.5, walls at both ends, 60 s.
pub fn reference_dam_break() -> SimulationConfig {
    let mut config = SimulationConfig::new(
        1000.0,
        101,
        60.0,
        InitialCondition::DamBreak(DamBreak {
            gate_position: 500.0,
            left: FlowState::still(5.0),
            right: FlowState::still(1.0),
        }),
    );
    config.gravity = 9.81;
    config.courant = 0.5;
    config.boundaries = BoundaryPair::closed();
    config
}

/// Closed 100 m dam break with `node_count` nodes, 2 m | 1 m, `t_end` seconds.
pub fn small_dam_break(node_count: usize, t_end: f64) -> SimulationConfig {
    SimulationConfig::new(
        100.0,
        node_count,
        t_end,
        InitialCondition::DamBreak(DamBreak {
            gate_position: 50.0,
            left: FlowState::still(2.0),
            right: FlowState::still(1.0),
        }),
    )
}

/// Constant depth at rest with transmissive ends.
pub fn still_water(node_count: usize, depth: f64, t_end: f64) -> SimulationConfig {
    let mut config = SimulationConfig::new(
        node_count as f64 - 1.0,
        node_count,
        t_end,
        InitialCondition::Explicit {
            depth: vec![depth; node_count],
            velocity: vec![0.0; node_count],
        },
    );
    config.boundaries = BoundaryPair::open();
    config
}

/// 200 m reach, 201 nodes, 1 m deep at rest except a 1.5 m slab moving
/// right at 1 m/s between 120 m and 150 m. Transmissive on the left,
/// a wall on the right.
pub fn bore_toward_right_wall(t_end: f64) -> SimulationConfig {
    let node_count = 201;
    let (depth, velocity): (Vec<f64>, Vec<f64>) = (0..node_count)
        .map(|j| {
            let x = j as f64;
            if (120.0..=150.0).contains(&x) {
                (1.5, 1.0)
            } else {
                (1.0, 0.0)
            }
        })
        .unzip();
    let mut config = SimulationConfig::new(
        200.0,
        node_count,
        t_end,
        InitialCondition::Explicit { depth, velocity },
    );
    config.boundaries = BoundaryPair::new(
        BoundaryCondition::Transmissive,
        BoundaryCondition::Reflective,
    );
    config
}

/// Rest depth under [`pulse_toward_right_wall`], metres.
pub const PULSE_REST_DEPTH: f64 = 1.0;

/// 200 m reach, 201 nodes, 1 m deep with a Gaussian hump of 0.1 m
/// (width 15 m) centred at 70 m.
///
/// The velocity keeps the backward Riemann invariant `u - 2 sqrt(g h)`
/// constant, so the hump runs right as a single simple wave and meets
/// the right wall at roughly 40 s. Transmissive on the left, a wall on
/// the right.
pub fn pulse_toward_right_wall(t_end: f64) -> SimulationConfig {
    let node_count = 201;
    let g = SimulationConfig::DEFAULT_GRAVITY;
    let (depth, velocity): (Vec<f64>, Vec<f64>) = (0..node_count)
        .map(|j| {
            let x = j as f64;
            let h = PULSE_REST_DEPTH + 0.1 * (-((x - 70.0) / 15.0).powi(2) / 2.0).exp();
            let u = 2.0 * ((g * h).sqrt() - (g * PULSE_REST_DEPTH).sqrt());
            (h, u)
        })
        .unzip();
    let mut config = SimulationConfig::new(
        200.0,
        node_count,
        t_end,
        InitialCondition::Explicit { depth, velocity },
    );
    config.boundaries = BoundaryPair::new(
        BoundaryCondition::Transmissive,
        BoundaryCondition::Reflective,
    );
    config
}
