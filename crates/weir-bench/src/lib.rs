//! Benchmark profiles for the Weir solver.
//!
//! - [`reference_profile`]: the 1 km, 101-node closed dam break, 60 s
//! - [`stress_profile`]: the same reach at a chosen resolution, open
//!   downstream so the run never piles water against a wall

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use weir_engine::{DamBreak, FlowState, InitialCondition, SimulationConfig};
use weir_scheme::{BoundaryCondition, BoundaryPair};

fn dam_break(node_count: usize, t_end: f64) -> SimulationConfig {
    SimulationConfig::new(
        1000.0,
        node_count,
        t_end,
        InitialCondition::DamBreak(DamBreak {
            gate_position: 500.0,
            left: FlowState::still(5.0),
            right: FlowState::still(1.0),
        }),
    )
}

/// 1000 m reach, 101 nodes, 5 m | 1 m at 500 m, walls at both ends, 60 s.
pub fn reference_profile() -> SimulationConfig {
    dam_break(101, 60.0)
}

/// 1000 m dam break on `node_count` nodes with a transmissive right end.
///
/// `t_end` is long enough that benchmarks stepping a fixed number of
/// times never reach completion.
pub fn stress_profile(node_count: usize) -> SimulationConfig {
    let mut config = dam_break(node_count, 1.0e6);
    config.boundaries = BoundaryPair::new(
        BoundaryCondition::Reflective,
        BoundaryCondition::Transmissive,
    );
    config
}
