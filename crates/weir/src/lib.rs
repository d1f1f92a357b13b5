//! Weir: a one-dimensional shallow-water solver for dam-break problems.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Weir sub-crates. For most users, adding `weir` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use weir::prelude::*;
//!
//! // 1 km closed reach, 5 m of water held behind a gate at 500 m.
//! let mut config = SimulationConfig::new(
//!     1000.0,
//!     101,
//!     60.0,
//!     InitialCondition::DamBreak(DamBreak {
//!         gate_position: 500.0,
//!         left: FlowState::still(5.0),
//!         right: FlowState::still(1.0),
//!     }),
//! );
//! config.cadence = SampleCadence::Interval(10.0);
//!
//! let mut sim = Simulation::new(config).unwrap();
//! let mut sink = VecSink::new();
//! let report = sim.run(&mut sink, None);
//!
//! assert_eq!(report.status, RunStatus::Completed);
//! assert_eq!(sim.time(), 60.0);
//! assert_eq!(sink.len(), 7);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `weir-core` | IDs, error taxonomy, `StateView` and `SnapshotSink` |
//! | [`grid`] | `weir-grid` | The uniform 1D node grid |
//! | [`arena`] | `weir-arena` | Conserved state, double buffer, snapshots |
//! | [`scheme`] | `weir-scheme` | Flux, CFL control, Lax-Friedrichs update, boundaries |
//! | [`engine`] | `weir-engine` | Configuration, time-stepping driver, sinks, scenario files |
//! | [`record`] | `weir-record` | Columnar recording, hashing, run comparison |
//! | [`numerics`] | `weir-numerics` | Root finding, quadrature, ODEs, Manning and GVF |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits and errors (`weir-core`).
pub use weir_core as types;

/// The uniform node grid (`weir-grid`).
pub use weir_grid as grid;

/// Conserved-variable state and the ping-pong buffer (`weir-arena`).
///
/// Most users only need [`arena::Snapshot`] and [`arena::OwnedSnapshot`]
/// from this module; both are also in the [`prelude`].
pub use weir_arena as arena;

/// Numerical scheme components (`weir-scheme`).
pub use weir_scheme as scheme;

/// The simulation driver and its configuration (`weir-engine`).
///
/// [`engine::Simulation`] steps a validated [`engine::SimulationConfig`];
/// [`engine::parse_scenario`] builds one from JSON.
pub use weir_engine as engine;

/// Recording and determinism checks (`weir-record`).
pub use weir_record as record;

/// Hydraulic numerics used around the solver (`weir-numerics`).
pub use weir_numerics as numerics;

/// Common imports for typical Weir usage.
///
/// ```rust
/// use weir::prelude::*;
/// ```
pub mod prelude {
    // Snapshots
    pub use weir_arena::{OwnedSnapshot, Snapshot};

    // Core types and traits
    pub use weir_core::{RunStatus, SnapshotSink, StateView, StepId};

    // Errors
    pub use weir_core::{ConfigError, NumericalInstability, SinkError, StepError};

    // Scheme
    pub use weir_scheme::{BoundaryCondition, BoundaryPair};

    // Engine
    pub use weir_engine::{
        CancelToken, ChannelSink, DamBreak, FlowState, InitialCondition, RunReport,
        SampleCadence, Simulation, SimulationConfig, StepMetrics, VecSink,
    };

    // Recording
    pub use weir_record::ColumnarWriter;
}
