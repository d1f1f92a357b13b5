//! Time-stepping driver and run orchestration for Weir simulations.
//!
//! Provides [`Simulation`], which owns the double-buffered state and
//! advances it with the Lax-Friedrichs scheme under a CFL time step,
//! together with the configuration, sampling, sink and cancellation
//! plumbing around a run.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cancel;
pub mod config;
pub mod driver;
pub mod metrics;
pub mod report;
pub mod sampling;
pub mod scenario;
pub mod sink;

pub use cancel::CancelToken;
pub use config::{DamBreak, FlowState, InitialCondition, SimulationConfig};
pub use driver::{Simulation, StepOutcome};
pub use metrics::StepMetrics;
pub use report::RunReport;
pub use sampling::SampleCadence;
pub use scenario::{parse_scenario, to_scenario, ScenarioError};
pub use sink::{ChannelSink, NullSink, VecSink};
