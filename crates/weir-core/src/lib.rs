//! Core types and traits for the Weir shallow-water solver.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the abstractions shared across the workspace: step identifiers, the
//! run state machine's status, the error taxonomy, and the traits through
//! which published states are read and handed to snapshot sinks.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod status;
pub mod traits;

pub use error::{
    ConfigError, FailureRecord, NumericalInstability, Quantity, SinkError, StepError,
};
pub use id::{Side, StepId};
pub use status::RunStatus;
pub use traits::{SnapshotSink, StateView};
