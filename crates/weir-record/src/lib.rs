//! Snapshot recording and determinism checks for Weir simulations.
//!
//! # Architecture
//!
//! - [`ColumnarWriter`] streams sampled states as comma-separated text
//!   to any `Write` sink, and is itself a [`SnapshotSink`](weir_core::SnapshotSink)
//! - [`read_columnar`] parses the text back into [`Frame`]s
//! - [`snapshot_hash`] and [`compare_runs`] verify that two runs agree
//!
//! # Format
//!
//! ```text
//! time,position,depth,velocity
//! 0,0,5,0
//! 0,10,5,0
//! ...
//! ```
//!
//! One row per node per sample, SI units (s, m, m, m/s). Values are
//! written in Rust's shortest round-trip `f64` form, so reading a file
//! back yields bit-identical numbers.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod compare;
pub mod error;
pub mod hash;
pub mod reader;
pub mod writer;

pub use compare::{compare_runs, compare_snapshot, Divergence, DivergenceKind};
pub use error::RecordError;
pub use hash::{run_hash, snapshot_hash};
pub use reader::{read_columnar, Frame};
pub use writer::ColumnarWriter;

/// Header line of every columnar file.
pub const HEADER: &str = "time,position,depth,velocity";
