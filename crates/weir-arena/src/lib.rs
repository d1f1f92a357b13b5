//! Double-buffered state storage for Weir simulations.
//!
//! A run holds exactly two [`State`] buffers of equal length. One is
//! published (the "current" time level); the other is the staging target
//! for the step in progress. Publishing swaps an index, never copies.
//!
//! ```text
//! PingPongState (orchestrator)
//! ├── State × 2 (alternating published/staging)
//! │   ├── h:  Vec<f64>   depth, m
//! │   └── hu: Vec<f64>   discharge per unit width, m²/s
//! ├── time, StepId of the published buffer
//! └── StepGuard (split borrow: &published, &mut staging)
//! ```
//!
//! Readers go through [`Snapshot`] (borrowed) or [`OwnedSnapshot`]
//! (copied out, `Send`), both of which implement
//! [`StateView`](weir_core::StateView).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod pingpong;
pub mod read;
pub mod state;

pub use pingpong::{PingPongState, StepGuard};
pub use read::{OwnedSnapshot, Snapshot};
pub use state::State;
