//! Numerical building blocks of the Weir shallow-water solver.
//!
//! Each step of the explicit scheme is assembled from four pieces,
//! all of which read the published state and write only to the
//! staging buffer:
//!
//! - [`CflController`]: largest stable `dt` from the maximum signal speed
//! - [`FluxEvaluator`]: per-node flux `(hu, hu·u + ½gh²)`
//! - [`LaxFriedrichs`]: interior update by neighbour averaging plus
//!   centred flux difference
//! - [`BoundaryCondition`]: fills the two edge nodes
//!
//! The per-node loops never read the buffer they write, so the interior
//! update has no cross-node hazards.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod cfl;
pub mod flux;
pub mod lax_friedrichs;

pub use boundary::{BoundaryCondition, BoundaryPair};
pub use cfl::{CflController, StableStep, WaveSpeed};
pub use flux::{Flux, FluxEvaluator};
pub use lax_friedrichs::LaxFriedrichs;
