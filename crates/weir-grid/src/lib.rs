//! Spatial discretization for Weir simulations.
//!
//! This crate defines [`Grid`], the immutable node lattice of a single
//! channel reach. Every other component reads node spacing from a `Grid`;
//! nothing computes it independently.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod grid;

pub use grid::Grid;
