//! Scalar numerics for open-channel hydraulics.
//!
//! These are collaborators of the solver, not part of it: building
//! initial conditions, checking results, and post-processing samples.
//!
//! - [`root`]: bracketed bisection and Newton-Raphson
//! - [`quadrature`]: trapezoid rule over sampled series
//! - [`ode`]: fixed-step Euler and RK4 marching of `dy/dx = f(x, y)`
//! - [`manning`]: uniform flow in a rectangular channel
//! - [`gvf`]: gradually-varied-flow backwater profiles

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod gvf;
pub mod manning;
pub mod ode;
pub mod quadrature;
pub mod root;

pub use error::NumericsError;
pub use gvf::backwater_profile;
pub use manning::RectangularChannel;
pub use ode::{march, Method};
pub use quadrature::{flood_volume, trapezoid};
pub use root::{bisection, newton};
