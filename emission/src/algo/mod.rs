//! Numeric helpers shared by the spectrum model
//!
//! Sampling, interpolation and integration over wavelength grids.

pub mod sampling;
pub mod trapezoid;

pub use sampling::{interp, linspace, logspace, InterpError};
pub use trapezoid::{trap_integrate_samples, TrapezoidError};
