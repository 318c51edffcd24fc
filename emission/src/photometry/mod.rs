//! Photometry models and utilities

pub mod color;
pub mod frame;
pub mod grid;
pub mod planck;

pub use color::{plasma, temperature_color};
pub use frame::{compute_spectral_frame, SpectralFrame};
pub use grid::WavelengthGrid;
pub use planck::{occupation_number, planck_radiance, wien_peak_nm};
