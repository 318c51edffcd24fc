//! Recovering a source temperature from a measured spectrum
//!
//! Provides a seeded synthetic "measurement" generator, goodness-of-fit
//! metrics, and a one-parameter Planck fit over temperature.

pub mod metrics;
pub mod synthetic;
pub mod temperature;

use thiserror::Error;

pub use metrics::{chi_square, mape, rmse, FitMetrics};
pub use synthetic::{synthesize_measurement, SyntheticMeasurement};
pub use temperature::{fit_temperature, FitConfig, TemperatureFit};

/// Errors that can occur while fitting or scoring a spectrum
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FitError {
    #[error("length mismatch: expected {expected} values, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("insufficient data: expected at least {expected} points, got {got}")]
    InsufficientData { expected: usize, got: usize },

    #[error("invalid temperature search range {min_k}..{max_k} K")]
    SearchRange { min_k: f64, max_k: f64 },

    #[error("measurement contains a non-finite value at index {0}")]
    NonFiniteMeasurement(usize),
}
