//! Trapezoidal integration utility

use thiserror::Error;

/// Errors that can occur during trapezoidal integration
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrapezoidError {
    #[error("Insufficient points for integration, need at least 2 points")]
    InsufficientPoints,

    #[error("Sample and abscissa counts differ: {xs} vs {ys}")]
    LengthMismatch { xs: usize, ys: usize },

    #[error("Points must be in ascending order")]
    NotAscending,
}

/// Integrates tabulated samples with the composite trapezoidal rule.
///
/// # Arguments
///
/// * `xs` - Abscissae in strictly ascending order
/// * `ys` - Sampled values at each abscissa
///
/// # Returns
///
/// The integral of the piecewise-linear curve through the samples.
pub fn trap_integrate_samples(xs: &[f64], ys: &[f64]) -> Result<f64, TrapezoidError> {
    if xs.len() != ys.len() {
        return Err(TrapezoidError::LengthMismatch {
            xs: xs.len(),
            ys: ys.len(),
        });
    }

    if xs.len() < 2 {
        return Err(TrapezoidError::InsufficientPoints);
    }

    if xs.windows(2).any(|w| w[1] <= w[0]) {
        return Err(TrapezoidError::NotAscending);
    }

    // ∫[x₁,x₂] f(x)dx ≈ (x₂-x₁) × (f(x₁)+f(x₂))/2
    let integral = xs
        .windows(2)
        .zip(ys.windows(2))
        .map(|(x, y)| (x[1] - x[0]) * (y[0] + y[1]) / 2.0)
        .sum();

    Ok(integral)
}
