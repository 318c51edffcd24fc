//! Goodness-of-fit metrics between measured and modelled spectra

use super::FitError;

/// Summary of how well a model reproduces a measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitMetrics {
    /// Root mean squared error, in intensity units
    pub rmse: f64,
    /// Mean absolute percentage error
    pub mape: f64,
    /// Pearson χ² statistic
    pub chi_square: f64,
}

impl FitMetrics {
    pub fn evaluate(measured: &[f64], model: &[f64]) -> Result<Self, FitError> {
        Ok(Self {
            rmse: rmse(measured, model)?,
            mape: mape(measured, model)?,
            chi_square: chi_square(measured, model)?,
        })
    }
}

fn check_lengths(measured: &[f64], model: &[f64]) -> Result<(), FitError> {
    if measured.len() != model.len() {
        return Err(FitError::LengthMismatch {
            expected: measured.len(),
            got: model.len(),
        });
    }
    if measured.is_empty() {
        return Err(FitError::InsufficientData {
            expected: 1,
            got: 0,
        });
    }
    Ok(())
}

/// Root mean squared error `sqrt(mean((y − ŷ)²))`
pub fn rmse(measured: &[f64], model: &[f64]) -> Result<f64, FitError> {
    check_lengths(measured, model)?;
    let sum_sq: f64 = measured
        .iter()
        .zip(model)
        .map(|(y, m)| (y - m).powi(2))
        .sum();
    Ok((sum_sq / measured.len() as f64).sqrt())
}

/// Mean absolute percentage error `100 · mean(|(y − ŷ) / y|)`
///
/// Points where the measurement is exactly zero are skipped; if every point
/// is zero the result is 0.
pub fn mape(measured: &[f64], model: &[f64]) -> Result<f64, FitError> {
    check_lengths(measured, model)?;
    let (sum, count) = measured
        .iter()
        .zip(model)
        .filter(|(y, _)| **y != 0.0)
        .fold((0.0, 0usize), |(sum, count), (y, m)| {
            (sum + ((y - m) / y).abs(), count + 1)
        });

    if count == 0 {
        return Ok(0.0);
    }
    Ok(100.0 * sum / count as f64)
}

/// Pearson χ² `Σ (y − ŷ)² / ŷ`
///
/// Points where the model is exactly zero are skipped.
pub fn chi_square(measured: &[f64], model: &[f64]) -> Result<f64, FitError> {
    check_lengths(measured, model)?;
    Ok(measured
        .iter()
        .zip(model)
        .filter(|(_, m)| **m != 0.0)
        .map(|(y, m)| (y - m).powi(2) / m)
        .sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_perfect_fit() {
        let y = [1.0, 2.0, 3.0];
        let metrics = FitMetrics::evaluate(&y, &y).unwrap();
        assert_eq!(metrics.rmse, 0.0);
        assert_eq!(metrics.mape, 0.0);
        assert_eq!(metrics.chi_square, 0.0);
    }

    #[test]
    fn test_known_values() {
        let measured = [2.0, 4.0];
        let model = [1.0, 5.0];

        assert_relative_eq!(rmse(&measured, &model).unwrap(), 1.0);
        // (|1/2| + |-1/4|) / 2 * 100
        assert_relative_eq!(mape(&measured, &model).unwrap(), 37.5);
        // 1/1 + 1/5
        assert_relative_eq!(chi_square(&measured, &model).unwrap(), 1.2);
    }

    #[test]
    fn test_zero_references_skipped() {
        assert_relative_eq!(mape(&[0.0, 2.0], &[1.0, 1.0]).unwrap(), 50.0);
        assert_eq!(mape(&[0.0], &[1.0]).unwrap(), 0.0);
        assert_relative_eq!(chi_square(&[1.0, 3.0], &[0.0, 2.0]).unwrap(), 0.5);
    }

    #[test]
    fn test_length_errors() {
        assert_eq!(
            rmse(&[1.0, 2.0], &[1.0]),
            Err(FitError::LengthMismatch {
                expected: 2,
                got: 1
            })
        );
        assert_eq!(
            chi_square(&[], &[]),
            Err(FitError::InsufficientData {
                expected: 1,
                got: 0
            })
        );
    }
}
