//! Wavelength sampling shared by every spectral frame

use crate::algo::linspace;
use crate::constants::METERS_PER_NM;
use crate::params::InvalidParameterError;

/// Strictly increasing, positive wavelengths in nanometers
///
/// A grid is never empty. Construction validates every value, so code that
/// receives a `WavelengthGrid` can evaluate Planck's law on it without
/// further checks.
#[derive(Debug, Clone, PartialEq)]
pub struct WavelengthGrid {
    wavelengths_nm: Vec<f64>,
}

impl WavelengthGrid {
    /// Create a grid from explicit wavelengths in nanometers
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty, any value is non-positive or
    /// non-finite, or the values are not strictly increasing.
    pub fn from_values(wavelengths_nm: Vec<f64>) -> Result<Self, InvalidParameterError> {
        if wavelengths_nm.is_empty() {
            return Err(InvalidParameterError::EmptyWavelengthGrid);
        }

        for (index, &value) in wavelengths_nm.iter().enumerate() {
            if !(value.is_finite() && value > 0.0) {
                return Err(InvalidParameterError::Wavelength { index, value });
            }
            if index > 0 && value <= wavelengths_nm[index - 1] {
                return Err(InvalidParameterError::WavelengthOrder { index });
            }
        }

        Ok(Self { wavelengths_nm })
    }

    /// Create an inclusive, evenly spaced grid between two wavelengths
    ///
    /// # Arguments
    ///
    /// * `start_nm` - First wavelength in nanometers
    /// * `end_nm` - Last wavelength in nanometers, greater than `start_nm` unless `points == 1`
    /// * `points` - Number of samples
    pub fn linspace(
        start_nm: f64,
        end_nm: f64,
        points: usize,
    ) -> Result<Self, InvalidParameterError> {
        let range_error = InvalidParameterError::WavelengthRange {
            start_nm,
            end_nm,
            points,
        };

        if points == 0 || !start_nm.is_finite() || !end_nm.is_finite() {
            return Err(range_error);
        }
        if points > 1 && end_nm <= start_nm {
            return Err(range_error);
        }

        Self::from_values(linspace(start_nm, end_nm, points))
    }

    /// Wavelengths in nanometers
    pub fn nanometers(&self) -> &[f64] {
        &self.wavelengths_nm
    }

    /// Wavelengths converted to meters
    pub fn meters(&self) -> impl Iterator<Item = f64> + '_ {
        self.wavelengths_nm.iter().map(|nm| nm * METERS_PER_NM)
    }

    pub fn len(&self) -> usize {
        self.wavelengths_nm.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.wavelengths_nm.is_empty()
    }

    /// Shortest wavelength in nanometers
    pub fn first_nm(&self) -> f64 {
        self.wavelengths_nm[0]
    }

    /// Longest wavelength in nanometers
    pub fn last_nm(&self) -> f64 {
        self.wavelengths_nm[self.wavelengths_nm.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_grid() {
        let grid = WavelengthGrid::linspace(100.0, 3000.0, 50).unwrap();
        assert_eq!(grid.len(), 50);
        assert_eq!(grid.first_nm(), 100.0);
        assert_eq!(grid.last_nm(), 3000.0);
        assert!(grid.nanometers().windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_single_point_grid() {
        let grid = WavelengthGrid::linspace(550.0, 550.0, 1).unwrap();
        assert_eq!(grid.nanometers(), &[550.0]);
        assert_eq!(grid.first_nm(), grid.last_nm());
    }

    #[test]
    fn test_meters_conversion() {
        let grid = WavelengthGrid::from_values(vec![500.0, 1000.0]).unwrap();
        let meters: Vec<f64> = grid.meters().collect();
        assert_eq!(meters, vec![500.0 * 1e-9, 1000.0 * 1e-9]);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert_eq!(
            WavelengthGrid::from_values(vec![]),
            Err(InvalidParameterError::EmptyWavelengthGrid)
        );
        assert_eq!(
            WavelengthGrid::from_values(vec![400.0, 0.0]),
            Err(InvalidParameterError::Wavelength {
                index: 1,
                value: 0.0
            })
        );
        assert_eq!(
            WavelengthGrid::from_values(vec![400.0, 500.0, 500.0]),
            Err(InvalidParameterError::WavelengthOrder { index: 2 })
        );
        assert!(matches!(
            WavelengthGrid::from_values(vec![f64::INFINITY]),
            Err(InvalidParameterError::Wavelength { index: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_bad_ranges() {
        assert!(matches!(
            WavelengthGrid::linspace(800.0, 400.0, 10),
            Err(InvalidParameterError::WavelengthRange { .. })
        ));
        assert!(matches!(
            WavelengthGrid::linspace(400.0, 800.0, 0),
            Err(InvalidParameterError::WavelengthRange { .. })
        ));
        assert!(matches!(
            WavelengthGrid::linspace(-100.0, 800.0, 10),
            Err(InvalidParameterError::Wavelength { index: 0, .. })
        ));
    }
}
