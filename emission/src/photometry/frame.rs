//! Spectral frames: intensity versus wavelength at one temperature

use std::sync::Arc;

use crate::algo::{trap_integrate_samples, TrapezoidError};
use crate::params::InvalidParameterError;

use super::planck::radiance_unchecked;
use super::WavelengthGrid;

/// Planck spectrum sampled on a wavelength grid at a single temperature
///
/// Frames built by the same series share one grid allocation, so
/// `Arc::ptr_eq` holds between their grids.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralFrame {
    temperature_k: f64,
    grid: Arc<WavelengthGrid>,
    /// Spectral radiance in W·sr⁻¹·m⁻³, one value per grid point
    intensities: Vec<f64>,
}

impl SpectralFrame {
    /// Evaluate Planck's law at every grid point
    pub(crate) fn evaluate(
        temperature_k: f64,
        grid: Arc<WavelengthGrid>,
    ) -> Result<Self, InvalidParameterError> {
        if !(temperature_k.is_finite() && temperature_k > 0.0) {
            return Err(InvalidParameterError::Temperature(temperature_k));
        }

        let intensities = grid
            .nanometers()
            .iter()
            .map(|&wl| radiance_unchecked(wl, temperature_k))
            .collect();

        Ok(Self {
            temperature_k,
            grid,
            intensities,
        })
    }

    /// Temperature this frame was evaluated at, in Kelvin
    pub fn temperature_k(&self) -> f64 {
        self.temperature_k
    }

    pub fn grid(&self) -> &Arc<WavelengthGrid> {
        &self.grid
    }

    pub fn wavelengths_nm(&self) -> &[f64] {
        self.grid.nanometers()
    }

    pub fn intensities(&self) -> &[f64] {
        &self.intensities
    }

    /// `(wavelength_nm, intensity)` pairs in grid order
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.grid
            .nanometers()
            .iter()
            .copied()
            .zip(self.intensities.iter().copied())
    }

    /// Largest intensity in the frame
    pub fn peak_intensity(&self) -> f64 {
        self.intensities.iter().copied().fold(0.0, f64::max)
    }

    /// Grid wavelength with the largest intensity, in nanometers
    ///
    /// Ties resolve to the shortest wavelength. For a grid that does not
    /// bracket the true peak this is the grid edge nearest to it.
    pub fn peak_wavelength_nm(&self) -> f64 {
        let mut best = 0;
        for (i, &value) in self.intensities.iter().enumerate() {
            if value > self.intensities[best] {
                best = i;
            }
        }
        self.grid.nanometers()[best]
    }

    /// Radiance integrated over the grid's wavelength span, in W·sr⁻¹·m⁻²
    pub fn band_radiance(&self) -> Result<f64, TrapezoidError> {
        let wavelengths_m: Vec<f64> = self.grid.meters().collect();
        trap_integrate_samples(&wavelengths_m, &self.intensities)
    }

    /// Copy of this frame with every intensity divided by `reference`
    ///
    /// Dividing keeps a subnormal reference exact, where multiplying by its
    /// reciprocal would overflow to infinity.
    pub fn relative_to(&self, reference: f64) -> Self {
        Self {
            temperature_k: self.temperature_k,
            grid: Arc::clone(&self.grid),
            intensities: self.intensities.iter().map(|i| i / reference).collect(),
        }
    }
}

/// Evaluate the Planck spectrum of a source at `temperature_k` on `grid`
///
/// # Errors
///
/// Returns [`InvalidParameterError::Temperature`] for a non-positive or
/// non-finite temperature. Wavelength validity is guaranteed by
/// [`WavelengthGrid`] construction.
///
/// # Examples
///
/// ```rust
/// use emission::photometry::{compute_spectral_frame, WavelengthGrid};
///
/// let grid = WavelengthGrid::linspace(100.0, 3000.0, 291).unwrap();
/// let frame = compute_spectral_frame(5778.0, &grid).unwrap();
/// assert_eq!(frame.peak_wavelength_nm(), 500.0);
/// ```
pub fn compute_spectral_frame(
    temperature_k: f64,
    grid: &WavelengthGrid,
) -> Result<SpectralFrame, InvalidParameterError> {
    SpectralFrame::evaluate(temperature_k, Arc::new(grid.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SI;
    use crate::photometry::wien_peak_nm;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_frame_is_non_negative_and_finite() {
        let grid = WavelengthGrid::linspace(1.0, 100_000.0, 500).unwrap();
        for t in [3.0, 300.0, 6000.0, 1e6] {
            let frame = compute_spectral_frame(t, &grid).unwrap();
            assert_eq!(frame.intensities().len(), grid.len());
            assert!(frame
                .intensities()
                .iter()
                .all(|i| i.is_finite() && *i >= 0.0));
        }
    }

    #[test]
    fn test_cold_source_short_wavelengths_are_zero() {
        // x > 1700 at every grid point, far past f64 underflow
        let grid = WavelengthGrid::linspace(100.0, 400.0, 4).unwrap();
        let frame = compute_spectral_frame(20.0, &grid).unwrap();
        assert!(frame.intensities().iter().all(|&i| i == 0.0));
        assert_eq!(frame.peak_intensity(), 0.0);
    }

    #[test]
    fn test_peak_follows_wien() {
        let grid = WavelengthGrid::linspace(100.0, 20_000.0, 19_901).unwrap();
        for t in [6000.0, 3000.0, 1000.0] {
            let frame = compute_spectral_frame(t, &grid).unwrap();
            assert_relative_eq!(frame.peak_wavelength_nm(), wien_peak_nm(t), max_relative = 0.01);
        }
    }

    #[test]
    fn test_band_radiance_approaches_stefan_boltzmann() {
        // ∫B dλ = σT⁴/π with σ = 2π⁵k⁴/(15h³c²)
        let t: f64 = 5000.0;
        let grid = WavelengthGrid::linspace(50.0, 200_000.0, 40_000).unwrap();
        let frame = compute_spectral_frame(t, &grid).unwrap();

        let sigma = 2.0 * PI.powi(5) * SI::BOLTZMANN_CONSTANT.powi(4)
            / (15.0 * SI::PLANCK_CONSTANT.powi(3) * SI::SPEED_OF_LIGHT.powi(2));
        let expected = sigma * t.powi(4) / PI;

        assert_relative_eq!(frame.band_radiance().unwrap(), expected, max_relative = 0.01);
    }

    #[test]
    fn test_band_radiance_needs_two_points() {
        let grid = WavelengthGrid::from_values(vec![500.0]).unwrap();
        let frame = compute_spectral_frame(5000.0, &grid).unwrap();
        assert_eq!(frame.band_radiance(), Err(TrapezoidError::InsufficientPoints));
    }

    #[test]
    fn test_relative_to_keeps_grid() {
        let grid = WavelengthGrid::linspace(400.0, 800.0, 5).unwrap();
        let frame = compute_spectral_frame(4000.0, &grid).unwrap();
        let half = frame.relative_to(2.0);

        assert!(Arc::ptr_eq(frame.grid(), half.grid()));
        assert_eq!(half.temperature_k(), 4000.0);
        for (a, b) in frame.intensities().iter().zip(half.intensities()) {
            assert_eq!(a / 2.0, *b);
        }
    }

    #[test]
    fn test_relative_to_subnormal_reference() {
        let grid = WavelengthGrid::from_values(vec![1000.0, 1001.0]).unwrap();
        let frame = compute_spectral_frame(19.363, &grid).unwrap();
        let peak = frame.peak_intensity();
        assert!(peak > 0.0 && peak < f64::MIN_POSITIVE);

        let relative = frame.relative_to(peak);
        assert!(relative.intensities().iter().all(|i| i.is_finite()));
        assert_eq!(relative.peak_intensity(), 1.0);
    }

    #[test]
    fn test_points_pairs_grid_and_intensity() {
        let grid = WavelengthGrid::from_values(vec![500.0, 600.0]).unwrap();
        let frame = compute_spectral_frame(4000.0, &grid).unwrap();
        let points: Vec<(f64, f64)> = frame.points().collect();
        assert_eq!(points[0].0, 500.0);
        assert_eq!(points[1], (600.0, frame.intensities()[1]));
    }

    #[test]
    fn test_rejects_bad_temperature() {
        let grid = WavelengthGrid::from_values(vec![500.0]).unwrap();
        assert_eq!(
            compute_spectral_frame(0.0, &grid),
            Err(InvalidParameterError::Temperature(0.0))
        );
        assert!(compute_spectral_frame(f64::NAN, &grid).is_err());
    }
}
