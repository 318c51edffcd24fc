//! Least-squares Planck fit over temperature
//!
//! Finds the temperature whose Planck spectrum best matches a measurement in
//! the least-squares sense. The model has a single free parameter, so the
//! search is one-dimensional:
//!
//! 1. Scan log-spaced candidate temperatures across the search range and
//!    keep the best one together with its neighbours as a bracket.
//! 2. Refine within the bracket by golden-section search on `ln T`.
//!
//! Radiance increases monotonically with temperature at every wavelength,
//! so for data resembling a blackbody the squared-error curve has one basin
//! around the true temperature. The scan finds that basin; the refinement
//! only ever searches between two neighbouring candidates.

use log::debug;

use crate::algo::logspace;
use crate::photometry::planck::radiance_unchecked;
use crate::photometry::WavelengthGrid;

use super::{FitError, FitMetrics};

/// Minimum number of measurement points accepted by [`fit_temperature`]
const MIN_FIT_POINTS: usize = 3;

/// 1/φ, the golden-section shrink factor
const INV_GOLDEN_RATIO: f64 = 0.618_033_988_749_894_9;

/// Search settings for [`fit_temperature`]
#[derive(Debug, Clone)]
pub struct FitConfig {
    /// Lowest temperature considered, in Kelvin
    pub min_temperature_k: f64,
    /// Highest temperature considered, in Kelvin
    pub max_temperature_k: f64,
    /// Number of log-spaced candidates in the coarse scan
    pub scan_points: usize,
    /// Stop refining once the bracket is narrower than this fraction of T
    pub relative_tolerance: f64,
    /// Upper bound on golden-section iterations
    pub max_iterations: usize,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            min_temperature_k: 100.0,
            max_temperature_k: 50_000.0,
            scan_points: 64,
            relative_tolerance: 1e-9,
            max_iterations: 200,
        }
    }
}

/// Result of fitting Planck's law to a measurement
#[derive(Debug, Clone)]
pub struct TemperatureFit {
    /// Best-fit temperature in Kelvin
    pub temperature_k: f64,
    /// Model intensities at the best-fit temperature
    pub best_fit: Vec<f64>,
    /// Goodness of fit of `best_fit` against the measurement
    pub metrics: FitMetrics,
    /// Golden-section iterations performed after the scan
    pub iterations: usize,
}

fn sum_squared_error(grid: &WavelengthGrid, measured: &[f64], temperature_k: f64) -> f64 {
    grid.nanometers()
        .iter()
        .zip(measured)
        .map(|(&wl, &y)| (radiance_unchecked(wl, temperature_k) - y).powi(2))
        .sum()
}

/// Fit the source temperature of a measured spectrum
///
/// # Arguments
/// * `grid` - Wavelengths the measurement was taken at
/// * `measured` - Measured spectral radiance in W·sr⁻¹·m⁻³, one per grid point
/// * `config` - Search range and convergence settings
///
/// # Returns
/// * `Ok(TemperatureFit)` - Fitted temperature, model curve and metrics
/// * `Err(FitError)` - If the inputs cannot be fitted
///
/// # Examples
/// ```rust
/// use emission::fitting::{fit_temperature, FitConfig};
/// use emission::photometry::{compute_spectral_frame, WavelengthGrid};
///
/// let grid = WavelengthGrid::linspace(400.0, 800.0, 50).unwrap();
/// let frame = compute_spectral_frame(4500.0, &grid).unwrap();
/// let fit = fit_temperature(&grid, frame.intensities(), &FitConfig::default()).unwrap();
/// assert!((fit.temperature_k - 4500.0).abs() < 0.01);
/// ```
pub fn fit_temperature(
    grid: &WavelengthGrid,
    measured: &[f64],
    config: &FitConfig,
) -> Result<TemperatureFit, FitError> {
    if measured.len() != grid.len() {
        return Err(FitError::LengthMismatch {
            expected: grid.len(),
            got: measured.len(),
        });
    }
    if measured.len() < MIN_FIT_POINTS {
        return Err(FitError::InsufficientData {
            expected: MIN_FIT_POINTS,
            got: measured.len(),
        });
    }
    if let Some(index) = measured.iter().position(|y| !y.is_finite()) {
        return Err(FitError::NonFiniteMeasurement(index));
    }

    let (min_k, max_k) = (config.min_temperature_k, config.max_temperature_k);
    if !(min_k.is_finite() && max_k.is_finite() && min_k > 0.0 && max_k > min_k) {
        return Err(FitError::SearchRange { min_k, max_k });
    }

    let sse = |temperature_k: f64| sum_squared_error(grid, measured, temperature_k);

    // Coarse scan to bracket the minimum
    let candidates = logspace(min_k, max_k, config.scan_points.max(3));
    let errors: Vec<f64> = candidates.iter().map(|&t| sse(t)).collect();
    let best = errors
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
        .unwrap_or(0);

    let lo = candidates[best.saturating_sub(1)];
    let hi = candidates[(best + 1).min(candidates.len() - 1)];

    // Golden-section refinement in ln T
    let (mut a, mut b) = (lo.ln(), hi.ln());
    let mut c = b - INV_GOLDEN_RATIO * (b - a);
    let mut d = a + INV_GOLDEN_RATIO * (b - a);
    let mut f_c = sse(c.exp());
    let mut f_d = sse(d.exp());

    let mut iterations = 0;
    while iterations < config.max_iterations && (b - a) > config.relative_tolerance {
        if f_c < f_d {
            b = d;
            d = c;
            f_d = f_c;
            c = b - INV_GOLDEN_RATIO * (b - a);
            f_c = sse(c.exp());
        } else {
            a = c;
            c = d;
            f_c = f_d;
            d = a + INV_GOLDEN_RATIO * (b - a);
            f_d = sse(d.exp());
        }
        iterations += 1;
    }

    let temperature_k = ((a + b) / 2.0).exp();
    let best_fit: Vec<f64> = grid
        .nanometers()
        .iter()
        .map(|&wl| radiance_unchecked(wl, temperature_k))
        .collect();
    let metrics = FitMetrics::evaluate(measured, &best_fit)?;

    debug!(
        "Fitted temperature {:.3} K after {} iterations (bracket {:.1}..{:.1} K, RMSE {:.4e})",
        temperature_k, iterations, lo, hi, metrics.rmse
    );

    Ok(TemperatureFit {
        temperature_k,
        best_fit,
        metrics,
        iterations,
    })
}
