//! Synthetic noisy spectra for exercising the temperature fit

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::params::InvalidParameterError;
use crate::photometry::{compute_spectral_frame, SpectralFrame, WavelengthGrid};

/// A noiseless Planck spectrum and a noisy copy of it
#[derive(Debug, Clone)]
pub struct SyntheticMeasurement {
    /// The spectrum the noise was added to
    pub truth: SpectralFrame,

    /// Noisy intensities, one per grid point
    pub measured: Vec<f64>,

    /// Seed the noise was drawn with
    pub seed: u64,
}

/// Simulate a spectrometer reading of a blackbody at `temperature_k`
///
/// Adds zero-mean Gaussian noise with standard deviation
/// `noise_fraction × peak intensity` to every grid point. Noisy values may
/// be negative, as real background-subtracted readings can be.
///
/// # Arguments
/// * `temperature_k` - True source temperature in Kelvin
/// * `grid` - Wavelengths to sample
/// * `noise_fraction` - Noise level relative to the spectrum peak (0.05 = 5%)
/// * `rng_seed` - Optional seed; a random seed is drawn when `None`
pub fn synthesize_measurement(
    temperature_k: f64,
    grid: &WavelengthGrid,
    noise_fraction: f64,
    rng_seed: Option<u64>,
) -> Result<SyntheticMeasurement, InvalidParameterError> {
    if !(noise_fraction.is_finite() && noise_fraction >= 0.0) {
        return Err(InvalidParameterError::NoiseFraction(noise_fraction));
    }

    let truth = compute_spectral_frame(temperature_k, grid)?;
    let sigma = noise_fraction * truth.peak_intensity();

    let seed = rng_seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    let noise =
        Normal::new(0.0, sigma).map_err(|_| InvalidParameterError::NoiseFraction(noise_fraction))?;

    let measured = truth
        .intensities()
        .iter()
        .map(|&i| i + noise.sample(&mut rng))
        .collect();

    debug!(
        "Synthesized {} K spectrum on {} points, sigma {:.3e}, seed {}",
        temperature_k,
        grid.len(),
        sigma,
        seed
    );

    Ok(SyntheticMeasurement {
        truth,
        measured,
        seed,
    })
}
