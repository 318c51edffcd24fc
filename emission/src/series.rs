//! Time series of spectral frames for a cooling source
//!
//! [`compute_series`] is the main entry point of the crate: it turns a set of
//! [`SimulationParameters`] into a [`SpectralSeries`] holding the temperature
//! trace and one [`SpectralFrame`] per time step, all sampled on a single
//! shared wavelength grid. The series is what a plotting layer consumes:
//!
//! - [`SpectralSeries::comparison`] for a static initial/final plot
//! - [`SpectralSeries::frames`] with [`SpectralSeries::trace`] for an animation keyed by time
//! - [`SpectralSeries::intensity_surface`] for a wavelength–time–intensity surface,
//!   with [`SpectralSeries::wien_path`] tracing the Wien peak across it

use std::sync::Arc;

use log::{debug, warn};
use ndarray::Array2;
use rayon::prelude::*;

use crate::cooling::{compute_temperature_trace, TemperatureTrace};
use crate::params::{InvalidParameterError, SimulationParameters};
use crate::photometry::{wien_peak_nm, SpectralFrame, WavelengthGrid};

/// Wien peak of one time step, located on the series grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WienPathPoint {
    pub time_s: f64,
    pub temperature_k: f64,
    /// `b / T` in nanometers, possibly outside the grid
    pub peak_wavelength_nm: f64,
    /// Grid wavelength closest to `peak_wavelength_nm`
    pub grid_wavelength_nm: f64,
    /// Frame intensity at `grid_wavelength_nm`
    pub intensity: f64,
}

/// Spectral frames of a source at every step of its temperature trace
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralSeries {
    trace: TemperatureTrace,
    grid: Arc<WavelengthGrid>,
    frames: Vec<SpectralFrame>,
}

impl SpectralSeries {
    pub fn trace(&self) -> &TemperatureTrace {
        &self.trace
    }

    pub fn grid(&self) -> &WavelengthGrid {
        &self.grid
    }

    /// Frames in time-step order, one per trace sample
    pub fn frames(&self) -> &[SpectralFrame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The first and last frame, for a before/after comparison
    pub fn comparison(&self) -> (&SpectralFrame, &SpectralFrame) {
        (&self.frames[0], &self.frames[self.frames.len() - 1])
    }

    /// Largest intensity across all frames
    pub fn max_intensity(&self) -> f64 {
        self.frames
            .iter()
            .map(SpectralFrame::peak_intensity)
            .fold(0.0, f64::max)
    }

    /// Grid peak wavelength of every frame, in nanometers
    pub fn peak_wavelengths_nm(&self) -> Vec<f64> {
        self.frames
            .iter()
            .map(SpectralFrame::peak_wavelength_nm)
            .collect()
    }

    /// Copy of the series scaled so its brightest sample is 1.0
    ///
    /// Relative intensities keep the frames comparable with each other. A
    /// series that is zero everywhere is returned unchanged.
    pub fn normalized(&self) -> Self {
        let max = self.max_intensity();
        if max <= 0.0 {
            return self.clone();
        }

        Self {
            trace: self.trace.clone(),
            grid: Arc::clone(&self.grid),
            frames: self.frames.iter().map(|f| f.relative_to(max)).collect(),
        }
    }

    /// Analytic Wien peak of every frame, traced across the intensity surface
    ///
    /// Each point pairs `b / T` with the intensity at the grid wavelength
    /// nearest to it. When the peak lies outside the grid that is the grid
    /// edge.
    pub fn wien_path(&self) -> Vec<WienPathPoint> {
        let wavelengths = self.grid.nanometers();

        self.frames
            .iter()
            .zip(self.trace.samples())
            .map(|(frame, sample)| {
                let peak_nm = wien_peak_nm(frame.temperature_k());
                let nearest = wavelengths
                    .iter()
                    .enumerate()
                    .min_by(|a, b| (a.1 - peak_nm).abs().total_cmp(&(b.1 - peak_nm).abs()))
                    .map(|(i, _)| i)
                    .unwrap_or(0);

                WienPathPoint {
                    time_s: sample.time_s,
                    temperature_k: frame.temperature_k(),
                    peak_wavelength_nm: peak_nm,
                    grid_wavelength_nm: wavelengths[nearest],
                    intensity: frame.intensities()[nearest],
                }
            })
            .collect()
    }

    /// Intensities as a (time step × wavelength) array
    pub fn intensity_surface(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.frames.len(), self.grid.len()), |(step, wl)| {
            self.frames[step].intensities()[wl]
        })
    }
}

/// Compute the spectral frame at every step of the temperature trace
///
/// All parameters, including the wavelength grid, are validated before any
/// frame is evaluated. Frames are evaluated in parallel and collected in
/// time order; the result depends only on `params`.
///
/// # Errors
///
/// Returns the first validation failure. A trace that relaxes toward an
/// ambient temperature of 0 K can underflow to exactly 0 K, which is
/// reported as [`InvalidParameterError::Temperature`].
///
/// # Examples
///
/// ```rust
/// use emission::{compute_series, SimulationParameters};
///
/// let series = compute_series(&SimulationParameters::default()).unwrap();
/// let (initial, last) = series.comparison();
/// assert!(initial.temperature_k() > last.temperature_k());
/// ```
pub fn compute_series(
    params: &SimulationParameters,
) -> Result<SpectralSeries, InvalidParameterError> {
    params.validate()?;

    let grid = Arc::new(params.wavelength_grid()?);
    let trace = compute_temperature_trace(params)?;

    let frames = trace
        .samples()
        .par_iter()
        .map(|sample| SpectralFrame::evaluate(sample.temperature_k, Arc::clone(&grid)))
        .collect::<Result<Vec<_>, _>>()?;

    let dark_frames = frames.iter().filter(|f| f.peak_intensity() == 0.0).count();
    if dark_frames > 0 {
        warn!(
            "{} of {} frames have zero intensity over {:.1}..{:.1} nm",
            dark_frames,
            frames.len(),
            grid.first_nm(),
            grid.last_nm()
        );
    }

    debug!(
        "Computed {} spectral frames on {} wavelengths",
        frames.len(),
        grid.len()
    );

    Ok(SpectralSeries {
        trace,
        grid,
        frames,
    })
}
