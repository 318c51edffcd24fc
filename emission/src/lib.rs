//! Bose–Einstein emission spectra of a cooling light source.
//!
//! The crate models a blackbody whose temperature relaxes exponentially
//! toward its surroundings and samples its Planck spectrum at every time
//! step. The resulting arrays are meant to be handed to a plotting layer:
//! an initial/final comparison, a wavelength–time–intensity surface, and an
//! animation keyed by time.
//!
//! # Pipeline
//!
//! ```text
//! SimulationParameters ─► TemperatureTrace ─► SpectralFrame per step ─► SpectralSeries
//! ```
//!
//! # Example
//!
//! ```rust
//! use emission::{compute_series, SimulationParameters, WavelengthSpec};
//!
//! let params = SimulationParameters {
//!     initial_temperature_k: 6000.0,
//!     ambient_temperature_k: 300.0,
//!     cooling_rate_per_s: 0.01,
//!     duration_s: 500.0,
//!     steps: 5,
//!     wavelengths: WavelengthSpec::Range { start_nm: 100.0, end_nm: 3000.0, points: 50 },
//! };
//!
//! let series = compute_series(&params).unwrap();
//! let (initial, last) = series.comparison();
//! assert_eq!(initial.temperature_k(), 6000.0);
//! assert!((last.temperature_k() - 338.4).abs() < 0.1);
//! ```
//!
//! The [`fitting`] module goes the other way, recovering a temperature from
//! a measured spectrum.

pub mod algo;
pub mod constants;
pub mod cooling;
pub mod fitting;
pub mod params;
pub mod photometry;
pub mod series;
pub mod shared_args;

pub use cooling::{compute_temperature_trace, TemperatureSample, TemperatureTrace};
pub use params::{ConfigError, InvalidParameterError, SimulationParameters, WavelengthSpec};
pub use photometry::{compute_spectral_frame, SpectralFrame, WavelengthGrid};
pub use series::{compute_series, SpectralSeries, WienPathPoint};
