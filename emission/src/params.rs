//! Simulation parameters and their validation
//!
//! [`SimulationParameters`] is the single input of the spectrum model. It can be
//! built in code, deserialized from a JSON parameter file, or assembled from
//! command line flags (see [`crate::shared_args`]). Every operation of the
//! model validates the parameters it consumes and reports problems as an
//! [`InvalidParameterError`] before computing anything.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::photometry::WavelengthGrid;

/// Input validation failures of the spectrum model
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidParameterError {
    #[error("Initial temperature must be positive and finite, got {0} K")]
    InitialTemperature(f64),

    #[error("Ambient temperature must be non-negative and finite, got {0} K")]
    AmbientTemperature(f64),

    #[error("Cooling rate must be positive and finite, got {0} 1/s")]
    CoolingRate(f64),

    #[error("Duration must be positive and finite, got {0} s")]
    Duration(f64),

    #[error("Step count must be at least 1, got {0}")]
    Steps(usize),

    #[error("Temperature must be positive and finite, got {0} K")]
    Temperature(f64),

    #[error("Wavelength grid must contain at least one point")]
    EmptyWavelengthGrid,

    #[error("Wavelength at index {index} must be positive and finite, got {value} nm")]
    Wavelength { index: usize, value: f64 },

    #[error("Wavelengths must be strictly increasing, violated at index {index}")]
    WavelengthOrder { index: usize },

    #[error("Invalid wavelength range {start_nm}..{end_nm} nm with {points} points")]
    WavelengthRange {
        start_nm: f64,
        end_nm: f64,
        points: usize,
    },

    #[error("Noise fraction must be non-negative and finite, got {0}")]
    NoiseFraction(f64),
}

/// Errors raised while loading a parameter file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read parameter file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse parameters: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] InvalidParameterError),
}

/// How the wavelength grid is described in parameter files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WavelengthSpec {
    /// Inclusive, evenly spaced range in nanometers
    Range {
        start_nm: f64,
        end_nm: f64,
        points: usize,
    },

    /// Explicit wavelengths in nanometers
    Values(Vec<f64>),
}

impl WavelengthSpec {
    /// Build the validated grid described by `self`
    pub fn to_grid(&self) -> Result<WavelengthGrid, InvalidParameterError> {
        match self {
            WavelengthSpec::Range {
                start_nm,
                end_nm,
                points,
            } => WavelengthGrid::linspace(*start_nm, *end_nm, *points),
            WavelengthSpec::Values(values) => WavelengthGrid::from_values(values.clone()),
        }
    }
}

impl Default for WavelengthSpec {
    fn default() -> Self {
        WavelengthSpec::Range {
            start_nm: 400.0,
            end_nm: 800.0,
            points: 200,
        }
    }
}

/// Physical and simulation parameters of a cooling (or heating) light source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    /// Source temperature at t = 0 in Kelvin
    pub initial_temperature_k: f64,

    /// Temperature the source relaxes toward in Kelvin
    pub ambient_temperature_k: f64,

    /// Newton cooling constant in 1/s
    pub cooling_rate_per_s: f64,

    /// Simulated time span in seconds
    pub duration_s: f64,

    /// Number of evenly spaced time samples, including t = 0
    pub steps: usize,

    /// Wavelengths at which each spectral frame is evaluated
    pub wavelengths: WavelengthSpec,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            initial_temperature_k: 6000.0,
            ambient_temperature_k: 300.0,
            cooling_rate_per_s: 0.25,
            duration_s: 15.0,
            steps: 80,
            wavelengths: WavelengthSpec::default(),
        }
    }
}

impl SimulationParameters {
    /// Parse parameters from a JSON document and validate them
    ///
    /// Missing fields fall back to [`SimulationParameters::default`].
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Load and validate parameters from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let params = Self::read_json_file(path)?;
        params.validate()?;
        Ok(params)
    }

    /// Load parameters from a JSON file without validating them
    ///
    /// For callers that override fields before validating, such as
    /// [`crate::shared_args::SharedSimulationArgs::resolve`].
    pub fn read_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Check the scalar parameters that drive the temperature schedule
    pub fn validate_schedule(&self) -> Result<(), InvalidParameterError> {
        let t0 = self.initial_temperature_k;
        if !(t0.is_finite() && t0 > 0.0) {
            return Err(InvalidParameterError::InitialTemperature(t0));
        }

        let t_env = self.ambient_temperature_k;
        if !(t_env.is_finite() && t_env >= 0.0) {
            return Err(InvalidParameterError::AmbientTemperature(t_env));
        }

        let k = self.cooling_rate_per_s;
        if !(k.is_finite() && k > 0.0) {
            return Err(InvalidParameterError::CoolingRate(k));
        }

        let duration = self.duration_s;
        if !(duration.is_finite() && duration > 0.0) {
            return Err(InvalidParameterError::Duration(duration));
        }

        if self.steps < 1 {
            return Err(InvalidParameterError::Steps(self.steps));
        }

        Ok(())
    }

    /// Check every parameter, including the wavelength grid
    pub fn validate(&self) -> Result<(), InvalidParameterError> {
        self.validate_schedule()?;
        self.wavelengths.to_grid().map(|_| ())
    }

    /// The validated wavelength grid
    pub fn wavelength_grid(&self) -> Result<WavelengthGrid, InvalidParameterError> {
        self.wavelengths.to_grid()
    }

    /// True when the source relaxes downward toward ambient
    pub fn is_cooling(&self) -> bool {
        self.initial_temperature_k > self.ambient_temperature_k
    }
}
