//! Newton cooling schedule of the light source
//!
//! The source temperature relaxes exponentially toward ambient:
//!
//! ```text
//! T(t) = T_env + (T0 − T_env) · exp(−k·t)
//! ```
//!
//! The same law covers heating when `T0 < T_env`.

use log::debug;

use crate::algo::linspace;
use crate::params::{InvalidParameterError, SimulationParameters};

/// One sample of the temperature schedule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureSample {
    /// Seconds since the start of the simulation
    pub time_s: f64,

    /// Source temperature in Kelvin
    pub temperature_k: f64,
}

/// Temperature of the source at evenly spaced times
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureTrace {
    samples: Vec<TemperatureSample>,
}

impl TemperatureTrace {
    pub fn samples(&self) -> &[TemperatureSample] {
        &self.samples
    }

    pub fn times(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.time_s).collect()
    }

    pub fn temperatures(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.temperature_k).collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false for traces built by [`compute_temperature_trace`]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample at t = 0
    pub fn first(&self) -> TemperatureSample {
        self.samples[0]
    }

    /// Sample at the end of the simulated duration
    pub fn last(&self) -> TemperatureSample {
        self.samples[self.samples.len() - 1]
    }

    /// Lowest and highest temperature in the trace
    pub fn temperature_span(&self) -> (f64, f64) {
        self.samples.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
            (lo.min(s.temperature_k), hi.max(s.temperature_k))
        })
    }
}

/// Temperature at time `time_s` under Newton cooling
///
/// Does not validate its inputs; see [`compute_temperature_trace`].
pub fn newton_temperature(params: &SimulationParameters, time_s: f64) -> f64 {
    let t_env = params.ambient_temperature_k;
    t_env + (params.initial_temperature_k - t_env) * (-params.cooling_rate_per_s * time_s).exp()
}

/// Sample the temperature schedule at `steps` evenly spaced times
///
/// Times run from 0 to `duration_s` inclusive. With a single step the only
/// sample is at t = 0.
///
/// # Errors
///
/// Returns an error if the duration, step count, cooling rate or either
/// temperature is out of range. The wavelength grid is not inspected.
pub fn compute_temperature_trace(
    params: &SimulationParameters,
) -> Result<TemperatureTrace, InvalidParameterError> {
    params.validate_schedule()?;

    let samples: Vec<TemperatureSample> = linspace(0.0, params.duration_s, params.steps)
        .into_iter()
        .map(|time_s| TemperatureSample {
            time_s,
            temperature_k: newton_temperature(params, time_s),
        })
        .collect();

    debug!(
        "Temperature trace: {} samples over {:.3} s, {:.1} K -> {:.1} K",
        samples.len(),
        params.duration_s,
        samples[0].temperature_k,
        samples[samples.len() - 1].temperature_k
    );

    Ok(TemperatureTrace { samples })
}
