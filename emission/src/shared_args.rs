//! Command line arguments shared by the emission binaries
//!
//! Parameters resolve in three layers: built-in defaults, then an optional
//! JSON parameter file, then individual flags.

use std::path::PathBuf;

use clap::Parser;

use crate::params::{ConfigError, SimulationParameters, WavelengthSpec};

/// Simulation parameter flags, flattened into each binary's arguments
#[derive(Parser, Debug, Clone, Default)]
pub struct SharedSimulationArgs {
    /// JSON parameter file; flags below override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Initial source temperature in Kelvin
    #[arg(long)]
    pub initial_temp: Option<f64>,

    /// Ambient temperature in Kelvin
    #[arg(long)]
    pub ambient_temp: Option<f64>,

    /// Newton cooling constant in 1/s
    #[arg(long)]
    pub cooling_rate: Option<f64>,

    /// Simulated duration in seconds
    #[arg(long)]
    pub duration: Option<f64>,

    /// Number of time steps, including t = 0
    #[arg(long)]
    pub steps: Option<usize>,

    /// Shortest wavelength in nanometers
    #[arg(long)]
    pub wavelength_start: Option<f64>,

    /// Longest wavelength in nanometers
    #[arg(long)]
    pub wavelength_end: Option<f64>,

    /// Number of wavelength samples
    #[arg(long)]
    pub wavelength_points: Option<usize>,
}

impl SharedSimulationArgs {
    /// Resolve defaults, the parameter file and flag overrides into validated parameters
    ///
    /// Validation runs once, after every override, so a flag can replace an
    /// out-of-range value in the file.
    pub fn resolve(&self) -> Result<SimulationParameters, ConfigError> {
        let mut params = match &self.config {
            Some(path) => SimulationParameters::read_json_file(path)?,
            None => SimulationParameters::default(),
        };

        if let Some(t0) = self.initial_temp {
            params.initial_temperature_k = t0;
        }
        if let Some(t_env) = self.ambient_temp {
            params.ambient_temperature_k = t_env;
        }
        if let Some(k) = self.cooling_rate {
            params.cooling_rate_per_s = k;
        }
        if let Some(duration) = self.duration {
            params.duration_s = duration;
        }
        if let Some(steps) = self.steps {
            params.steps = steps;
        }

        if self.wavelength_start.is_some()
            || self.wavelength_end.is_some()
            || self.wavelength_points.is_some()
        {
            let (start_nm, end_nm, points) = match &params.wavelengths {
                WavelengthSpec::Range {
                    start_nm,
                    end_nm,
                    points,
                } => (*start_nm, *end_nm, *points),
                WavelengthSpec::Values(values) => (
                    values.first().copied().unwrap_or(400.0),
                    values.last().copied().unwrap_or(800.0),
                    values.len(),
                ),
            };

            params.wavelengths = WavelengthSpec::Range {
                start_nm: self.wavelength_start.unwrap_or(start_nm),
                end_nm: self.wavelength_end.unwrap_or(end_nm),
                points: self.wavelength_points.unwrap_or(points),
            };
        }

        params.validate()?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::InvalidParameterError;
    use std::io::Write;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        sim: SharedSimulationArgs,
    }

    #[test]
    fn test_no_flags_gives_defaults() {
        let cli = TestCli::try_parse_from(["test"]).unwrap();
        assert_eq!(cli.sim.resolve().unwrap(), SimulationParameters::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = TestCli::try_parse_from([
            "test",
            "--initial-temp",
            "4000",
            "--steps",
            "10",
            "--wavelength-end",
            "3000",
        ])
        .unwrap();
        let params = cli.sim.resolve().unwrap();

        assert_eq!(params.initial_temperature_k, 4000.0);
        assert_eq!(params.steps, 10);
        assert_eq!(
            params.wavelengths,
            WavelengthSpec::Range {
                start_nm: 400.0,
                end_nm: 3000.0,
                points: 200
            }
        );
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{ "initial_temperature_k": 5000.0, "duration_s": 30.0 }"#)
            .unwrap();

        let path = file.path().to_str().unwrap();
        let cli =
            TestCli::try_parse_from(["test", "--config", path, "--duration", "60"]).unwrap();
        let params = cli.sim.resolve().unwrap();

        assert_eq!(params.initial_temperature_k, 5000.0);
        assert_eq!(params.duration_s, 60.0);
    }

    #[test]
    fn test_flag_repairs_invalid_config_value() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{ "cooling_rate_per_s": 0.0 }"#).unwrap();

        let args = SharedSimulationArgs {
            config: Some(file.path().to_path_buf()),
            cooling_rate: Some(0.5),
            ..Default::default()
        };
        assert_eq!(args.resolve().unwrap().cooling_rate_per_s, 0.5);

        let without_flag = SharedSimulationArgs {
            config: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        assert!(matches!(
            without_flag.resolve(),
            Err(ConfigError::Invalid(InvalidParameterError::CoolingRate(_)))
        ));
    }

    #[test]
    fn test_invalid_override_rejected() {
        let args = SharedSimulationArgs {
            cooling_rate: Some(0.0),
            ..Default::default()
        };
        assert!(matches!(
            args.resolve(),
            Err(ConfigError::Invalid(InvalidParameterError::CoolingRate(_)))
        ));
    }
}
