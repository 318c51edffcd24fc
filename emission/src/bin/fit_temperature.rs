//! Temperature fit demo
//!
//! Simulates a noisy spectrometer reading of a blackbody, fits Planck's law
//! to it and reports the recovered temperature with RMSE, MAPE and χ².

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Parser;
use emission::fitting::{fit_temperature, synthesize_measurement, FitConfig, TemperatureFit};
use emission::WavelengthGrid;
use log::info;
use plotters::prelude::*;

#[derive(Parser, Debug)]
#[command(
    name = "Temperature Fit",
    about = "Fits Planck's law to a synthetic noisy blackbody spectrum",
    long_about = None
)]
struct Args {
    /// Temperature of the simulated source in Kelvin
    #[arg(long, default_value_t = 4500.0)]
    true_temp: f64,

    /// Gaussian noise level as a fraction of the spectrum peak
    #[arg(long, default_value_t = 0.05)]
    noise: f64,

    /// Seed for the noise generator
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Shortest wavelength in nanometers
    #[arg(long, default_value_t = 400.0)]
    wavelength_start: f64,

    /// Longest wavelength in nanometers
    #[arg(long, default_value_t = 800.0)]
    wavelength_end: f64,

    /// Number of wavelength samples
    #[arg(long, default_value_t = 200)]
    wavelength_points: usize,

    /// Lower bound of the temperature search in Kelvin
    #[arg(long, default_value_t = 100.0)]
    min_temp: f64,

    /// Upper bound of the temperature search in Kelvin
    #[arg(long, default_value_t = 50_000.0)]
    max_temp: f64,

    /// Write a measurement-vs-fit chart to this PNG file
    #[arg(long)]
    plot: Option<PathBuf>,
}

fn draw_fit(
    grid: &WavelengthGrid,
    measured: &[f64],
    fit: &TemperatureFit,
    path: &Path,
) -> Result<(), Box<dyn Error>> {
    let y_min = measured.iter().copied().fold(0.0, f64::min);
    let mut y_max = measured
        .iter()
        .chain(&fit.best_fit)
        .copied()
        .fold(0.0, f64::max)
        * 1.05;
    if y_max <= y_min {
        y_max = y_min + 1.0;
    }

    let root = BitMapBackend::new(path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Bose–Einstein fit: T = {:.1} K", fit.temperature_k),
            ("sans-serif", 28),
        )
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(grid.first_nm()..grid.last_nm(), y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Wavelength (nm)")
        .y_desc("Spectral radiance (W/sr/m³)")
        .y_label_formatter(&|y| format!("{y:.1e}"))
        .draw()?;

    chart
        .draw_series(
            grid.nanometers()
                .iter()
                .zip(measured)
                .map(|(&wl, &y)| Circle::new((wl, y), 2, BLUE.filled())),
        )?
        .label("Measurement")
        .legend(|(x, y)| Circle::new((x, y), 3, BLUE.filled()));

    chart
        .draw_series(LineSeries::new(
            grid.nanometers()
                .iter()
                .copied()
                .zip(fit.best_fit.iter().copied()),
            RED.stroke_width(2),
        ))?
        .label("Planck fit")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let grid = WavelengthGrid::linspace(
        args.wavelength_start,
        args.wavelength_end,
        args.wavelength_points,
    )?;
    let measurement = synthesize_measurement(args.true_temp, &grid, args.noise, Some(args.seed))?;

    let config = FitConfig {
        min_temperature_k: args.min_temp,
        max_temperature_k: args.max_temp,
        ..Default::default()
    };
    let fit = fit_temperature(&grid, &measurement.measured, &config)?;

    println!("Temperature Fit");
    println!("===============");
    println!(
        "Source: {:.1} K, noise {:.1}% of peak, seed {}",
        args.true_temp,
        args.noise * 100.0,
        measurement.seed
    );
    println!(
        "Fitted temperature: {:.2} K ({:+.3}%)",
        fit.temperature_k,
        (fit.temperature_k - args.true_temp) / args.true_temp * 100.0
    );
    println!();
    println!("Model evaluation:");
    println!("  RMSE = {:.4e}", fit.metrics.rmse);
    println!("  MAPE = {:.2}%", fit.metrics.mape);
    println!("  Chi² = {:.4e}", fit.metrics.chi_square);

    if let Some(path) = &args.plot {
        draw_fit(&grid, &measurement.measured, &fit, path)?;
        info!("Wrote {}", path.display());
        println!();
        println!("Plot saved to: {}", path.display());
    }

    Ok(())
}
