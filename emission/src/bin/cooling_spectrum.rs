//! Cooling spectrum renderer
//!
//! Computes the Bose–Einstein emission spectrum of a source cooling toward
//! ambient and writes PNG charts of the result:
//!
//! - `comparison.png`: initial and final spectrum side by side
//! - `surface.png`: relative intensity over wavelength and time, with the Wien peak path
//! - `frame_NNN.png` (with `--frames`): one chart per time step, colored by temperature

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Parser;
use emission::photometry::{plasma, temperature_color, wien_peak_nm};
use emission::shared_args::SharedSimulationArgs;
use emission::{compute_series, SpectralFrame, SpectralSeries};
use log::{info, warn};
use plotters::coord::Shift;
use plotters::prelude::*;

#[derive(Parser, Debug)]
#[command(
    name = "Cooling Spectrum",
    about = "Renders the emission spectrum of a cooling blackbody over time",
    long_about = None
)]
struct Args {
    #[command(flatten)]
    sim: SharedSimulationArgs,

    /// Directory the PNG charts are written to
    #[arg(long, default_value = "plots")]
    output_dir: PathBuf,

    /// Also render one chart per time step
    #[arg(long)]
    frames: bool,

    /// Print the resolved parameters as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn to_rgb((r, g, b): (f64, f64, f64)) -> RGBColor {
    RGBColor(
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    )
}

/// Draw one spectral frame as a line chart filling `area`
fn draw_frame(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    frame: &SpectralFrame,
    caption: &str,
    color: RGBColor,
    y_max: f64,
) -> Result<(), Box<dyn Error>> {
    let grid = frame.grid();
    let y_top = if y_max > 0.0 { y_max * 1.05 } else { 1.0 };

    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 28))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(grid.first_nm()..grid.last_nm(), 0.0..y_top)?;

    chart
        .configure_mesh()
        .x_desc("Wavelength (nm)")
        .y_desc("Relative intensity (a.u.)")
        .axis_desc_style(("sans-serif", 20))
        .draw()?;

    chart.draw_series(LineSeries::new(frame.points(), color.stroke_width(3)))?;

    Ok(())
}

fn draw_comparison(series: &SpectralSeries, path: &Path) -> Result<(), Box<dyn Error>> {
    let relative = series.normalized();
    let (initial, last) = relative.comparison();

    let root = BitMapBackend::new(path, (1600, 700)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((1, 2));

    // Each panel gets its own scale; the final spectrum is often orders of
    // magnitude fainter than the initial one.
    let styled = [
        ("Initial temperature", initial, RGBColor(255, 140, 0)),
        ("Final temperature", last, RED),
    ];
    for (panel, (title, frame, color)) in panels.iter().zip(styled) {
        let caption = format!("{title}: {:.0} K", frame.temperature_k());
        draw_frame(panel, frame, &caption, color, frame.peak_intensity())?;
    }

    root.present()?;
    Ok(())
}

fn draw_surface(series: &SpectralSeries, path: &Path) -> Result<(), Box<dyn Error>> {
    let surface = series.normalized().intensity_surface();
    let wavelengths = series.grid().nanometers();
    let times = series.trace().times();

    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Relative intensity over wavelength and time",
            ("sans-serif", 28),
        )
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(
            wavelengths[0]..wavelengths[wavelengths.len() - 1],
            times[0]..times[times.len() - 1],
        )?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Wavelength (nm)")
        .y_desc("Time (s)")
        .axis_desc_style(("sans-serif", 20))
        .draw()?;

    // Cell (step, wl) spans to the next sample in each direction
    chart.draw_series(
        surface
            .indexed_iter()
            .filter(|((step, wl), _)| step + 1 < times.len() && wl + 1 < wavelengths.len())
            .map(|((step, wl), &value)| {
                Rectangle::new(
                    [
                        (wavelengths[wl], times[step]),
                        (wavelengths[wl + 1], times[step + 1]),
                    ],
                    to_rgb(plasma(value)).filled(),
                )
            }),
    )?;

    // Wien peak λ = b/T, drawn only where it falls inside the grid
    let (first_nm, last_nm) = (wavelengths[0], wavelengths[wavelengths.len() - 1]);
    let wien_points: Vec<(f64, f64)> = series
        .wien_path()
        .iter()
        .filter(|p| (first_nm..=last_nm).contains(&p.peak_wavelength_nm))
        .map(|p| (p.peak_wavelength_nm, p.time_s))
        .collect();
    if wien_points.len() >= 2 {
        chart
            .draw_series(LineSeries::new(wien_points, WHITE.stroke_width(2)))?
            .label("Wien peak λ = b/T")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], WHITE));

        chart
            .configure_series_labels()
            .background_style(BLACK.mix(0.6))
            .label_font(("sans-serif", 16).into_font().color(&WHITE))
            .draw()?;
    } else {
        warn!("Wien peak stays outside the wavelength grid, not drawn on surface");
    }

    root.present()?;
    Ok(())
}

fn draw_animation_frames(series: &SpectralSeries, dir: &Path) -> Result<usize, Box<dyn Error>> {
    let relative = series.normalized();
    let (min_k, max_k) = series.trace().temperature_span();

    for (i, (frame, sample)) in relative
        .frames()
        .iter()
        .zip(series.trace().samples())
        .enumerate()
    {
        let path = dir.join(format!("frame_{i:03}.png"));
        let root = BitMapBackend::new(&path, (1000, 600)).into_drawing_area();
        root.fill(&WHITE)?;

        let color = to_rgb(temperature_color(frame.temperature_k(), min_k, max_k));
        let caption = format!(
            "t = {:.2} s, T = {:.0} K",
            sample.time_s,
            frame.temperature_k()
        );
        // Shared scale so brightness changes are visible between frames
        draw_frame(&root, frame, &caption, color, 1.0)?;

        root.present()?;
    }

    Ok(relative.len())
}

fn print_summary(label: &str, frame: &SpectralFrame) {
    println!(
        "  {label:<8} T = {:8.1} K   Wien peak = {:9.1} nm   grid peak = {:8.1} nm",
        frame.temperature_k(),
        wien_peak_nm(frame.temperature_k()),
        frame.peak_wavelength_nm()
    );
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let params = args.sim.resolve()?;

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&params)?);
        return Ok(());
    }

    let series = compute_series(&params)?;
    let (initial, last) = series.comparison();

    println!("Bose–Einstein Cooling Spectrum");
    println!("==============================");
    println!(
        "T0 = {:.1} K, T_env = {:.1} K, k = {} 1/s, {} steps over {} s",
        params.initial_temperature_k,
        params.ambient_temperature_k,
        params.cooling_rate_per_s,
        params.steps,
        params.duration_s
    );
    println!(
        "{} wavelengths from {:.1} to {:.1} nm",
        series.grid().len(),
        series.grid().first_nm(),
        series.grid().last_nm()
    );
    println!();
    print_summary("Initial", initial);
    print_summary("Final", last);
    println!();

    if series.grid().len() < 2 {
        warn!("Need at least two wavelengths to draw charts, skipping output");
        return Ok(());
    }

    std::fs::create_dir_all(&args.output_dir)?;

    let comparison_path = args.output_dir.join("comparison.png");
    draw_comparison(&series, &comparison_path)?;
    info!("Wrote {}", comparison_path.display());
    println!("Comparison plot saved to: {}", comparison_path.display());

    if series.len() >= 2 {
        let surface_path = args.output_dir.join("surface.png");
        draw_surface(&series, &surface_path)?;
        info!("Wrote {}", surface_path.display());
        println!("Surface plot saved to: {}", surface_path.display());
    } else {
        warn!("Single time step, skipping surface plot");
    }

    if args.frames {
        let count = draw_animation_frames(&series, &args.output_dir)?;
        println!(
            "{} animation frames saved to: {}",
            count,
            args.output_dir.display()
        );
    }

    Ok(())
}
