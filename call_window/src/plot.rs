use std::{fmt::Display, path::Path};

use plotters::prelude::*;

use crate::window::WindowRatio;

const PLOT_SIZE: (u32, u32) = (1200, 400);

fn plot_err<E: Display>(e: E) -> anyhow::Error {
    anyhow!("Error drawing plot: {}", e)
}

/// Draw the windowed call ratios (grey) and their smoothed values (blue)
/// along the chromosome as an SVG file
pub fn plot_ratios(
    p: &Path,
    chrom: &str,
    seq_length: usize,
    raw: &[WindowRatio],
    smoothed: &[(usize, f64)],
) -> anyhow::Result<()> {
    trace!("Plotting {} windows to {}", raw.len(), p.display());
    let x_max = raw
        .iter()
        .map(|w| w.center)
        .fold(seq_length, usize::max)
        .max(1) as f64;

    let root = SVGBackend::new(p, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("chromosome {}", chrom), ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..x_max, 0f64..1f64)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Position")
        .y_desc("Fraction called")
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(LineSeries::new(
            raw.iter().map(|w| (w.center as f64, w.ratio)),
            &RGBColor(170, 170, 170),
        ))
        .map_err(plot_err)?;

    chart
        .draw_series(LineSeries::new(
            smoothed.iter().map(|&(x, y)| (x as f64, y)),
            &BLUE,
        ))
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    debug!("Plot written to {}", p.display());
    Ok(())
}
