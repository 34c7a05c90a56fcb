use call_window::{
    calls::{read_detect_file, CallTrack},
    output::write_wig_file,
    plot::plot_ratios,
    window::{smooth, window_ratios},
};

use crate::config::Config;

/// Strategy
///
/// Collect call and coverage counts for the target chromosome in a single
/// pass through the detect file.  Windowed ratios are then computed from
/// the counts, smoothed, and written out as a wiggle track and plotted
/// (unless plotting is switched off)
pub fn process_calls(cfg: &Config) -> anyhow::Result<()> {
    debug!("Starting processing");
    let mut track = CallTrack::new(cfg.seq_length());
    let stats = read_detect_file(cfg.input(), cfg.target(), cfg.threshold(), &mut track)?;
    info!(
        "{} of {} reads on {}: {} observations, {} calls",
        stats.target_reads,
        stats.reads,
        cfg.target(),
        stats.observations,
        stats.calls
    );

    let ratios = window_ratios(&track, cfg.window());
    if ratios.is_empty() {
        warn!("No coverage found for {}", cfg.target())
    }
    debug!("{} windows with coverage", ratios.len());

    let y: Vec<f64> = ratios.iter().map(|w| w.ratio).collect();
    let points: Vec<(usize, f64)> = ratios
        .iter()
        .zip(smooth(&y, cfg.smooth()))
        .map(|(w, z)| (w.center, z))
        .collect();

    write_wig_file(cfg.output_file(), cfg.target(), &points)?;

    if let Some(p) = cfg.plot_file() {
        plot_ratios(p, cfg.target(), cfg.seq_length(), &ratios, &points)?
    }
    Ok(())
}
