use std::io::{BufRead, Write};

use anyhow::Context;
use compress_io::compress::CompressIo;

use wig_peaks::{peak::detect_peaks, segment::SegmentReader};

use crate::config::{Config, Report};

/// Strategy
///
/// Read the track one segment at a time.  Each segment is scanned on its
/// own with a fresh peak detector, and the header followed by the selected
/// extrema is written out before the next segment is read
pub fn process_track(cfg: &Config) -> anyhow::Result<()> {
    debug!("Starting processing");
    let input = cfg.input();
    trace!("Opening {} for reading", input.display());
    let rdr = CompressIo::new()
        .path(input)
        .bufreader()
        .with_context(|| format!("Could not open {} for input", input.display()))?;

    let mut wrt = CompressIo::new()
        .opt_path(cfg.output_file())
        .bufwriter()
        .with_context(|| "Failed to open output file")?;

    let name = input.display().to_string();
    write_extrema(rdr, &mut wrt, &name, cfg.marker(), cfg.delta(), cfg.report())?;
    wrt.flush().with_context(|| "Error writing output")?;
    Ok(())
}

/// Detect and write out extrema for every segment read from rdr.
/// Returns the number of segments processed
pub fn write_extrema<R: BufRead, W: Write>(
    rdr: R,
    wrt: &mut W,
    name: &str,
    marker: &str,
    delta: f64,
    report: Report,
) -> anyhow::Result<usize> {
    let mut segments = SegmentReader::new(rdr, name, marker);
    let mut n = 0;
    while let Some(seg) = segments.next_segment()? {
        n += 1;
        let ext = detect_peaks(seg.values(), seg.positions(), delta)
            .with_context(|| format!("Error detecting peaks for {}", seg.header()))?;
        debug!(
            "{}: {} points, {} maxima, {} minima",
            seg.contig().unwrap_or(seg.header()),
            seg.len(),
            ext.maxima.len(),
            ext.minima.len()
        );
        let v = match report {
            Report::Maxima => &ext.maxima,
            Report::Minima => &ext.minima,
        };
        writeln!(wrt, "{}", seg.header())?;
        for e in v.iter() {
            writeln!(wrt, "{}", e)?
        }
    }
    info!(
        "Processed {} segments from {} lines of {}",
        n,
        segments.lines(),
        name
    );
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACK: &str = "track type=wiggle_0\n\
        variableStep chrom=I\n\
        100\t0\n200\t10\n300\t0\n400\t10\n500\t0\n\
        variableStep chrom=II\n\
        100\t1\n200\t2\n300\t3\n\
        variableStep chrom=III\n\
        10\t0.5\n20\t0.9\n30\t0.1\n40\t0.6\n";

    fn run(report: Report, delta: f64) -> String {
        let mut out = Vec::new();
        write_extrema(TRACK.as_bytes(), &mut out, "test", "variableStep", delta, report).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn maxima_for_every_segment() {
        assert_eq!(
            run(Report::Maxima, 5.0),
            "variableStep chrom=I\n200\t10\n400\t10\n\
             variableStep chrom=II\n\
             variableStep chrom=III\n"
        );
        assert_eq!(
            run(Report::Maxima, 0.25),
            "variableStep chrom=I\n200\t10\n400\t10\n\
             variableStep chrom=II\n\
             variableStep chrom=III\n20\t0.9\n"
        );
    }

    #[test]
    fn minima() {
        assert_eq!(
            run(Report::Minima, 0.25),
            "variableStep chrom=I\n300\t0\n\
             variableStep chrom=II\n\
             variableStep chrom=III\n30\t0.1\n"
        );
    }

    #[test]
    fn segment_count() {
        let mut out = Vec::new();
        let n = write_extrema(
            TRACK.as_bytes(),
            &mut out,
            "test",
            "variableStep",
            1.0,
            Report::Maxima,
        )
        .unwrap();
        assert_eq!(n, 3);
    }

    #[test]
    fn track_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("track.wig");
        let output = dir.path().join("peaks.txt");
        std::fs::write(&input, TRACK).unwrap();

        let mut cfg = Config::new(input, 5.0, "variableStep".to_owned());
        cfg.set_output_file(output.clone());
        process_track(&cfg).unwrap();

        let s = std::fs::read_to_string(&output).unwrap();
        assert!(s.starts_with("variableStep chrom=I\n200\t10\n400\t10\n"));
        assert_eq!(s.lines().count(), 5);
    }

    #[test]
    fn missing_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::new(dir.path().join("none.wig"), 1.0, "variableStep".to_owned());
        assert!(process_track(&cfg).is_err());
    }
}
