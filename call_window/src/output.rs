use std::{io::Write, path::Path};

use anyhow::Context;
use compress_io::compress::CompressIo;

/// Write points as a variableStep wiggle track for chrom
pub fn write_wig<W: Write>(
    wrt: &mut W,
    chrom: &str,
    points: &[(usize, f64)],
) -> std::io::Result<()> {
    writeln!(wrt, "variableStep chrom={}", chrom)?;
    for (x, y) in points.iter() {
        writeln!(wrt, "{}\t{}", x, y)?
    }
    Ok(())
}

/// Write wiggle file to p, replacing any existing file
pub fn write_wig_file(p: &Path, chrom: &str, points: &[(usize, f64)]) -> anyhow::Result<()> {
    trace!("Opening {} for output", p.display());
    let mut wrt = CompressIo::new()
        .path(p)
        .bufwriter()
        .with_context(|| format!("Could not open {} for output", p.display()))?;
    write_wig(&mut wrt, chrom, points)
        .and_then(|_| wrt.flush())
        .with_context(|| format!("Error writing to {}", p.display()))?;
    debug!("Wrote {} points to {}", points.len(), p.display());
    Ok(())
}
