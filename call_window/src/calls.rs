use std::{io::BufRead, path::Path};

use anyhow::Context;
use compress_io::compress::CompressIo;
use utils::get_next_fields;

/// Per-base call and coverage counts for one chromosome
///
/// Both vectors are allocated at the full sequence length up front and are
/// only ever incremented.  A call is always counted as coverage as well, so
/// calls[i] <= coverage[i] for every position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallTrack {
    calls: Vec<u32>,
    coverage: Vec<u32>,
}

impl CallTrack {
    pub fn new(len: usize) -> Self {
        Self {
            calls: vec![0; len],
            coverage: vec![0; len],
        }
    }

    pub fn len(&self) -> usize {
        self.coverage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coverage.is_empty()
    }

    pub fn calls(&self) -> &[u32] {
        &self.calls
    }

    pub fn coverage(&self) -> &[u32] {
        &self.coverage
    }

    /// Record one observation at pos
    pub fn add(&mut self, pos: usize, called: bool) -> anyhow::Result<()> {
        let cov = self.coverage.get_mut(pos).ok_or_else(|| {
            anyhow!(
                "Position {} lies outside sequence of length {}",
                pos,
                self.calls.len()
            )
        })?;
        *cov += 1;
        if called {
            self.calls[pos] += 1
        }
        Ok(())
    }
}

/// Counts collected while reading a detect file
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReadStats {
    pub reads: usize,
    pub target_reads: usize,
    pub observations: usize,
    pub calls: usize,
}

/// Read detect data from p into track.  The file may be compressed
pub fn read_detect_file(
    p: &Path,
    target: &str,
    threshold: f64,
    track: &mut CallTrack,
) -> anyhow::Result<ReadStats> {
    trace!("Opening detect file {} for reading", p.display());
    let rdr = CompressIo::new()
        .path(p)
        .bufreader()
        .with_context(|| format!("Could not open {} for input", p.display()))?;
    read_detect_data(rdr, &p.display().to_string(), target, threshold, track)
}

/// Read detect records from rdr
///
/// Read headers start with '>' and give the chromosome as their second
/// field.  They are followed by `position score ...` lines for that read.
/// Records from reads on the target chromosome are added to track, with a
/// call counted where score > threshold.  Lines starting with '#' are
/// skipped, as are data lines seen before the first read header.
pub fn read_detect_data<R: BufRead>(
    mut rdr: R,
    name: &str,
    target: &str,
    threshold: f64,
    track: &mut CallTrack,
) -> anyhow::Result<ReadStats> {
    let mut buf = String::new();
    let mut line = 0;
    let mut stats = ReadStats::default();
    let mut on_target = false;

    while let Some(fields) = get_next_fields(&mut rdr, &mut buf)
        .with_context(|| format!("Error after reading {} lines from {}", line, name))?
    {
        line += 1;
        let Some(first) = fields.first() else {
            continue;
        };
        if first.starts_with('#') {
            continue;
        }
        if first.starts_with('>') {
            let ctg = fields
                .get(1)
                .ok_or_else(|| anyhow!("{}:{} Missing chromosome in read header", name, line))?;
            stats.reads += 1;
            on_target = *ctg == target;
            if on_target {
                stats.target_reads += 1
            }
            continue;
        }
        // Skip short lines
        if on_target && fields.len() >= 2 {
            let x = fields[0]
                .parse::<usize>()
                .with_context(|| format!("{}:{} Error reading position", name, line))?;
            let z = fields[1]
                .parse::<f64>()
                .with_context(|| format!("{}:{} Error reading score", name, line))?;
            let called = z > threshold;
            track
                .add(x, called)
                .with_context(|| format!("{}:{} Error adding call", name, line))?;
            stats.observations += 1;
            if called {
                stats.calls += 1
            }
        }
    }
    debug!(
        "Finished reading {} lines from {}: {} reads, {} on {}",
        line, name, stats.reads, stats.target_reads, target
    );
    Ok(stats)
}
