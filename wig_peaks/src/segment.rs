use std::io::BufRead;

use anyhow::Context;
use utils::get_next_fields;

/// One block of a wiggle track: the header line and the (position, value)
/// pairs that follow it
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    header: String,
    positions: Vec<f64>,
    values: Vec<f64>,
}

impl Segment {
    pub fn new(header: String) -> Self {
        Self {
            header,
            positions: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    /// Contig name from a `chrom=NAME` entry in the header, if present
    pub fn contig(&self) -> Option<&str> {
        self.header
            .split_ascii_whitespace()
            .find_map(|s| s.strip_prefix("chrom="))
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn push(&mut self, x: f64, v: f64) {
        self.positions.push(x);
        self.values.push(v);
    }
}

/// Splits a track into segments at lines containing the header marker
pub struct SegmentReader<R> {
    rdr: R,
    name: String,
    marker: String,
    buf: String,
    line: usize,
    current: Option<Segment>,
    orphans: usize,
}

impl<R: BufRead> SegmentReader<R> {
    /// name is only used to label error messages
    pub fn new(rdr: R, name: &str, marker: &str) -> Self {
        Self {
            rdr,
            name: name.to_owned(),
            marker: marker.to_owned(),
            buf: String::new(),
            line: 0,
            current: None,
            orphans: 0,
        }
    }

    /// Number of lines read so far
    pub fn lines(&self) -> usize {
        self.line
    }

    /// Returns the next complete segment, or None at the end of input
    pub fn next_segment(&mut self) -> anyhow::Result<Option<Segment>> {
        loop {
            let fields = match get_next_fields(&mut self.rdr, &mut self.buf).with_context(|| {
                format!("Error after reading {} lines from {}", self.line, self.name)
            })? {
                Some(f) => f,
                None => {
                    if self.orphans > 0 {
                        warn!(
                            "{}: {} data lines before the first header were ignored",
                            self.name, self.orphans
                        );
                        self.orphans = 0;
                    }
                    return Ok(self.current.take());
                }
            };
            self.line += 1;

            if fields.is_empty() || is_comment(fields[0]) {
                continue;
            }

            if fields.iter().any(|s| s.contains(self.marker.as_str())) {
                let seg = Segment::new(self.buf.trim().to_owned());
                trace!("{}:{} New segment {}", self.name, self.line, seg.header());
                if let Some(prev) = self.current.replace(seg) {
                    return Ok(Some(prev));
                }
                continue;
            }

            if fields.len() < 2 {
                return Err(anyhow!(
                    "{}:{} Expected position and value, found {:?}",
                    self.name,
                    self.line,
                    fields
                ));
            }
            let x = fields[0]
                .parse::<f64>()
                .with_context(|| format!("{}:{} Error reading position", self.name, self.line))?;
            let v = fields[1]
                .parse::<f64>()
                .with_context(|| format!("{}:{} Error reading value", self.name, self.line))?;

            match self.current.as_mut() {
                Some(seg) => seg.push(x, v),
                None => self.orphans += 1,
            }
        }
    }
}

// Wiggle track and browser lines carry display settings only
fn is_comment(s: &str) -> bool {
    s.starts_with('#') || s == "track" || s == "browser"
}
