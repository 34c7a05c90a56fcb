use std::path::{Path, PathBuf};

/// Which kind of extrema are written out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    Maxima,
    Minima,
}

pub struct Config {
    input: PathBuf,
    delta: f64,
    marker: String,
    report: Report,
    output_file: Option<PathBuf>,
}

impl Config {
    pub fn new(input: PathBuf, delta: f64, marker: String) -> Self {
        Self {
            input,
            delta,
            marker,
            report: Report::Maxima,
            output_file: None,
        }
    }

    pub fn set_output_file(&mut self, p: PathBuf) {
        self.output_file = Some(p)
    }

    pub fn set_report(&mut self, r: Report) {
        self.report = r
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn report(&self) -> Report {
        self.report
    }

    pub fn output_file(&self) -> Option<&Path> {
        self.output_file.as_deref()
    }
}
