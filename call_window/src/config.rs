use std::{
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

pub struct Config {
    input: PathBuf,
    target: String,
    seq_length: NonZeroUsize,
    window: NonZeroUsize,
    smooth: NonZeroUsize,
    threshold: f64,
    output_file: PathBuf,
    plot_file: Option<PathBuf>,
}

impl Config {
    pub fn new(
        input: PathBuf,
        target: String,
        seq_length: NonZeroUsize,
        window: NonZeroUsize,
        smooth: NonZeroUsize,
        output_file: PathBuf,
    ) -> Self {
        Self {
            input,
            target,
            seq_length,
            window,
            smooth,
            threshold: 0.7,
            output_file,
            plot_file: None,
        }
    }

    pub fn set_threshold(&mut self, t: f64) -> anyhow::Result<()> {
        if t.is_finite() {
            self.threshold = t;
            Ok(())
        } else {
            Err(anyhow!("Invalid call threshold {}", t))
        }
    }

    pub fn set_plot_file(&mut self, p: PathBuf) {
        self.plot_file = Some(p)
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn seq_length(&self) -> usize {
        self.seq_length.get()
    }

    pub fn window(&self) -> NonZeroUsize {
        self.window
    }

    pub fn smooth(&self) -> NonZeroUsize {
        self.smooth
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn output_file(&self) -> &Path {
        &self.output_file
    }

    /// None when plotting has been switched off
    pub fn plot_file(&self) -> Option<&Path> {
        self.plot_file.as_deref()
    }
}
