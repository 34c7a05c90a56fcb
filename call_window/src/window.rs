use std::num::NonZeroUsize;

use crate::calls::CallTrack;

/// Fraction of observations called in one window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowRatio {
    pub center: usize,
    pub ratio: f64,
}

/// Split track into consecutive windows of width bases (the last one may be
/// shorter) and return the call ratio for each window with any coverage.
/// Windows without coverage have no ratio and are left out.
pub fn window_ratios(track: &CallTrack, width: NonZeroUsize) -> Vec<WindowRatio> {
    let w = width.get();
    track
        .coverage()
        .chunks(w)
        .zip(track.calls().chunks(w))
        .enumerate()
        .filter_map(|(ix, (cov, calls))| {
            let n: u64 = cov.iter().map(|&x| x as u64).sum();
            if n == 0 {
                None
            } else {
                let k: u64 = calls.iter().map(|&x| x as u64).sum();
                Some(WindowRatio {
                    center: ix * w + (w >> 1),
                    ratio: k as f64 / n as f64,
                })
            }
        })
        .collect()
}

/// Centered moving average of width samples.
///
/// Output j averages v[j - width/2 ..= j + (width-1)/2], the same alignment
/// as a "same" mode convolution.  Near the ends only the samples that
/// exist are averaged, so the edges are not pulled towards zero.
pub fn smooth(v: &[f64], width: NonZeroUsize) -> Vec<f64> {
    let k = width.get();
    let (before, after) = (k >> 1, (k - 1) >> 1);
    let n = v.len();
    (0..n)
        .map(|j| {
            let a = j.saturating_sub(before);
            let b = (j + after + 1).min(n);
            v[a..b].iter().sum::<f64>() / (b - a) as f64
        })
        .collect()
}
