use std::fmt;

use thiserror::Error;

/// Validation failures for the peak scan inputs
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum InvalidInput {
    #[error("Input vectors must have the same length (values: {values}, positions: {positions})")]
    LengthMismatch { values: usize, positions: usize },
    #[error("Delta must be a positive number (got {0})")]
    InvalidDelta(f64),
}

/// Check that delta is usable as a hysteresis threshold
pub fn validate_delta(delta: f64) -> Result<f64, InvalidInput> {
    if delta.is_finite() && delta > 0.0 {
        Ok(delta)
    } else {
        Err(InvalidInput::InvalidDelta(delta))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremum {
    pub position: f64,
    pub value: f64,
}

impl Extremum {
    fn new(position: f64, value: f64) -> Self {
        Self { position, value }
    }
}

impl fmt::Display for Extremum {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\t{}", self.position, self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    SeekingMax,
    SeekingMin,
}

/// A confirmed turning point, emitted when the signal has moved back
/// by more than delta from the running extreme
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Max(Extremum),
    Min(Extremum),
}

/// Hysteresis extrema tracker
///
/// Fed one sample at a time in position order.  While seeking a maximum the
/// highest value seen so far is held until a sample falls more than delta
/// below it, at which point it is reported and the scanner switches to
/// seeking a minimum (and vice versa).  Ties keep the first position seen.
#[derive(Debug, Clone)]
pub struct PeakScanner {
    delta: f64,
    mode: Mode,
    max: Extremum,
    min: Extremum,
}

impl PeakScanner {
    pub fn new(delta: f64) -> Result<Self, InvalidInput> {
        let delta = validate_delta(delta)?;
        Ok(Self {
            delta,
            mode: Mode::SeekingMax,
            max: Extremum::new(f64::NAN, f64::NEG_INFINITY),
            min: Extremum::new(f64::NAN, f64::INFINITY),
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Transition function: consume one sample and return the extremum
    /// confirmed by it, if any
    pub fn step(&mut self, position: f64, value: f64) -> Option<Event> {
        let here = Extremum::new(position, value);
        if value > self.max.value {
            self.max = here
        }
        if value < self.min.value {
            self.min = here
        }
        match self.mode {
            Mode::SeekingMax if value < self.max.value - self.delta => {
                let peak = self.max;
                self.min = here;
                self.mode = Mode::SeekingMin;
                Some(Event::Max(peak))
            }
            Mode::SeekingMin if value > self.min.value + self.delta => {
                let trough = self.min;
                self.max = here;
                self.mode = Mode::SeekingMax;
                Some(Event::Min(trough))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Extrema {
    pub maxima: Vec<Extremum>,
    pub minima: Vec<Extremum>,
}

/// Find the local maxima and minima of values, reporting them at the
/// matching entries of positions.  A maximum is only confirmed once the
/// signal has dropped by more than delta after it, and a minimum once the
/// signal has risen by more than delta.
pub fn detect_peaks(
    values: &[f64],
    positions: &[f64],
    delta: f64,
) -> Result<Extrema, InvalidInput> {
    if values.len() != positions.len() {
        return Err(InvalidInput::LengthMismatch {
            values: values.len(),
            positions: positions.len(),
        });
    }
    let mut scanner = PeakScanner::new(delta)?;
    let mut extrema = Extrema::default();
    for (&x, &v) in positions.iter().zip(values) {
        match scanner.step(x, v) {
            Some(Event::Max(e)) => extrema.maxima.push(e),
            Some(Event::Min(e)) => extrema.minima.push(e),
            None => (),
        }
    }
    Ok(extrema)
}

/// As [`detect_peaks`], using the sample index as position
pub fn detect_peaks_by_index(values: &[f64], delta: f64) -> Result<Extrema, InvalidInput> {
    let positions: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();
    detect_peaks(values, &positions, delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn pairs(v: &[Extremum]) -> Vec<(f64, f64)> {
        v.iter().map(|e| (e.position, e.value)).collect()
    }

    #[test]
    fn alternating_signal() {
        let ext = detect_peaks(
            &[0.0, 10.0, 0.0, 10.0, 0.0],
            &[0.0, 1.0, 2.0, 3.0, 4.0],
            5.0,
        )
        .unwrap();
        assert_eq!(pairs(&ext.maxima), vec![(1.0, 10.0), (3.0, 10.0)]);
        assert_eq!(pairs(&ext.minima), vec![(2.0, 0.0)]);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let e = detect_peaks(&[1.0, 2.0, 3.0], &[1.0, 2.0], 1.0).unwrap_err();
        assert_eq!(
            e,
            InvalidInput::LengthMismatch {
                values: 3,
                positions: 2
            }
        );
    }

    #[test]
    fn length_is_checked_before_delta() {
        let e = detect_peaks(&[1.0], &[], -1.0).unwrap_err();
        assert!(matches!(e, InvalidInput::LengthMismatch { .. }));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-0.5)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn bad_delta_is_rejected(#[case] delta: f64) {
        let e = detect_peaks(&[1.0, 2.0], &[1.0, 2.0], delta).unwrap_err();
        assert!(matches!(e, InvalidInput::InvalidDelta(_)));
        assert!(PeakScanner::new(delta).is_err());
    }

    #[rstest]
    #[case(0.1)]
    #[case(1.0)]
    #[case(100.0)]
    fn flat_signal_has_no_extrema(#[case] delta: f64) {
        let ext = detect_peaks_by_index(&[5.0, 5.0, 5.0, 5.0], delta).unwrap();
        assert_eq!(ext, Extrema::default());
    }

    #[test]
    fn rising_signal_has_no_extrema() {
        let v: Vec<f64> = (0..50).map(|i| i as f64 * 3.0).collect();
        assert_eq!(detect_peaks_by_index(&v, 1.0).unwrap(), Extrema::default());
    }

    #[test]
    fn falling_signal_confirms_first_sample() {
        // The first sample is the running maximum, so the first fall
        // below it by more than delta reports it
        let w: Vec<f64> = (0..50).rev().map(|i| i as f64 * 3.0).collect();
        let ext = detect_peaks_by_index(&w, 1.0).unwrap();
        assert_eq!(pairs(&ext.maxima), vec![(0.0, 147.0)]);
        assert!(ext.minima.is_empty());
    }

    #[test]
    fn empty_input() {
        assert_eq!(detect_peaks(&[], &[], 1.0).unwrap(), Extrema::default());
    }

    #[test]
    fn plateau_keeps_first_position() {
        let ext = detect_peaks(
            &[0.0, 10.0, 10.0, 10.0, 0.0, 0.0, 0.0, 8.0],
            &[100.0, 200.0, 300.0, 400.0, 500.0, 600.0, 700.0, 800.0],
            5.0,
        )
        .unwrap();
        assert_eq!(pairs(&ext.maxima), vec![(200.0, 10.0)]);
        assert_eq!(pairs(&ext.minima), vec![(500.0, 0.0)]);
    }

    #[test]
    fn small_wiggles_are_ignored() {
        let v = [0.0, 1.0, 0.5, 1.2, 0.9, 6.0, 5.5, 6.2, 0.0];
        let ext = detect_peaks_by_index(&v, 2.0).unwrap();
        assert_eq!(pairs(&ext.maxima), vec![(7.0, 6.2)]);
        assert!(ext.minima.is_empty());
    }

    #[test]
    fn negative_values() {
        let v = [-3.0, -1.0, -4.0, -0.5, -6.0];
        let ext = detect_peaks_by_index(&v, 1.5).unwrap();
        assert_eq!(pairs(&ext.maxima), vec![(1.0, -1.0), (3.0, -0.5)]);
        assert_eq!(pairs(&ext.minima), vec![(2.0, -4.0)]);
    }

    #[test]
    fn drop_must_exceed_delta() {
        // A fall of exactly delta does not confirm the peak
        let ext = detect_peaks_by_index(&[0.0, 5.0, 0.0], 5.0).unwrap();
        assert!(ext.maxima.is_empty());
        let ext = detect_peaks_by_index(&[0.0, 5.0, -0.1], 5.0).unwrap();
        assert_eq!(pairs(&ext.maxima), vec![(1.0, 5.0)]);
    }

    #[test]
    fn scanner_transitions() {
        let mut s = PeakScanner::new(2.0).unwrap();
        assert_eq!(s.mode(), Mode::SeekingMax);
        assert_eq!(s.step(1.0, 1.0), None);
        assert_eq!(s.step(2.0, 4.0), None);
        assert_eq!(s.step(3.0, 3.0), None);
        assert_eq!(
            s.step(4.0, 1.5),
            Some(Event::Max(Extremum::new(2.0, 4.0)))
        );
        assert_eq!(s.mode(), Mode::SeekingMin);
        assert_eq!(s.step(5.0, 1.0), None);
        assert_eq!(s.step(6.0, 2.5), None);
        assert_eq!(
            s.step(7.0, 3.5),
            Some(Event::Min(Extremum::new(5.0, 1.0)))
        );
        assert_eq!(s.mode(), Mode::SeekingMax);
    }

    #[test]
    fn extremum_display() {
        assert_eq!(Extremum::new(1500.0, 0.25).to_string(), "1500\t0.25");
        assert_eq!(Extremum::new(12.5, -3.0).to_string(), "12.5\t-3");
    }
}
