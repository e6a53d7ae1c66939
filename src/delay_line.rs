//! Fixed-capacity ring buffer of past samples.

/// Delay line holding the last `len` samples, newest first when read back.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct DelayLine {
    samples: Vec<f64>,
    /// Slot the next sample is written to.
    head: usize,
}

impl DelayLine {
    /// Creates a zero-filled delay line. `len` must be non-zero.
    pub(crate) fn new(len: usize) -> Self {
        debug_assert!(len > 0);
        Self {
            samples: vec![0.0; len],
            head: 0,
        }
    }

    /// Stores `x` as the newest sample, overwriting the oldest one.
    pub(crate) fn push(&mut self, x: f64) {
        self.samples[self.head] = x;
        self.head = (self.head + 1) % self.samples.len();
    }

    /// Dot product of `taps` with the stored samples, `taps[k]` weighting
    /// the sample of age `k`.
    pub(crate) fn convolve(&self, taps: &[f64]) -> f64 {
        debug_assert_eq!(taps.len(), self.samples.len());
        // newest sample sits just before `head`, walking backwards ages it
        let (recent, stale) = self.samples.split_at(self.head);
        stale
            .iter()
            .chain(recent)
            .rev()
            .zip(taps)
            .map(|(x, h)| x * h)
            .sum()
    }

    pub(crate) fn clear(&mut self) {
        self.samples.fill(0.0);
        self.head = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_around() {
        let mut line = DelayLine::new(3);
        for x in 1..=5 {
            line.push(f64::from(x));
        }

        assert_eq!(line.convolve(&[1.0, 0.0, 0.0]), 5.0);
        assert_eq!(line.convolve(&[0.0, 1.0, 0.0]), 4.0);
        assert_eq!(line.convolve(&[0.0, 0.0, 1.0]), 3.0);
    }

    #[test]
    fn convolve_aligns_taps_with_age() {
        let mut line = DelayLine::new(4);
        for x in [1.0, 2.0, 3.0, 4.0, 5.0, 6.0] {
            line.push(x);
        }

        // ages 0..4 hold 6, 5, 4, 3
        assert_eq!(line.convolve(&[1.0, 0.0, 0.0, 0.0]), 6.0);
        assert_eq!(line.convolve(&[0.0, 0.0, 0.0, 1.0]), 3.0);
        assert_eq!(line.convolve(&[1.0, 10.0, 100.0, 1000.0]), 3456.0);
    }

    #[test]
    fn clear_zeroes_history() {
        let mut line = DelayLine::new(2);
        line.push(7.0);
        line.clear();
        assert_eq!(line.convolve(&[1.0, 1.0]), 0.0);
    }
}
