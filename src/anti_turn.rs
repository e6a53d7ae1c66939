//! Compensation of slow tilt drift.
//!
//! A small bias on the sensor board, smeared out by filtering, shows up as a
//! tilt that slowly creeps even when the sensor is still, which downstream
//! looks like the sensor turning. [`AntiTurnCorrector`] tracks that bias with
//! a very slow low-pass and removes it.

use crate::axis::Vector3;
use crate::error::{ensure_unit_interval, Result};

/// Default bias update coefficient.
pub const DEFAULT_BIAS_ALPHA: f64 = 0.001;

/// Tracks and removes a slowly drifting tilt bias.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AntiTurnCorrector {
    alpha: f64,
    tilt: Vector3,
}

impl Default for AntiTurnCorrector {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_BIAS_ALPHA,
            tilt: Vector3::zeros(),
        }
    }
}

impl AntiTurnCorrector {
    /// Creates a corrector with bias update coefficient `alpha`.
    ///
    /// Keep `alpha` small compared to the smoothing of the main signal path,
    /// otherwise genuine tilt changes are treated as bias.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::CoefficientOutOfRange`] if `alpha` is outside
    /// `[0, 1]`.
    pub fn new(alpha: f64) -> Result<Self> {
        Ok(Self {
            alpha: ensure_unit_interval("alpha", alpha)?,
            tilt: Vector3::zeros(),
        })
    }

    /// Updates the bias estimate with `tilt` and returns `tilt - bias`.
    pub fn correct(&mut self, tilt: &Vector3) -> Vector3 {
        self.tilt += self.alpha * (tilt - self.tilt);
        tilt - self.tilt
    }

    /// The current bias estimate.
    #[must_use]
    pub fn bias(&self) -> &Vector3 {
        &self.tilt
    }

    /// Forgets the bias estimate.
    pub fn reset(&mut self) {
        self.tilt = Vector3::zeros();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn constant_bias_is_removed() {
        let mut corrector = AntiTurnCorrector::new(0.01).unwrap();
        let biased = Vector3::new(0.02, -0.05, 0.001);

        let first = corrector.correct(&biased);
        let mut corrected = first;
        for _ in 0..3000 {
            corrected = corrector.correct(&biased);
        }

        assert!(corrected.norm() < first.norm());
        assert_abs_diff_eq!(corrected, Vector3::zeros(), epsilon = 1e-12);
        assert_abs_diff_eq!(*corrector.bias(), biased, epsilon = 1e-12);
    }

    #[test]
    fn fast_changes_pass_through() {
        let mut corrector = AntiTurnCorrector::default();
        let step = Vector3::new(0.5, 0.0, 0.0);
        let corrected = corrector.correct(&step);
        assert_abs_diff_eq!(corrected.x, 0.5 * (1.0 - DEFAULT_BIAS_ALPHA), epsilon = 1e-15);
    }

    #[test]
    fn rejects_out_of_range_alpha() {
        assert!(AntiTurnCorrector::new(1.01).is_err());
        assert!(AntiTurnCorrector::new(-0.5).is_err());
    }
}
