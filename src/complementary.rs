//! Complementary fusion of a measured and a rate-integrated estimate.

use crate::error::{ensure_positive, ensure_unit_interval, Result};

/// Number of fused estimates kept in the history.
pub const HISTORY_LEN: usize = 4;

/// Blends a directly measured estimate with a rate-integrated estimate of
/// the same quantity.
///
/// The weights satisfy `a + b = 1`: `a` weights the rate-integrated branch,
/// which tracks fast motion but drifts, and `b = 1 - a` weights the measured
/// branch, which is noisy but free of drift.
///
/// # Example
///
/// ```rust
/// use imu_dsp::ComplementaryIntegrator;
///
/// let mut tilt = ComplementaryIntegrator::new(0.98)?;
/// let fused = tilt.fuse(1.0, 0.0);
/// assert!((fused - 0.02).abs() < 1e-12);
/// assert_eq!(tilt.estimate(), fused);
/// # Ok::<(), imu_dsp::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComplementaryIntegrator {
    a: f64,
    b: f64,
    /// Fused estimates, newest first.
    history: [f64; HISTORY_LEN],
}

impl ComplementaryIntegrator {
    /// Creates an integrator weighting the rate-integrated branch with `a`
    /// and the measured branch with `1 - a`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::CoefficientOutOfRange`] if `a` is outside
    /// `[0, 1]`.
    pub fn new(a: f64) -> Result<Self> {
        let a = ensure_unit_interval("a", a)?;
        Ok(Self {
            a,
            b: 1.0 - a,
            history: [0.0; HISTORY_LEN],
        })
    }

    /// Weight of the rate-integrated estimate.
    #[must_use]
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Weight of the measured estimate.
    #[must_use]
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Fuses one pair of estimates and records the result.
    pub fn fuse(&mut self, measured: f64, rate_integrated: f64) -> f64 {
        let fused = self.a * rate_integrated + self.b * measured;
        self.history.rotate_right(1);
        self.history[0] = fused;
        fused
    }

    /// Integrates `rate` over `dt` seconds starting from the current best
    /// estimate, then fuses the result with `measured`.
    pub fn fuse_rate(&mut self, measured: f64, rate: f64, dt: f64) -> f64 {
        self.fuse(measured, self.history[0] + rate * dt)
    }

    /// The most recent fused estimate.
    #[must_use]
    pub fn estimate(&self) -> f64 {
        self.history[0]
    }

    /// The last fused estimates, newest first.
    #[must_use]
    pub fn history(&self) -> &[f64; HISTORY_LEN] {
        &self.history
    }

    /// Backward difference of the two newest estimates over `dt` seconds.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NonPositive`] if `dt` is not positive.
    pub fn rate(&self, dt: f64) -> Result<f64> {
        let dt = ensure_positive("dt", dt)?;
        Ok((self.history[0] - self.history[1]) / dt)
    }

    /// Clears the history.
    pub fn reset(&mut self) {
        self.history = [0.0; HISTORY_LEN];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const MEASURED: [f64; 6] = [0.3, -1.2, 5.0, 0.0, 7.25, -0.5];
    const INTEGRATED: [f64; 6] = [1.0, 2.5, -3.0, 0.125, 4.0, 9.0];

    #[test]
    fn pure_rate_branch() {
        let mut fusion = ComplementaryIntegrator::new(1.0).unwrap();
        for (m, r) in MEASURED.into_iter().zip(INTEGRATED) {
            assert_eq!(fusion.fuse(m, r), r);
        }
    }

    #[test]
    fn pure_measured_branch() {
        let mut fusion = ComplementaryIntegrator::new(0.0).unwrap();
        for (m, r) in MEASURED.into_iter().zip(INTEGRATED) {
            assert_eq!(fusion.fuse(m, r), m);
        }
    }

    #[test]
    fn history_shifts_newest_first() {
        let mut fusion = ComplementaryIntegrator::new(1.0).unwrap();
        for r in [1.0, 2.0, 3.0, 4.0, 5.0] {
            fusion.fuse(0.0, r);
        }
        assert_eq!(fusion.history(), &[5.0, 4.0, 3.0, 2.0]);
        assert_eq!(fusion.estimate(), 5.0);
        assert_relative_eq!(fusion.rate(0.5).unwrap(), 2.0);
    }

    #[test]
    fn fuse_rate_tracks_rotation_without_drift() {
        let mut fusion = ComplementaryIntegrator::new(0.98).unwrap();
        let dt = 0.01;
        let bias = 0.05;

        // sensor at rest at 0.2 rad, gyro reports a constant bias
        for _ in 0..2000 {
            fusion.fuse_rate(0.2, bias, dt);
        }

        // steady state: x = 0.2 + a * bias * dt / b
        assert_relative_eq!(fusion.estimate(), 0.2 + 0.98 * bias * dt / 0.02, epsilon = 1e-9);
    }

    #[test]
    fn weights_are_complementary() {
        let fusion = ComplementaryIntegrator::new(0.75).unwrap();
        assert_relative_eq!(fusion.a() + fusion.b(), 1.0);
        assert!(ComplementaryIntegrator::new(-0.1).is_err());
        assert!(fusion.rate(0.0).is_err());
    }
}
