//! Running integral of a uniformly sampled signal by Simpson's 1/3 rule.

use crate::error::{ensure_positive, Result};

/// Accumulates the definite integral of a sampled signal.
///
/// Samples are spaced `h` seconds apart. Simpson's rule needs pairs of
/// sub-intervals, so a segment spanning `2h` is committed on every odd
/// sample count from the third sample on: samples 1..=3 form the first
/// segment, samples 3..=5 the second, and so on. On even counts the window
/// rolls forward without touching the integral.
///
/// # Example
///
/// ```rust
/// use imu_dsp::SimpsonIntegrator;
///
/// let mut integrator = SimpsonIntegrator::new(0.5)?;
/// for _ in 0..5 {
///     integrator.integrate(1.0);
/// }
/// // two segments, each 2h wide
/// assert!((integrator.integral() - 2.0).abs() < 1e-12);
/// # Ok::<(), imu_dsp::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimpsonIntegrator {
    integral: f64,
    /// y[-1]
    y_1: f64,
    /// y[-2]
    y_2: f64,
    h: f64,
    /// Always `h / 6`.
    h_d: f64,
    samples: u64,
}

impl SimpsonIntegrator {
    /// Creates an integrator for samples spaced `h` apart.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NonPositive`] if `h` is not positive.
    pub fn new(h: f64) -> Result<Self> {
        let h = ensure_positive("h", h)?;
        Ok(Self {
            integral: 0.0,
            y_1: 0.0,
            y_2: 0.0,
            h,
            h_d: h / 6.0,
            samples: 0,
        })
    }

    /// Feeds one sample and returns the committed integral.
    pub fn integrate(&mut self, y_0: f64) -> f64 {
        self.samples += 1;
        if self.samples >= 3 && self.samples % 2 == 1 {
            // segment width is 2h, so the weight is 2h / 6 = h / 3
            self.integral += 2.0 * self.h_d * (self.y_2 + 4.0 * self.y_1 + y_0);
        }
        self.y_2 = self.y_1;
        self.y_1 = y_0;
        self.integral
    }

    /// The integral over all committed segments.
    #[must_use]
    pub fn integral(&self) -> f64 {
        self.integral
    }

    /// The committed integral plus a trapezoid over the trailing
    /// sub-interval that has not been committed yet.
    #[must_use]
    pub fn estimate(&self) -> f64 {
        if self.samples >= 2 && self.samples % 2 == 0 {
            // h / 2 = 3 * h / 6
            self.integral + 3.0 * self.h_d * (self.y_2 + self.y_1)
        } else {
            self.integral
        }
    }

    /// Sample spacing.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.h
    }

    /// Changes the sample spacing for future segments. The accumulated
    /// integral is kept as is.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NonPositive`] if `h` is not positive; the
    /// current step is kept in that case.
    pub fn set_step(&mut self, h: f64) -> Result<()> {
        self.h = ensure_positive("h", h)?;
        self.h_d = self.h / 6.0;
        Ok(())
    }

    /// Number of samples seen.
    #[must_use]
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Clears the integral and the sample window, keeping the step.
    pub fn reset(&mut self) {
        *self = Self {
            integral: 0.0,
            y_1: 0.0,
            y_2: 0.0,
            samples: 0,
            ..*self
        };
    }
}
