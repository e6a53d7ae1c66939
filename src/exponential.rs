//! Single-pole exponential filters over a bank of independent channels.

use core::f64::consts::PI;

use nalgebra::SVector;

use crate::error::{ensure_positive, ensure_unit_interval, Error, Result};

/// Time constant `RC` of a first-order section with cutoff `freq`.
fn time_constant(freq: f64, dt: f64) -> Result<(f64, f64)> {
    let freq = ensure_positive("cutoff frequency", freq)?;
    let dt = ensure_positive("sampling period", dt)?;
    Ok((1.0 / (2.0 * PI * freq), dt))
}

fn check_channel<const N: usize>(channel: usize) -> Result<()> {
    if channel < N {
        Ok(())
    } else {
        Err(Error::ChannelOutOfRange {
            index: channel,
            channels: N,
        })
    }
}

/// Exponential low-pass filter for `N` channels.
///
/// Each channel follows `y = a * x + (1 - a) * y_prev`, starting from zero.
///
/// # Example
///
/// ```rust
/// use imu_dsp::ExponentialLowPass;
///
/// let mut filter = ExponentialLowPass::<3>::new(0.5)?;
/// assert_eq!(filter.update(1, 2.0)?, 1.0);
/// assert_eq!(filter.update(1, 2.0)?, 1.5);
///
/// // other channels are untouched
/// assert_eq!(filter.last_output()[0], 0.0);
/// # Ok::<(), imu_dsp::Error>(())
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExponentialLowPass<const N: usize> {
    alpha: f64,
    y: SVector<f64, N>,
}

impl<const N: usize> ExponentialLowPass<N> {
    /// Creates a filter with smoothing coefficient `alpha` in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CoefficientOutOfRange`] if `alpha` is outside `[0, 1]`.
    pub fn new(alpha: f64) -> Result<Self> {
        Ok(Self {
            alpha: ensure_unit_interval("alpha", alpha)?,
            y: SVector::zeros(),
        })
    }

    /// Creates a filter from a cutoff frequency in Hz and a sampling period
    /// in seconds, using `alpha = dt / (RC + dt)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonPositive`] if either argument is not positive.
    pub fn with_cutoff_freq(freq: f64, dt: f64) -> Result<Self> {
        let (rc, dt) = time_constant(freq, dt)?;
        Self::new(dt / (rc + dt))
    }

    /// The smoothing coefficient.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Number of channels.
    #[must_use]
    pub fn channels(&self) -> usize {
        N
    }

    /// The most recent output of every channel.
    #[must_use]
    pub fn last_output(&self) -> &SVector<f64, N> {
        &self.y
    }

    /// Filters one sample of a single channel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelOutOfRange`] if `channel >= N`; no state is
    /// modified in that case.
    pub fn update(&mut self, channel: usize, x: f64) -> Result<f64> {
        check_channel::<N>(channel)?;
        let y = self.alpha * x + (1.0 - self.alpha) * self.y[channel];
        self.y[channel] = y;
        Ok(y)
    }

    /// Filters one sample of every channel.
    pub fn filter(&mut self, x: SVector<f64, N>) -> SVector<f64, N> {
        self.y = self.alpha * x + (1.0 - self.alpha) * self.y;
        self.y
    }

    /// Clears the stored outputs.
    pub fn reset(&mut self) {
        self.y = SVector::zeros();
    }
}

/// Exponential high-pass filter for `N` channels.
///
/// Each channel follows `y = a * (y_prev + x - x_prev)`, starting from zero.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExponentialHighPass<const N: usize> {
    alpha: f64,
    x: SVector<f64, N>,
    y: SVector<f64, N>,
}

impl<const N: usize> ExponentialHighPass<N> {
    /// Creates a filter with coefficient `alpha` in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CoefficientOutOfRange`] if `alpha` is outside `[0, 1]`.
    pub fn new(alpha: f64) -> Result<Self> {
        Ok(Self {
            alpha: ensure_unit_interval("alpha", alpha)?,
            x: SVector::zeros(),
            y: SVector::zeros(),
        })
    }

    /// Creates a filter from a cutoff frequency in Hz and a sampling period
    /// in seconds, using `alpha = RC / (RC + dt)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonPositive`] if either argument is not positive.
    pub fn with_cutoff_freq(freq: f64, dt: f64) -> Result<Self> {
        let (rc, dt) = time_constant(freq, dt)?;
        Self::new(rc / (rc + dt))
    }

    /// The filter coefficient.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Number of channels.
    #[must_use]
    pub fn channels(&self) -> usize {
        N
    }

    /// The most recent output of every channel.
    #[must_use]
    pub fn last_output(&self) -> &SVector<f64, N> {
        &self.y
    }

    /// Filters one sample of a single channel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelOutOfRange`] if `channel >= N`; no state is
    /// modified in that case.
    pub fn update(&mut self, channel: usize, x: f64) -> Result<f64> {
        check_channel::<N>(channel)?;
        let y = self.alpha * (self.y[channel] + x - self.x[channel]);
        self.x[channel] = x;
        self.y[channel] = y;
        Ok(y)
    }

    /// Filters one sample of every channel.
    pub fn filter(&mut self, x: SVector<f64, N>) -> SVector<f64, N> {
        self.y = self.alpha * (self.y + x - self.x);
        self.x = x;
        self.y
    }

    /// Clears the stored inputs and outputs.
    pub fn reset(&mut self) {
        self.x = SVector::zeros();
        self.y = SVector::zeros();
    }
}
