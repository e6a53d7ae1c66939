//! Windowed-sinc FIR filters.
//!
//! Coefficients are designed once at construction, in a fixed order:
//!
//! 1. the ideal (truncated sinc) kernel for the requested [`Band`],
//! 2. an optional Hamming window,
//! 3. an optional normalization to unity passband gain.
//!
//! Windowing changes the achieved passband gain, so normalization always
//! runs last.

use core::f64::consts::PI;

use crate::delay_line::DelayLine;
use crate::error::{ensure_positive, Error, Result};

/// Smallest passband gain a kernel may have before normalization.
const MIN_REFERENCE_GAIN: f64 = 1e-9;

/// Design parameters shared by every [`FirFilter`] band.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FirParameters {
    /// Filter order, i.e. the number of coefficients minus one.
    pub order: usize,
    /// Sampling frequency in Hz.
    pub sampling_frequency: f64,
    /// Apply a Hamming window to the ideal kernel.
    pub window: bool,
    /// Rescale the coefficients to unity passband gain.
    pub normalize: bool,
}

impl Default for FirParameters {
    fn default() -> Self {
        Self {
            order: 32,
            sampling_frequency: 100.0,
            window: true,
            normalize: true,
        }
    }
}

/// The pass band of a [`FirFilter`], frequencies in Hz.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Band {
    /// Pass frequencies below `cutoff`.
    LowPass {
        /// Cutoff frequency.
        cutoff: f64,
    },
    /// Pass frequencies above `cutoff`.
    HighPass {
        /// Cutoff frequency.
        cutoff: f64,
    },
    /// Pass frequencies between `low` and `high`.
    BandPass {
        /// Lower band edge.
        low: f64,
        /// Upper band edge.
        high: f64,
    },
}

impl Band {
    /// Frequency at which the passband gain is normalized to one.
    fn reference_frequency(self, sampling_frequency: f64) -> f64 {
        match self {
            Self::LowPass { .. } => 0.0,
            Self::HighPass { .. } => sampling_frequency / 2.0,
            Self::BandPass { low, high } => (low + high) / 2.0,
        }
    }
}

/// Single-channel FIR filter with a windowed-sinc kernel.
///
/// One instance filters one signal; use one filter per axis for vector
/// signals. The delay line starts zeroed, so the first `order` outputs carry
/// a start-up transient.
///
/// # Example
///
/// ```rust
/// use imu_dsp::{FirFilter, FirParameters};
///
/// let params = FirParameters {
///     order: 4,
///     sampling_frequency: 100.0,
///     window: true,
///     normalize: true,
/// };
/// let mut filter = FirFilter::low_pass(params, 10.0)?;
///
/// // a constant signal passes with unity gain once the delay line is full
/// let mut y = 0.0;
/// for _ in 0..5 {
///     y = filter.update(2.0);
/// }
/// assert!((y - 2.0).abs() < 1e-12);
/// # Ok::<(), imu_dsp::Error>(())
/// ```
///
/// With the `serde` feature only the design is serialized. Deserializing
/// redesigns the kernel, rejecting invalid designs, and starts from an
/// empty delay line.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "FirDesign", into = "FirDesign")
)]
pub struct FirFilter {
    params: FirParameters,
    band: Band,
    /// `taps[k]` weights the input of age `k`.
    taps: Vec<f64>,
    delay: DelayLine,
}

impl FirFilter {
    /// Designs a filter for `band`.
    ///
    /// # Errors
    ///
    /// Fails with an invalid-configuration [`Error`] if the order is zero,
    /// the sampling frequency is not positive, a cutoff lies outside
    /// `(0, fs / 2)`, band edges are not increasing, a high-pass filter
    /// has an odd order, or normalization is requested for a kernel with
    /// next to no passband gain.
    pub fn new(params: FirParameters, band: Band) -> Result<Self> {
        let fs = ensure_positive("sampling frequency", params.sampling_frequency)?;
        if params.order == 0 {
            return Err(Error::InvalidOrder { order: 0 });
        }

        let taps = match band {
            Band::LowPass { cutoff } => {
                check_cutoff(cutoff, fs)?;
                ideal_low_pass(params.order, cutoff / fs)
            }
            Band::HighPass { cutoff } => {
                check_cutoff(cutoff, fs)?;
                if params.order % 2 != 0 {
                    return Err(Error::OddHighPassOrder {
                        order: params.order,
                    });
                }
                let mut taps = ideal_low_pass(params.order, cutoff / fs);
                taps.iter_mut().for_each(|h| *h = -*h);
                taps[params.order / 2] += 1.0;
                taps
            }
            Band::BandPass { low, high } => {
                check_cutoff(low, fs)?;
                check_cutoff(high, fs)?;
                if low >= high {
                    return Err(Error::InvalidBand { low, high });
                }
                let below_low = ideal_low_pass(params.order, low / fs);
                ideal_low_pass(params.order, high / fs)
                    .into_iter()
                    .zip(below_low)
                    .map(|(h_high, h_low)| h_high - h_low)
                    .collect()
            }
        };

        let mut filter = Self {
            params,
            band,
            delay: DelayLine::new(taps.len()),
            taps,
        };

        if params.window {
            apply_hamming(&mut filter.taps);
        }

        if params.normalize {
            let frequency = band.reference_frequency(fs);
            let gain = filter.gain(frequency);
            if gain.is_nan() || gain < MIN_REFERENCE_GAIN {
                return Err(Error::DegenerateGain { frequency, gain });
            }
            filter.taps.iter_mut().for_each(|h| *h /= gain);
        }

        log::debug!(
            "designed {:?} FIR filter: order {}, fs {} Hz, window {}, normalized {}",
            band,
            params.order,
            fs,
            params.window,
            params.normalize
        );

        Ok(filter)
    }

    /// Designs a low-pass filter with cutoff `cutoff` Hz.
    ///
    /// # Errors
    ///
    /// See [`FirFilter::new`].
    pub fn low_pass(params: FirParameters, cutoff: f64) -> Result<Self> {
        Self::new(params, Band::LowPass { cutoff })
    }

    /// Designs a high-pass filter with cutoff `cutoff` Hz. The order must be
    /// even.
    ///
    /// # Errors
    ///
    /// See [`FirFilter::new`].
    pub fn high_pass(params: FirParameters, cutoff: f64) -> Result<Self> {
        Self::new(params, Band::HighPass { cutoff })
    }

    /// Designs a band-pass filter passing `low..high` Hz.
    ///
    /// # Errors
    ///
    /// See [`FirFilter::new`].
    pub fn band_pass(params: FirParameters, low: f64, high: f64) -> Result<Self> {
        Self::new(params, Band::BandPass { low, high })
    }

    /// Filters one sample.
    pub fn update(&mut self, x: f64) -> f64 {
        self.delay.push(x);
        self.delay.convolve(&self.taps)
    }

    /// Zeroes the delay line, keeping the design.
    pub fn reset(&mut self) {
        self.delay.clear();
    }

    /// Magnitude of the frequency response at `freq` Hz.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn gain(&self, freq: f64) -> f64 {
        let omega = 2.0 * PI * freq / self.params.sampling_frequency;
        let (re, im) = self
            .taps
            .iter()
            .enumerate()
            .fold((0.0, 0.0), |(re, im), (k, h)| {
                let phase = omega * k as f64;
                (re + h * phase.cos(), im - h * phase.sin())
            });
        re.hypot(im)
    }

    /// Filter order.
    #[must_use]
    pub fn order(&self) -> usize {
        self.params.order
    }

    /// Sampling frequency in Hz.
    #[must_use]
    pub fn sampling_frequency(&self) -> f64 {
        self.params.sampling_frequency
    }

    /// The designed pass band.
    #[must_use]
    pub fn band(&self) -> Band {
        self.band
    }

    /// Whether the kernel was windowed.
    #[must_use]
    pub fn is_windowed(&self) -> bool {
        self.params.window
    }

    /// Whether the kernel was normalized to unity passband gain.
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        self.params.normalize
    }
}

/// Serialized form of a [`FirFilter`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct FirDesign {
    params: FirParameters,
    band: Band,
}

#[cfg(feature = "serde")]
impl TryFrom<FirDesign> for FirFilter {
    type Error = Error;

    fn try_from(design: FirDesign) -> Result<Self> {
        Self::new(design.params, design.band)
    }
}

#[cfg(feature = "serde")]
impl From<FirFilter> for FirDesign {
    fn from(filter: FirFilter) -> Self {
        Self {
            params: filter.params,
            band: filter.band,
        }
    }
}

fn check_cutoff(cutoff: f64, fs: f64) -> Result<()> {
    let nyquist = fs / 2.0;
    if cutoff > 0.0 && cutoff < nyquist {
        Ok(())
    } else {
        Err(Error::InvalidCutoff { cutoff, nyquist })
    }
}

/// Truncated ideal low-pass kernel of `order + 1` taps, centered on
/// `order / 2`, for the cutoff `fc` given as a fraction of the sampling
/// frequency.
#[allow(clippy::cast_precision_loss)]
fn ideal_low_pass(order: usize, fc: f64) -> Vec<f64> {
    let center = order as f64 / 2.0;
    (0..=order)
        .map(|n| {
            if 2 * n == order {
                2.0 * fc
            } else {
                let m = n as f64 - center;
                (2.0 * PI * fc * m).sin() / (PI * m)
            }
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn apply_hamming(taps: &mut [f64]) {
    let span = (taps.len() - 1) as f64;
    for (n, h) in taps.iter_mut().enumerate() {
        *h *= 0.54 - 0.46 * (2.0 * PI * n as f64 / span).cos();
    }
}
