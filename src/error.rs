//! Errors reported by filter and integrator construction and by per-sample
//! calls with invalid arguments.

use thiserror::Error;

/// Result type used throughout this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Failures of this crate.
///
/// Every variant except [`Error::ChannelOutOfRange`] is an
/// invalid-configuration failure and is only produced at construction time.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// FIR order must be at least one.
    #[error("filter order must be positive, got {order}")]
    InvalidOrder {
        /// The rejected order.
        order: usize,
    },

    /// High-pass kernels are built by spectral inversion, which needs a
    /// center tap.
    #[error("high-pass filter order must be even, got {order}")]
    OddHighPassOrder {
        /// The rejected order.
        order: usize,
    },

    /// Cutoff outside the open interval `(0, fs / 2)`.
    #[error("cutoff frequency {cutoff} Hz outside (0, {nyquist}) Hz")]
    InvalidCutoff {
        /// The rejected cutoff frequency.
        cutoff: f64,
        /// Half of the sampling frequency.
        nyquist: f64,
    },

    /// Band-pass edges must satisfy `low < high`.
    #[error("band edges must be increasing, got [{low}, {high}] Hz")]
    InvalidBand {
        /// Lower band edge.
        low: f64,
        /// Upper band edge.
        high: f64,
    },

    /// The designed kernel has next to no gain at the frequency it would be
    /// normalized at, so normalization would blow it up.
    #[error("passband gain {gain} at {frequency} Hz too small to normalize")]
    DegenerateGain {
        /// Frequency the gain was evaluated at.
        frequency: f64,
        /// The achieved gain.
        gain: f64,
    },

    /// Sampling frequency or step size must be finite and positive.
    #[error("{name} must be finite and positive, got {value}")]
    NonPositive {
        /// Name of the parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Smoothing or blending coefficient outside `[0, 1]`.
    #[error("{name} must lie in [0, 1], got {value}")]
    CoefficientOutOfRange {
        /// Name of the coefficient.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The length marker of a calibration parameter block does not match the
    /// number of slots the requested mode needs.
    #[error("parameter block declares {found} slots, expected {expected}")]
    ParameterBlockSize {
        /// Slots required by the active mode.
        expected: usize,
        /// Slots declared by the block.
        found: f64,
    },

    /// Gravity correction was requested without a gravity reference.
    #[error("gravity correction requested but calibration has no gravity reference")]
    MissingGravityReference,

    /// Axis selector outside `1..=3`.
    #[error("axis selector {value} outside 1..=3")]
    InvalidAxis {
        /// The rejected selector.
        value: f64,
    },

    /// Channel index not smaller than the channel count.
    #[error("channel {index} out of range for {channels} channels")]
    ChannelOutOfRange {
        /// The rejected index.
        index: usize,
        /// Number of channels of the filter.
        channels: usize,
    },
}

impl Error {
    /// Returns `true` for invalid-configuration failures, `false` for
    /// invalid-argument failures.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Self::ChannelOutOfRange { .. })
    }
}

/// Checks that `value` is finite and strictly positive.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::NonPositive { name, value })
    }
}

/// Checks that `value` lies in `[0, 1]`.
pub(crate) fn ensure_unit_interval(name: &'static str, value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(Error::CoefficientOutOfRange { name, value })
    }
}
