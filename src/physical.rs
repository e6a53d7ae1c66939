//! Conversion of raw sensor counts into physical units.

use crate::axis::{Axis, Vector3};
use crate::constants::G;
use crate::error::{Error, Result};

/// Length of a legacy calibration parameter block, including the leading
/// slot count.
pub const PARAMETER_BLOCK_LEN: usize = 11;

/// Slots populated in a parameter block without a gravity reference:
/// scale and offset per axis.
const PLAIN_SLOTS: usize = 6;

/// Slots populated in a parameter block with a gravity reference: scale and
/// offset per axis, the raw at-rest reading per axis and the vertical axis.
const GRAVITY_SLOTS: usize = 10;

/// Raw reading of a sensor lying still, used to pin the vertical axis to
/// gravity.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GravityReference {
    /// Raw reading at rest.
    pub rest: Vector3,
    /// Axis gravity acts along at rest.
    pub vertical: Axis,
}

/// Per-axis calibration of a sensor.
///
/// A raw value maps to `(raw - offset) * scale`, component-wise.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Calibration {
    /// Physical units per raw count.
    pub scale: Vector3,
    /// Raw reading corresponding to a physical zero.
    pub offset: Vector3,
    /// Optional at-rest reference for gravity correction.
    pub gravity: Option<GravityReference>,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            scale: Vector3::from_element(1.0),
            offset: Vector3::zeros(),
            gravity: None,
        }
    }
}

impl Calibration {
    fn apply(&self, raw: &Vector3) -> Vector3 {
        (raw - self.offset).component_mul(&self.scale)
    }
}

/// Maps raw accelerometer or gyroscope readings to physical values.
///
/// # Example
///
/// ```rust
/// use imu_dsp::{Calibration, PhysicalValueConverter, Vector3};
///
/// let calibration = Calibration {
///     scale: Vector3::from_element(0.5),
///     offset: Vector3::new(10.0, 0.0, 0.0),
///     gravity: None,
/// };
/// let converter = PhysicalValueConverter::new(calibration, false)?;
/// assert_eq!(
///     converter.convert(&Vector3::new(12.0, 2.0, -2.0)),
///     Vector3::new(1.0, 1.0, -1.0)
/// );
/// # Ok::<(), imu_dsp::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhysicalValueConverter {
    calibration: Calibration,
    correct_gravity: bool,
    /// Additive correction of the vertical axis, zero without gravity
    /// correction.
    gravity_bias: f64,
}

impl PhysicalValueConverter {
    /// Creates a converter. With `correct_gravity`, the vertical axis is
    /// shifted so the calibration's at-rest reading converts to exactly
    /// `±G`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingGravityReference`] if `correct_gravity` is set
    /// and `calibration.gravity` is `None`.
    pub fn new(calibration: Calibration, correct_gravity: bool) -> Result<Self> {
        let gravity_bias = if correct_gravity {
            let reference = calibration
                .gravity
                .ok_or(Error::MissingGravityReference)?;
            let at_rest = reference.vertical.of(&calibration.apply(&reference.rest));
            G.copysign(at_rest) - at_rest
        } else {
            0.0
        };

        Ok(Self {
            calibration,
            correct_gravity,
            gravity_bias,
        })
    }

    /// Creates a converter from a legacy parameter block.
    ///
    /// `block[0]` holds the number of populated slots that follow: `6`
    /// without gravity correction (scale x, y, z then offset x, y, z), `10`
    /// with it (additionally the raw at-rest reading x, y, z and the
    /// vertical axis selector `1..=3`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParameterBlockSize`] if `block[0]` does not match the
    /// mode selected by `correct_gravity`, or [`Error::InvalidAxis`] for a
    /// bad vertical axis selector.
    #[allow(clippy::cast_precision_loss, clippy::float_cmp)]
    pub fn from_parameter_block(
        block: &[f64; PARAMETER_BLOCK_LEN],
        correct_gravity: bool,
    ) -> Result<Self> {
        let expected = if correct_gravity {
            GRAVITY_SLOTS
        } else {
            PLAIN_SLOTS
        };
        // slot counts are small integers, exactly representable; NaN never matches
        if block[0] != expected as f64 {
            return Err(Error::ParameterBlockSize {
                expected,
                found: block[0],
            });
        }

        let gravity = if correct_gravity {
            Some(GravityReference {
                rest: Vector3::new(block[7], block[8], block[9]),
                vertical: Axis::from_selector(block[10])?,
            })
        } else {
            None
        };

        let calibration = Calibration {
            scale: Vector3::new(block[1], block[2], block[3]),
            offset: Vector3::new(block[4], block[5], block[6]),
            gravity,
        };
        Self::new(calibration, correct_gravity)
    }

    /// Converts a raw three-axis reading.
    #[must_use]
    pub fn convert(&self, raw: &Vector3) -> Vector3 {
        let mut physical = self.calibration.apply(raw);
        if let Some(axis) = self.vertical_axis() {
            *axis.of_mut(&mut physical) += self.gravity_bias;
        }
        physical
    }

    /// Converts the raw reading of a single axis.
    #[must_use]
    pub fn convert_axis(&self, axis: Axis, raw: f64) -> f64 {
        let i = axis.index();
        let physical = (raw - self.calibration.offset[i]) * self.calibration.scale[i];
        if self.vertical_axis() == Some(axis) {
            physical + self.gravity_bias
        } else {
            physical
        }
    }

    /// The calibration in use.
    #[must_use]
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Whether gravity correction is applied.
    #[must_use]
    pub fn corrects_gravity(&self) -> bool {
        self.correct_gravity
    }

    fn vertical_axis(&self) -> Option<Axis> {
        self.calibration
            .gravity
            .filter(|_| self.correct_gravity)
            .map(|reference| reference.vertical)
    }
}
