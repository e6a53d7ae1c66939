//! Tilt from gravity and incremental quaternion orientation.

use nalgebra::{Matrix3, Quaternion, UnitQuaternion};

use crate::axis::Vector3;
use crate::constants::RENORMCOUNT;

/// Roll and pitch in radians of a sensor whose accelerometer reads `accel`
/// while only gravity acts on it. The yaw component is always zero, gravity
/// carries no heading information.
#[must_use]
pub fn tilt_from_acceleration(accel: &Vector3) -> Vector3 {
    let roll = accel.y.atan2(accel.z);
    let pitch = (-accel.x).atan2(accel.y.hypot(accel.z));
    Vector3::new(roll, pitch, 0.0)
}

/// Strapdown integration of gyroscope rates into an orientation quaternion.
///
/// The quaternion is advanced with a first-order step and only brought back
/// to unit length every [`RENORMCOUNT`] updates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuaternionIntegrator {
    q: Quaternion<f64>,
    /// Updates since the last renormalization.
    count: u32,
}

impl Default for QuaternionIntegrator {
    fn default() -> Self {
        Self::new(UnitQuaternion::identity())
    }
}

impl QuaternionIntegrator {
    /// Starts integrating from `orientation`.
    #[must_use]
    pub fn new(orientation: UnitQuaternion<f64>) -> Self {
        Self {
            q: orientation.into_inner(),
            count: 0,
        }
    }

    /// Advances the orientation by the body rates `gyro` (rad/s) over `dt`
    /// seconds.
    pub fn update(&mut self, gyro: &Vector3, dt: f64) {
        let omega = Quaternion::from_imag(*gyro);
        self.q += self.q * omega * (0.5 * dt);

        self.count += 1;
        if self.count >= RENORMCOUNT {
            self.renormalize();
        }
    }

    /// Rescales the quaternion to unit length.
    pub fn renormalize(&mut self) {
        log::trace!("renormalizing quaternion, norm {}", self.q.norm());
        self.q.normalize_mut();
        self.count = 0;
    }

    /// The raw, possibly slightly denormalized, quaternion.
    #[must_use]
    pub fn quaternion(&self) -> &Quaternion<f64> {
        &self.q
    }

    /// The orientation as a unit quaternion.
    #[must_use]
    pub fn orientation(&self) -> UnitQuaternion<f64> {
        UnitQuaternion::new_normalize(self.q)
    }

    /// Rotation matrix built from the raw quaternion.
    #[must_use]
    pub fn rotation_matrix(&self) -> Matrix3<f64> {
        UnitQuaternion::new_unchecked(self.q)
            .to_rotation_matrix()
            .into_inner()
    }

    /// Updates since the last renormalization.
    #[must_use]
    pub fn pending_updates(&self) -> u32 {
        self.count
    }
}
