//! Streaming filters and integrators for inertial sensor signals.
//!
//! Every component owns its state and processes one sample per call:
//!
//! - [`PhysicalValueConverter`] maps raw counts to physical units,
//! - [`ExponentialLowPass`], [`ExponentialHighPass`] and [`FirFilter`]
//!   reduce noise,
//! - [`SimpsonIntegrator`] integrates rates,
//! - [`ComplementaryIntegrator`] fuses measured and integrated estimates,
//! - [`AntiTurnCorrector`] removes slow tilt drift,
//! - [`QuaternionIntegrator`] tracks orientation, renormalizing every
//!   [`RENORMCOUNT`] updates.
//!
//! Components do not reference each other and are not synchronized; give
//! each sample stream its own instances.
//!
//! # Example
//!
//! ```rust
//! use imu_dsp::{
//!     tilt_from_acceleration, AntiTurnCorrector, Calibration, ComplementaryIntegrator,
//!     ExponentialLowPass, PhysicalValueConverter, Vector3,
//! };
//!
//! let converter = PhysicalValueConverter::new(Calibration::default(), false)?;
//! let mut smoothing = ExponentialLowPass::<3>::new(0.2)?;
//! let mut roll = ComplementaryIntegrator::new(0.98)?;
//! let mut anti_turn = AntiTurnCorrector::default();
//!
//! let accel = smoothing.filter(converter.convert(&Vector3::new(0.0, 0.0, 9.81)));
//! let tilt = tilt_from_acceleration(&accel);
//! let fused = roll.fuse_rate(tilt.x, 0.0, 0.01);
//! let corrected = anti_turn.correct(&Vector3::new(fused, tilt.y, 0.0));
//! assert!(corrected.norm() < 1e-12);
//! # Ok::<(), imu_dsp::Error>(())
//! ```

mod anti_turn;
mod axis;
mod complementary;
pub mod constants;
mod delay_line;
mod error;
mod exponential;
mod fir;
mod orientation;
mod physical;
mod simpson;

pub use anti_turn::{AntiTurnCorrector, DEFAULT_BIAS_ALPHA};
pub use axis::{Axis, Vector3};
pub use complementary::{ComplementaryIntegrator, HISTORY_LEN};
pub use constants::{G, RENORMCOUNT};
pub use error::{Error, Result};
pub use exponential::{ExponentialHighPass, ExponentialLowPass};
pub use fir::{Band, FirFilter, FirParameters};
pub use orientation::{tilt_from_acceleration, QuaternionIntegrator};
pub use physical::{Calibration, GravityReference, PhysicalValueConverter, PARAMETER_BLOCK_LEN};
pub use simpson::SimpsonIntegrator;
