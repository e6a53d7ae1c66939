//! Process-wide constants shared by every consumer of this crate.

/// Standard gravity in m/s^2.
pub const G: f64 = 9.80665;

/// Number of incremental quaternion updates between two renormalizations.
///
/// Any orientation kept as a raw quaternion and updated step by step drifts
/// away from unit length through rounding. Consumers renormalize after this
/// many updates.
pub const RENORMCOUNT: u32 = 97;
