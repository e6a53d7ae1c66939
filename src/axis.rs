//! Axis selectors for three-component vectors.

use crate::error::{Error, Result};

/// Three-component value, one per physical axis.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Physical axis of a [`Vector3`].
///
/// Selectors start at one; they are only used to pick a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// X axis.
    Ox = 1,
    /// Y axis.
    Oy,
    /// Z axis.
    Oz,
}

impl Axis {
    /// All axes in component order.
    pub const ALL: [Self; 3] = [Self::Ox, Self::Oy, Self::Oz];

    /// Zero-based component index of this axis.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize - 1
    }

    /// Reads this axis' component of `v`.
    #[must_use]
    pub fn of(self, v: &Vector3) -> f64 {
        v[self.index()]
    }

    /// Mutable access to this axis' component of `v`.
    pub fn of_mut(self, v: &mut Vector3) -> &mut f64 {
        &mut v[self.index()]
    }

    /// Decodes a selector stored as a real number in a parameter block.
    #[allow(clippy::float_cmp)]
    pub(crate) fn from_selector(value: f64) -> Result<Self> {
        match value {
            v if v == 1.0 => Ok(Self::Ox),
            v if v == 2.0 => Ok(Self::Oy),
            v if v == 3.0 => Ok(Self::Oz),
            _ => Err(Error::InvalidAxis { value }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_components() {
        let mut v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(Axis::Ox.of(&v), 1.0);
        assert_eq!(Axis::Oz.of(&v), 3.0);

        *Axis::Oy.of_mut(&mut v) = -2.0;
        assert_eq!(v.y, -2.0);
    }

    #[test]
    fn decodes_selectors() {
        assert_eq!(Axis::from_selector(3.0), Ok(Axis::Oz));
        assert!(Axis::from_selector(0.0).is_err());
        assert!(Axis::from_selector(1.5).is_err());
    }
}
