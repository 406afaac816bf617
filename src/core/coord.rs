//! Tolerant scalar coordinate.

use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Sub};
use std::sync::atomic::{AtomicU32, Ordering as AtomicOrdering};

use serde::{Deserialize, Serialize};

/// Comparison tolerance, stored as raw f32 bits.
///
/// Written once per exploration run during sensor calibration, read by
/// every coordinate comparison afterwards. Defaults to 0.0 (exact
/// comparison) until calibration runs.
static TOLERANCE_BITS: AtomicU32 = AtomicU32::new(0);

/// A scalar coordinate compared within a calibrated tolerance band.
///
/// Two coordinates are equal iff `|a - b| < tolerance`; the ordering is
/// consistent with that band, so a pair that is equal-within-tolerance is
/// neither less nor greater. This is what lets noisy odometry resolve to
/// the same discrete junction on every revisit.
///
/// The tolerance is global to the crate: it is derived once from half the
/// corridor width (see [`crate::Navigator`] calibration) and stays fixed
/// for the lifetime of a run.
///
/// # Example
///
/// ```
/// use vyuha_nav::Coord;
///
/// Coord::set_tolerance(0.5);
/// assert_eq!(Coord::new(10.0), Coord::new(10.3));
/// assert_ne!(Coord::new(10.0), Coord::new(10.6));
/// assert!(Coord::new(10.0) < Coord::new(10.6));
/// ```
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Coord(f32);

impl Coord {
    /// Create a coordinate from a raw value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Raw value.
    #[inline]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Set the global comparison tolerance.
    ///
    /// Called once per run, before any graph or node comparison. The
    /// navigator derives the value from half the calibrated corridor
    /// width.
    pub fn set_tolerance(tolerance: f32) {
        TOLERANCE_BITS.store(tolerance.to_bits(), AtomicOrdering::Relaxed);
    }

    /// Current comparison tolerance.
    #[inline]
    pub fn tolerance() -> f32 {
        f32::from_bits(TOLERANCE_BITS.load(AtomicOrdering::Relaxed))
    }
}

impl PartialEq for Coord {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        (self.0 - other.0).abs() < Self::tolerance()
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else if self.0 < other.0 {
            Some(Ordering::Less)
        } else {
            Some(Ordering::Greater)
        }
    }
}

impl From<f32> for Coord {
    #[inline]
    fn from(value: f32) -> Self {
        Self(value)
    }
}

impl Add<f32> for Coord {
    type Output = Self;

    #[inline]
    fn add(self, rhs: f32) -> Self {
        Self(self.0 + rhs)
    }
}

impl AddAssign<f32> for Coord {
    #[inline]
    fn add_assign(&mut self, rhs: f32) {
        self.0 += rhs;
    }
}

impl Sub for Coord {
    type Output = f32;

    #[inline]
    fn sub(self, rhs: Self) -> f32 {
        self.0 - rhs.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The tolerance is crate-global and the test harness runs tests
    // concurrently, so every unit test in this crate uses the same band:
    // 50.0, the value the navigator calibrates in a width-100 corridor.
    fn tol() {
        Coord::set_tolerance(50.0);
    }

    #[test]
    fn test_equality_within_band() {
        tol();
        assert_eq!(Coord::new(100.0), Coord::new(100.0));
        assert_eq!(Coord::new(100.0), Coord::new(149.0));
        assert_eq!(Coord::new(100.0), Coord::new(51.0));
        assert_ne!(Coord::new(100.0), Coord::new(150.0));
        assert_ne!(Coord::new(100.0), Coord::new(200.0));
    }

    #[test]
    fn test_ordering_consistent_with_band() {
        tol();
        // Equal-within-tolerance: neither less nor greater.
        let a = Coord::new(100.0);
        let b = Coord::new(130.0);
        assert!(!(a < b));
        assert!(!(a > b));
        assert_eq!(a.partial_cmp(&b), Some(std::cmp::Ordering::Equal));

        assert!(Coord::new(100.0) < Coord::new(160.0));
        assert!(Coord::new(200.0) > Coord::new(100.0));
    }

    #[test]
    fn test_arithmetic_passes_through() {
        let mut c = Coord::new(1.0);
        c += 2.0;
        assert_eq!(c.value(), 3.0);
        assert_eq!((Coord::new(5.0) + 1.0).value(), 6.0);
        assert_eq!(Coord::new(5.0) - Coord::new(2.0), 3.0);
    }
}
