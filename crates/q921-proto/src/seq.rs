//! Modulo-128 sequence numbers.
//!
//! N(S), N(R) and the state variables V(S), V(R), V(A) all live in the same
//! 7-bit sequence space. Ordering only makes sense relative to an origin, so
//! [`Seq`] deliberately does not implement `Ord`; use
//! [`Seq::is_between`] for window checks.

use std::fmt;

/// A sequence number in the LAPD modulo-128 space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Seq(u8);

impl Seq {
    /// Size of the sequence space.
    pub const MODULUS: u8 = 128;

    /// Sequence number zero.
    pub const ZERO: Self = Self(0);

    /// Create a sequence number, reducing `value` modulo 128.
    pub const fn new(value: u8) -> Self {
        Self(value % Self::MODULUS)
    }

    /// Raw 7-bit value.
    pub const fn value(self) -> u8 {
        self.0
    }

    /// The following sequence number (wraps 127 -> 0).
    #[must_use]
    pub const fn next(self) -> Self {
        Self::new(self.0.wrapping_add(1))
    }

    /// Forward distance from `origin` to `self`, in `0..128`.
    pub const fn distance_from(self, origin: Self) -> u8 {
        self.0.wrapping_sub(origin.0) % Self::MODULUS
    }

    /// Whether `self` lies in the circular range `[lower, upper]`.
    ///
    /// This is the acknowledgement window test `V(A) <= N(R) <= V(S)`.
    pub const fn is_between(self, lower: Self, upper: Self) -> bool {
        self.distance_from(lower) <= upper.distance_from(lower)
    }
}

impl From<Seq> for u8 {
    fn from(seq: Seq) -> Self {
        seq.0
    }
}

impl fmt::Display for Seq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn wraps_at_modulus() {
        assert_eq!(Seq::new(127).next(), Seq::ZERO);
        assert_eq!(Seq::new(200).value(), 72);
    }

    #[test]
    fn window_spans_wrap_boundary() {
        let va = Seq::new(126);
        let vs = Seq::new(2);

        assert!(Seq::new(126).is_between(va, vs));
        assert!(Seq::new(127).is_between(va, vs));
        assert!(Seq::new(0).is_between(va, vs));
        assert!(Seq::new(2).is_between(va, vs));
        assert!(!Seq::new(3).is_between(va, vs));
        assert!(!Seq::new(125).is_between(va, vs));
    }

    #[test]
    fn empty_window_only_admits_origin() {
        let v = Seq::new(40);
        assert!(v.is_between(v, v));
        assert!(!Seq::new(41).is_between(v, v));
        assert!(!Seq::new(39).is_between(v, v));
    }

    proptest! {
        #[test]
        fn full_cycle_returns_to_start(start in 0u8..128) {
            let origin = Seq::new(start);
            let mut seq = origin;
            for _ in 0..Seq::MODULUS {
                seq = seq.next();
            }
            prop_assert_eq!(seq, origin);
        }

        #[test]
        fn distance_is_inverse_of_stepping(start in 0u8..128, steps in 0u8..128) {
            let origin = Seq::new(start);
            let mut seq = origin;
            for _ in 0..steps {
                seq = seq.next();
            }
            prop_assert_eq!(seq.distance_from(origin), steps);
        }
    }
}
