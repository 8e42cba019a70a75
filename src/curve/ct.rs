//! Constant-time helpers for signed window digits.
//!
//! Radix-16 scalar digits lie in `[-8, 8]`. Table lookups need the sign and
//! magnitude of a digit without branching on it, and the [`subtle`] crate
//! only covers unsigned comparisons, so the split happens here.

use subtle::{Choice, ConstantTimeEq};

/// Returns `1` if `digit` is negative, `0` otherwise.
#[inline(always)]
pub(crate) fn is_negative(digit: i8) -> Choice {
    Choice::from((digit as u8) >> 7)
}

/// Returns `|digit|` as an unsigned byte.
#[inline(always)]
pub(crate) fn magnitude(digit: i8) -> u8 {
    let mask = digit >> 7;
    (digit ^ mask).wrapping_sub(mask) as u8
}

/// Returns `1` if the magnitude of `digit` equals `index`.
#[inline(always)]
pub(crate) fn selects(digit_magnitude: u8, index: usize) -> Choice {
    digit_magnitude.ct_eq(&(index as u8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_extraction() {
        for digit in -8i8..=8 {
            assert_eq!(bool::from(is_negative(digit)), digit < 0);
        }
    }

    #[test]
    fn magnitude_extraction() {
        for digit in -8i8..=8 {
            assert_eq!(magnitude(digit), digit.unsigned_abs());
        }
    }

    #[test]
    fn selection_matches_index() {
        assert!(bool::from(selects(3, 3)));
        assert!(!bool::from(selects(3, 4)));
        assert!(!bool::from(selects(0, 8)));
    }
}
