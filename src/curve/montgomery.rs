//! X25519 scalar multiplication on the Montgomery form of Curve25519.
//!
//! Only the u-coordinate is used. The ladder keeps the pair
//! `(x₂ : z₂), (x₃ : z₃)` representing `k'·P` and `(k' + 1)·P` for the
//! prefix `k'` of the scalar processed so far, and performs one
//! differential addition and one doubling per bit:
//!
//! ```text
//! for t = 254 down to 0:
//!     swap pairs if bit t differs from the previous bit
//!     (x₃, z₃) ← (x₂, z₂) + (x₃, z₃)     using u as the difference
//!     (x₂, z₂) ← 2·(x₂, z₂)
//! ```
//!
//! The swap is a [`ConditionallySelectable::conditional_swap`], so the
//! sequence of field operations is identical for every scalar. The output
//! `x₂ / z₂` uses the inversion convention `0⁻¹ = 0`, which gives `u = 0`
//! for low-order inputs instead of an error.
//!
//! Byte strings here follow RFC 7748: scalars and u-coordinates are 32
//! little-endian bytes, and bit 255 of u is ignored.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use super::field::FieldElement;
use super::group::EdwardsPoint;
use super::scalar::{Scalar, clamp_integer};

/// A u-coordinate on Curve25519 or its twist.
#[derive(Clone, Copy, Debug, Default)]
pub struct MontgomeryPoint(pub [u8; 32]);

impl MontgomeryPoint {
    /// Borrows the encoded bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns the encoded bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Clamps `bytes` and multiplies the point by the result.
    ///
    /// Every input is accepted. Bit 255 of the u-coordinate is masked off
    /// before decoding.
    pub fn mul_clamped(&self, bytes: [u8; 32]) -> MontgomeryPoint {
        let clamped = clamp_integer(bytes);
        let u = FieldElement::from_bytes(&self.0);

        MontgomeryPoint(ladder(&clamped, &u).to_bytes())
    }

    /// Clamps `bytes` and multiplies the base point `u = 9` by the result.
    ///
    /// Goes through the Edwards fixed-base table; the Montgomery image of
    /// `k·B` is `k·9`.
    pub fn mul_base_clamped(bytes: [u8; 32]) -> MontgomeryPoint {
        EdwardsPoint::mul_base(&Scalar::from_clamped(bytes)).to_montgomery()
    }

    /// Returns `1` when the u-coordinate is zero modulo `p`.
    pub fn is_zero(&self) -> Choice {
        FieldElement::from_bytes(&self.0).is_zero()
    }
}

impl ConstantTimeEq for MontgomeryPoint {
    /// Compares the field elements, so encodings that differ only in bit
    /// 255 or by a multiple of `p` are equal.
    fn ct_eq(&self, other: &Self) -> Choice {
        FieldElement::from_bytes(&self.0).ct_eq(&FieldElement::from_bytes(&other.0))
    }
}

impl PartialEq for MontgomeryPoint {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for MontgomeryPoint {}

/// Runs the ladder over bits 254..=0 of `scalar` and returns the affine
/// u-coordinate of `scalar · u`.
pub(crate) fn ladder(scalar: &[u8; 32], u: &FieldElement) -> FieldElement {
    let x1 = *u;
    let mut x2 = FieldElement::ONE;
    let mut z2 = FieldElement::ZERO;
    let mut x3 = *u;
    let mut z3 = FieldElement::ONE;
    let mut swap = Choice::from(0);

    for t in (0..255).rev() {
        let bit = Choice::from((scalar[t >> 3] >> (t & 7)) & 1);
        let flip = swap ^ bit;
        FieldElement::conditional_swap(&mut x2, &mut x3, flip);
        FieldElement::conditional_swap(&mut z2, &mut z3, flip);
        swap = bit;

        let a = x2 + z2;
        let aa = a.square();
        let b = x2 - z2;
        let bb = b.square();
        let e = aa - bb;
        let c = x3 + z3;
        let d = x3 - z3;
        let da = d * a;
        let cb = c * b;

        x3 = (da + cb).square();
        z3 = x1 * (da - cb).square();
        x2 = aa * bb;
        z2 = e * (aa + e.mul121665());
    }

    FieldElement::conditional_swap(&mut x2, &mut x3, swap);
    FieldElement::conditional_swap(&mut z2, &mut z3, swap);

    x2 * z2.invert()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::table::X25519_BASEPOINT;
    use hex_literal::hex;

    #[test]
    fn rfc7748_single_multiplication() {
        let scalar = hex!("a546e36bf0527c9d3b16154b82465edd62144c0ac1fc5a18506a2244ba449ac4");
        let u = MontgomeryPoint(hex!("e6db6867583030db3594c1a424b15f7c726624ec26b3353b10a903a6d0ab1c4c"));

        assert_eq!(
            u.mul_clamped(scalar).0,
            hex!("c3da55379de9c6908e94ea4df28d084f32eccf03491c71f754b4075577a28552")
        );
    }

    #[test]
    fn rfc7748_high_bit_of_u_is_masked() {
        let scalar = hex!("4b66e9d4d1b4673c5ad22691957d6af5c11b6421e0ea01d42ca4169e7918ba0d");
        let u = MontgomeryPoint(hex!("e5210f12786811d3f4b7959d0538ae2c31dbe7106fc03c3efc4cd549c715a493"));

        assert_eq!(
            u.mul_clamped(scalar).0,
            hex!("95cbde9476e8907d7aade45cb4b873f88b595a68799fa152e6f8f7647aac7957")
        );
    }

    #[test]
    fn fixed_base_matches_ladder() {
        let secret = [0x42u8; 32];
        let via_ladder = MontgomeryPoint(X25519_BASEPOINT).mul_clamped(secret);

        assert_eq!(MontgomeryPoint::mul_base_clamped(secret), via_ladder);
    }

    #[test]
    fn zero_input_yields_zero() {
        let out = MontgomeryPoint([0u8; 32]).mul_clamped([0x11; 32]);
        assert!(bool::from(out.is_zero()));
    }
}
