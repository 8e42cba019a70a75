//! Group operations on the twisted Edwards form of Curve25519.
//!
//! The curve is
//!
//! ```text
//! −x² + y² = 1 + d·x²·y²,   d = −121665 / 121666
//! ```
//!
//! ## Point models
//!
//! Several coordinate systems are used, each suited to one step of the
//! arithmetic:
//!
//! - [`EdwardsPoint`] (extended): `(X : Y : Z : T)` with `x = X/Z`,
//!   `y = Y/Z`, `x·y = T/Z`. The public type.
//! - `CompletedPoint` (`ℙ¹ × ℙ¹`): output of additions and doublings,
//!   `x = X/Z`, `y = Y/T`.
//! - `ProjectivePoint`: `(X : Y : Z)`, enough for repeated doublings.
//! - `CachedPoint`: `(Y + X, Y − X, Z, 2·d·T)`, the right-hand side of an
//!   addition.
//! - `PrecomputedPoint`: affine `(y + x, y − x, 2·d·x·y)`, the entries of
//!   the fixed-base table.
//!
//! The addition formulas are complete: they hold for doubling, for the
//! identity and for points of small order, so no input takes a special
//! path.
//!
//! ## Scalar multiplication
//!
//! Both multiplications recode the scalar into 64 signed radix-16 digits
//! and run a fixed sequence of doublings and additions. Table entries are
//! read with [`ConditionallySelectable`] over the whole table, so neither
//! the memory access pattern nor the running time depends on the digits.

use core::ops::{Add, Mul, Neg, Sub};

use log::debug;
use subtle::{Choice, ConditionallyNegatable, ConditionallySelectable, ConstantTimeEq};

use super::ct;
use super::field::FieldElement;
use super::montgomery::MontgomeryPoint;
use super::scalar::Scalar;
use super::table::{BASE, EDWARDS_D, EDWARDS_D2};
use crate::error::{Error, Result};

/// A point on the Edwards curve in extended coordinates.
#[derive(Clone, Copy, Debug)]
pub struct EdwardsPoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
    pub(crate) t: FieldElement,
}

/// The 32-byte wire form of an Edwards point: `y` in little-endian with the
/// sign of `x` in bit 255.
#[derive(Clone, Copy, Debug, Default)]
pub struct CompressedEdwardsY(pub [u8; 32]);

#[derive(Clone, Copy, Debug)]
pub(crate) struct CompletedPoint {
    x: FieldElement,
    y: FieldElement,
    z: FieldElement,
    t: FieldElement,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct ProjectivePoint {
    x: FieldElement,
    y: FieldElement,
    z: FieldElement,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct CachedPoint {
    y_plus_x: FieldElement,
    y_minus_x: FieldElement,
    z: FieldElement,
    t2d: FieldElement,
}

/// Affine point prepared for mixed addition.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PrecomputedPoint {
    pub(crate) y_plus_x: FieldElement,
    pub(crate) y_minus_x: FieldElement,
    pub(crate) xy2d: FieldElement,
}

impl CompressedEdwardsY {
    /// Borrows the encoded bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns the encoded bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Decodes and validates the point.
    ///
    /// `x` is recovered from `x² = (y² − 1) / (d·y² + 1)`. The encoding is
    /// rejected with [`Error::InvalidEncoding`] when the ratio has no square
    /// root, or when re-encoding the candidate does not give back the input
    /// bytes (a `y` at or above `p`, or a sign bit set on `x = 0`).
    pub fn decompress(&self) -> Result<EdwardsPoint> {
        let y = FieldElement::from_bytes(&self.0);
        let yy = y.square();
        let u = yy - FieldElement::ONE;
        let v = yy * EDWARDS_D + FieldElement::ONE;

        let (is_square, mut x) = FieldElement::sqrt_ratio_i(&u, &v);
        if !bool::from(is_square) {
            debug!("point decode rejected: x^2 has no square root");
            return Err(Error::InvalidEncoding);
        }

        let sign = Choice::from(self.0[31] >> 7);
        x.conditional_negate(sign);

        let point = EdwardsPoint {
            x,
            y,
            z: FieldElement::ONE,
            t: x * y,
        };

        if !bool::from(point.compress().ct_eq(self)) {
            debug!("point decode rejected: encoding is not canonical");
            return Err(Error::InvalidEncoding);
        }

        Ok(point)
    }
}

impl ConstantTimeEq for CompressedEdwardsY {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[..].ct_eq(&other.0[..])
    }
}

impl PartialEq for CompressedEdwardsY {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for CompressedEdwardsY {}

impl EdwardsPoint {
    /// The neutral element `(0, 1)`.
    pub const IDENTITY: Self = EdwardsPoint {
        x: FieldElement::ZERO,
        y: FieldElement::ONE,
        z: FieldElement::ONE,
        t: FieldElement::ZERO,
    };

    /// Encodes the point into its canonical 32-byte form.
    pub fn compress(&self) -> CompressedEdwardsY {
        let recip = self.z.invert();
        let x = self.x * recip;
        let y = self.y * recip;

        let mut bytes = y.to_bytes();
        bytes[31] ^= x.is_negative().unwrap_u8() << 7;

        CompressedEdwardsY(bytes)
    }

    /// Computes `2·self`.
    pub fn double(&self) -> Self {
        self.to_projective().double().to_extended()
    }

    /// Computes `scalar · B` for the fixed base point `B`.
    ///
    /// Uses the static [`BASE`] table: for each radix-16 digit one row
    /// is scanned in full, so the work is the same for every scalar.
    pub fn mul_base(scalar: &Scalar) -> Self {
        let digits = scalar.as_radix_16();

        let mut acc = Self::IDENTITY;
        for i in (1..64).step_by(2) {
            let entry = PrecomputedPoint::select(&BASE[i / 2], digits[i]);
            acc = CompletedPoint::from_mixed_sum(&acc, &entry).to_extended();
        }

        acc = acc.mul_by_pow_2(4);

        for i in (0..64).step_by(2) {
            let entry = PrecomputedPoint::select(&BASE[i / 2], digits[i]);
            acc = CompletedPoint::from_mixed_sum(&acc, &entry).to_extended();
        }

        acc
    }

    /// Converts to the Montgomery u-coordinate `u = (1 + y) / (1 − y)`.
    ///
    /// The identity (`y = 1`) maps to `u = 0`.
    pub fn to_montgomery(&self) -> MontgomeryPoint {
        let u = self.z + self.y;
        let w = self.z - self.y;

        MontgomeryPoint((u * w.invert()).to_bytes())
    }

    /// Computes `2^k · self`, `k >= 1`.
    pub(crate) fn mul_by_pow_2(&self, k: u32) -> Self {
        debug_assert!(k > 0);

        let mut r = self.to_projective();
        for _ in 1..k {
            r = r.double().to_projective();
        }

        r.double().to_extended()
    }

    /// Variable-base multiplication with a signed 4-bit fixed window.
    fn mul_variable_base(&self, scalar: &Scalar) -> Self {
        let table = LookupTable::from(self);
        let digits = scalar.as_radix_16();

        let mut acc = CompletedPoint::from_sum(&Self::IDENTITY, &table.select(digits[63]));
        for i in (0..63).rev() {
            let mut r = acc.to_projective();
            for _ in 0..3 {
                r = r.double().to_projective();
            }
            acc = r.double();

            acc = CompletedPoint::from_sum(&acc.to_extended(), &table.select(digits[i]));
        }

        acc.to_extended()
    }

    fn to_projective(&self) -> ProjectivePoint {
        ProjectivePoint {
            x: self.x,
            y: self.y,
            z: self.z,
        }
    }

    fn to_cached(&self) -> CachedPoint {
        CachedPoint {
            y_plus_x: self.y + self.x,
            y_minus_x: self.y - self.x,
            z: self.z,
            t2d: self.t * EDWARDS_D2,
        }
    }
}

impl ConstantTimeEq for EdwardsPoint {
    /// Projective comparison: `X₁·Z₂ = X₂·Z₁` and `Y₁·Z₂ = Y₂·Z₁`.
    fn ct_eq(&self, other: &Self) -> Choice {
        (self.x * other.z).ct_eq(&(other.x * self.z)) & (self.y * other.z).ct_eq(&(other.y * self.z))
    }
}

impl PartialEq for EdwardsPoint {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for EdwardsPoint {}

impl Add for EdwardsPoint {
    type Output = EdwardsPoint;

    fn add(self, rhs: EdwardsPoint) -> EdwardsPoint {
        CompletedPoint::from_sum(&self, &rhs.to_cached()).to_extended()
    }
}

impl Sub for EdwardsPoint {
    type Output = EdwardsPoint;

    fn sub(self, rhs: EdwardsPoint) -> EdwardsPoint {
        CompletedPoint::from_difference(&self, &rhs.to_cached()).to_extended()
    }
}

impl Neg for EdwardsPoint {
    type Output = EdwardsPoint;

    fn neg(self) -> EdwardsPoint {
        EdwardsPoint {
            x: -self.x,
            y: self.y,
            z: self.z,
            t: -self.t,
        }
    }
}

impl Mul<&Scalar> for &EdwardsPoint {
    type Output = EdwardsPoint;

    /// Constant-time variable-base multiplication.
    fn mul(self, scalar: &Scalar) -> EdwardsPoint {
        self.mul_variable_base(scalar)
    }
}

impl Mul<Scalar> for EdwardsPoint {
    type Output = EdwardsPoint;

    fn mul(self, scalar: Scalar) -> EdwardsPoint {
        self.mul_variable_base(&scalar)
    }
}

impl CompletedPoint {
    /// `a + b` for an extended `a` and a cached `b`.
    pub(crate) fn from_sum(a: &EdwardsPoint, b: &CachedPoint) -> Self {
        let pp = (a.y + a.x) * b.y_plus_x;
        let mm = (a.y - a.x) * b.y_minus_x;
        let tt2d = a.t * b.t2d;
        let zz = a.z * b.z;
        let zz2 = zz + zz;

        CompletedPoint {
            x: pp - mm,
            y: pp + mm,
            z: zz2 + tt2d,
            t: zz2 - tt2d,
        }
    }

    /// `a − b` for an extended `a` and a cached `b`.
    pub(crate) fn from_difference(a: &EdwardsPoint, b: &CachedPoint) -> Self {
        let pm = (a.y + a.x) * b.y_minus_x;
        let mp = (a.y - a.x) * b.y_plus_x;
        let tt2d = a.t * b.t2d;
        let zz = a.z * b.z;
        let zz2 = zz + zz;

        CompletedPoint {
            x: pm - mp,
            y: pm + mp,
            z: zz2 - tt2d,
            t: zz2 + tt2d,
        }
    }

    /// `a + b` for an extended `a` and an affine precomputed `b`.
    pub(crate) fn from_mixed_sum(a: &EdwardsPoint, b: &PrecomputedPoint) -> Self {
        let pp = (a.y + a.x) * b.y_plus_x;
        let mm = (a.y - a.x) * b.y_minus_x;
        let txy2d = a.t * b.xy2d;
        let z2 = a.z + a.z;

        CompletedPoint {
            x: pp - mm,
            y: pp + mm,
            z: z2 + txy2d,
            t: z2 - txy2d,
        }
    }

    pub(crate) fn to_extended(&self) -> EdwardsPoint {
        EdwardsPoint {
            x: self.x * self.t,
            y: self.y * self.z,
            z: self.z * self.t,
            t: self.x * self.y,
        }
    }

    pub(crate) fn to_projective(&self) -> ProjectivePoint {
        ProjectivePoint {
            x: self.x * self.t,
            y: self.y * self.z,
            z: self.z * self.t,
        }
    }
}

impl ProjectivePoint {
    /// Doubling; `T` is not needed as input.
    pub(crate) fn double(&self) -> CompletedPoint {
        let xx = self.x.square();
        let yy = self.y.square();
        let zz = self.z.square();
        let zz2 = zz + zz;
        let xpy2 = (self.x + self.y).square();

        let yy_plus_xx = yy + xx;
        let yy_minus_xx = yy - xx;

        CompletedPoint {
            x: xpy2 - yy_plus_xx,
            y: yy_plus_xx,
            z: yy_minus_xx,
            t: zz2 - yy_minus_xx,
        }
    }
}

impl CachedPoint {
    const IDENTITY: Self = CachedPoint {
        y_plus_x: FieldElement::ONE,
        y_minus_x: FieldElement::ONE,
        z: FieldElement::ONE,
        t2d: FieldElement::ZERO,
    };
}

impl ConditionallySelectable for CachedPoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        CachedPoint {
            y_plus_x: FieldElement::conditional_select(&a.y_plus_x, &b.y_plus_x, choice),
            y_minus_x: FieldElement::conditional_select(&a.y_minus_x, &b.y_minus_x, choice),
            z: FieldElement::conditional_select(&a.z, &b.z, choice),
            t2d: FieldElement::conditional_select(&a.t2d, &b.t2d, choice),
        }
    }
}

impl Neg for &CachedPoint {
    type Output = CachedPoint;

    fn neg(self) -> CachedPoint {
        CachedPoint {
            y_plus_x: self.y_minus_x,
            y_minus_x: self.y_plus_x,
            z: self.z,
            t2d: -self.t2d,
        }
    }
}

impl PrecomputedPoint {
    const IDENTITY: Self = PrecomputedPoint {
        y_plus_x: FieldElement::ONE,
        y_minus_x: FieldElement::ONE,
        xy2d: FieldElement::ZERO,
    };

    /// Reads `digit · row[0]` from a row holding `1·P ..= 8·P`, in constant
    /// time. A zero digit yields the identity.
    pub(crate) fn select(row: &[PrecomputedPoint; 8], digit: i8) -> Self {
        let negative = ct::is_negative(digit);
        let magnitude = ct::magnitude(digit);

        let mut entry = Self::IDENTITY;
        for (j, candidate) in row.iter().enumerate() {
            entry.conditional_assign(candidate, ct::selects(magnitude, j + 1));
        }
        entry.conditional_negate(negative);

        entry
    }
}

impl ConditionallySelectable for PrecomputedPoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        PrecomputedPoint {
            y_plus_x: FieldElement::conditional_select(&a.y_plus_x, &b.y_plus_x, choice),
            y_minus_x: FieldElement::conditional_select(&a.y_minus_x, &b.y_minus_x, choice),
            xy2d: FieldElement::conditional_select(&a.xy2d, &b.xy2d, choice),
        }
    }
}

impl Neg for &PrecomputedPoint {
    type Output = PrecomputedPoint;

    fn neg(self) -> PrecomputedPoint {
        PrecomputedPoint {
            y_plus_x: self.y_minus_x,
            y_minus_x: self.y_plus_x,
            xy2d: -self.xy2d,
        }
    }
}

/// `[1·P, 2·P, …, 8·P]` in cached form, built per multiplication.
struct LookupTable([CachedPoint; 8]);

impl LookupTable {
    /// Reads `digit · P` for `digit` in `[-8, 8]`, in constant time.
    fn select(&self, digit: i8) -> CachedPoint {
        let negative = ct::is_negative(digit);
        let magnitude = ct::magnitude(digit);

        let mut entry = CachedPoint::IDENTITY;
        for (j, candidate) in self.0.iter().enumerate() {
            entry.conditional_assign(candidate, ct::selects(magnitude, j + 1));
        }
        entry.conditional_negate(negative);

        entry
    }
}

impl From<&EdwardsPoint> for LookupTable {
    fn from(point: &EdwardsPoint) -> Self {
        let mut entries = [point.to_cached(); 8];
        for j in 1..8 {
            entries[j] = CompletedPoint::from_sum(point, &entries[j - 1])
                .to_extended()
                .to_cached();
        }

        LookupTable(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::table::{ED25519_BASEPOINT, ED25519_BASEPOINT_COMPRESSED};

    fn scalar(n: u8) -> Scalar {
        let mut bytes = [0u8; 32];
        bytes[0] = n;
        Scalar::from_bytes_mod_order(bytes)
    }

    #[test]
    fn basepoint_compresses_to_known_encoding() {
        assert_eq!(ED25519_BASEPOINT.compress().0, ED25519_BASEPOINT_COMPRESSED);
    }

    #[test]
    fn basepoint_decompresses() {
        let decoded = CompressedEdwardsY(ED25519_BASEPOINT_COMPRESSED)
            .decompress()
            .expect("base point decodes");
        assert_eq!(decoded, ED25519_BASEPOINT);
    }

    #[test]
    fn identity_encoding() {
        let mut expected = [0u8; 32];
        expected[0] = 1;
        assert_eq!(EdwardsPoint::IDENTITY.compress().0, expected);
    }

    #[test]
    fn addition_matches_doubling() {
        let b = ED25519_BASEPOINT;
        assert_eq!(b + b, b.double());
        assert_eq!(b.double().double(), b.mul_by_pow_2(2));
    }

    #[test]
    fn identity_is_neutral() {
        let b = ED25519_BASEPOINT;
        assert_eq!(b + EdwardsPoint::IDENTITY, b);
        assert_eq!(b - b, EdwardsPoint::IDENTITY);
        assert_eq!(b + (-b), EdwardsPoint::IDENTITY);
    }

    #[test]
    fn fixed_base_matches_variable_base() {
        for n in [0u8, 1, 2, 7, 8, 9, 200] {
            let k = scalar(n);
            assert_eq!(EdwardsPoint::mul_base(&k), &ED25519_BASEPOINT * &k);
        }

        let k = Scalar::from_bytes_mod_order_wide(&[0x5a; 64]);
        assert_eq!(EdwardsPoint::mul_base(&k), ED25519_BASEPOINT * k);
    }

    #[test]
    fn small_multiples_match_repeated_addition() {
        let b = ED25519_BASEPOINT;
        let three = b + b + b;
        assert_eq!(EdwardsPoint::mul_base(&scalar(3)), three);
        assert_eq!(EdwardsPoint::mul_base(&scalar(16)), b.mul_by_pow_2(4));
    }

    #[test]
    fn base_table_rows_are_powers_of_256() {
        let b = ED25519_BASEPOINT;
        let row1_first = CompletedPoint::from_mixed_sum(&EdwardsPoint::IDENTITY, &BASE[1][0]).to_extended();
        assert_eq!(row1_first, b.mul_by_pow_2(8));
    }

    #[test]
    fn multiplication_by_order_is_identity() {
        // ℓ − 1 times B, plus B, is the identity.
        let mut l_minus_one = [
            0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde,
            0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x10,
        ];
        l_minus_one[0] -= 1;
        let k = Scalar::from_bytes_mod_order(l_minus_one);

        assert_eq!(EdwardsPoint::mul_base(&k) + ED25519_BASEPOINT, EdwardsPoint::IDENTITY);
    }

    #[test]
    fn compress_decompress_roundtrip() {
        let p = EdwardsPoint::mul_base(&Scalar::from_bytes_mod_order([0x33; 32]));
        let encoded = p.compress();
        let decoded = encoded.decompress().expect("valid point");

        assert_eq!(decoded, p);
        assert_eq!(decoded.compress(), encoded);
    }

    #[test]
    fn rejects_non_canonical_y() {
        // y = p + 1 ≡ 1 is a valid curve y, but the encoding is not canonical.
        let mut bytes = [0xff; 32];
        bytes[0] = 0xee;
        bytes[31] = 0x7f;

        assert_eq!(CompressedEdwardsY(bytes).decompress(), Err(Error::InvalidEncoding));
    }

    #[test]
    fn rejects_negative_zero_x() {
        // y = 1 gives x = 0; setting the sign bit asks for −0.
        let mut bytes = [0u8; 32];
        bytes[0] = 1;
        bytes[31] = 0x80;

        assert_eq!(CompressedEdwardsY(bytes).decompress(), Err(Error::InvalidEncoding));
    }

    #[test]
    fn rejects_non_square() {
        // y = 2: (y² − 1) / (d·y² + 1) is not a square.
        let mut bytes = [0u8; 32];
        bytes[0] = 2;

        assert_eq!(CompressedEdwardsY(bytes).decompress(), Err(Error::InvalidEncoding));
    }

    #[test]
    fn montgomery_image_of_basepoint_is_nine() {
        let mut nine = [0u8; 32];
        nine[0] = 9;
        assert_eq!(ED25519_BASEPOINT.to_montgomery().0, nine);
        assert_eq!(EdwardsPoint::IDENTITY.to_montgomery().0, [0u8; 32]);
    }
}
