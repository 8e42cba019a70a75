//! Finite field arithmetic for Curve25519.
//!
//! This module implements arithmetic in the prime field
//!
//! ```text
//! 𝔽ₚ where p = 2²⁵⁵ − 19
//! ```
//!
//! shared by the Edwards form (Ed25519) and the Montgomery form (X25519).
//!
//! ## Representation
//!
//! Field elements are stored as five unsigned 64-bit limbs in radix 2⁵¹:
//!
//! ```text
//! value = l₀ + l₁·2⁵¹ + l₂·2¹⁰² + l₃·2¹⁵³ + l₄·2²⁰⁴
//! ```
//!
//! Limb products are accumulated in `u128`. Every operation returns a
//! weakly reduced element (each limb below 2⁵² ), which keeps the inputs of
//! the next multiplication far from overflow. Full reduction to the
//! canonical residue only happens when encoding.
//!
//! ## Design goals
//!
//! - **Constant-time execution**: no secret-dependent branches or indices.
//! - **Lazy reduction**: carries are folded back with the factor 19, and the
//!   canonical form is computed only by [`FieldElement::to_bytes`].
//! - Comparisons and sign tests always go through the canonical encoding.

use core::ops::{Add, Mul, Neg, Sub};

use subtle::{Choice, ConditionallyNegatable, ConditionallySelectable, ConstantTimeEq};

use super::table::SQRT_M1;

const LOW_51_BIT_MASK: u64 = (1u64 << 51) - 1;

/// `16·p` in radix 2⁵¹, added before subtracting so no limb underflows.
const SIXTEEN_P: [u64; 5] = [
    36_028_797_018_963_664,
    36_028_797_018_963_952,
    36_028_797_018_963_952,
    36_028_797_018_963_952,
    36_028_797_018_963_952,
];

/// Widening limb product.
#[inline(always)]
fn m(x: u64, y: u64) -> u128 {
    (x as u128) * (y as u128)
}

/// Loads 8 little-endian bytes starting at `offset`.
#[inline(always)]
fn load_8(input: &[u8], offset: usize) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&input[offset..offset + 8]);
    u64::from_le_bytes(word)
}

/// Field element modulo `2^255 - 19`, in radix 2⁵¹.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FieldElement(pub(crate) [u64; 5]);

impl FieldElement {
    /// The additive identity (0).
    pub(crate) const ZERO: Self = FieldElement([0; 5]);

    /// The multiplicative identity (1).
    pub(crate) const ONE: Self = FieldElement([1, 0, 0, 0, 0]);

    /// Propagates carries once so every limb fits in 52 bits.
    ///
    /// The carry out of the top limb is worth `2^255 ≡ 19`.
    #[inline(always)]
    fn weak_reduce(mut limbs: [u64; 5]) -> Self {
        let c0 = limbs[0] >> 51;
        let c1 = limbs[1] >> 51;
        let c2 = limbs[2] >> 51;
        let c3 = limbs[3] >> 51;
        let c4 = limbs[4] >> 51;

        limbs[0] &= LOW_51_BIT_MASK;
        limbs[1] &= LOW_51_BIT_MASK;
        limbs[2] &= LOW_51_BIT_MASK;
        limbs[3] &= LOW_51_BIT_MASK;
        limbs[4] &= LOW_51_BIT_MASK;

        limbs[0] += c4 * 19;
        limbs[1] += c0;
        limbs[2] += c1;
        limbs[3] += c2;
        limbs[4] += c3;

        FieldElement(limbs)
    }

    /// Carries a wide product back into five 51-bit limbs.
    #[inline(always)]
    fn carry_wide(mut h: [u128; 5]) -> Self {
        h[1] += h[0] >> 51;
        h[2] += h[1] >> 51;
        h[3] += h[2] >> 51;
        h[4] += h[3] >> 51;

        let carry = (h[4] >> 51) as u64;

        let mut out = [
            (h[0] as u64) & LOW_51_BIT_MASK,
            (h[1] as u64) & LOW_51_BIT_MASK,
            (h[2] as u64) & LOW_51_BIT_MASK,
            (h[3] as u64) & LOW_51_BIT_MASK,
            (h[4] as u64) & LOW_51_BIT_MASK,
        ];

        out[0] += carry * 19;
        out[1] += out[0] >> 51;
        out[0] &= LOW_51_BIT_MASK;

        FieldElement(out)
    }

    /// Decodes a field element from a 32-byte little-endian encoding.
    ///
    /// Bit 255 is ignored. Encodings of values in `[p, 2^255)` are accepted
    /// and represent their residue; callers needing canonical input must
    /// re-encode and compare.
    pub(crate) fn from_bytes(bytes: &[u8; 32]) -> Self {
        FieldElement([
            load_8(bytes, 0) & LOW_51_BIT_MASK,
            (load_8(bytes, 6) >> 3) & LOW_51_BIT_MASK,
            (load_8(bytes, 12) >> 6) & LOW_51_BIT_MASK,
            (load_8(bytes, 19) >> 1) & LOW_51_BIT_MASK,
            (load_8(bytes, 24) >> 12) & LOW_51_BIT_MASK,
        ])
    }

    /// Encodes this element into its canonical 32-byte little-endian form.
    ///
    /// The value is fully reduced below `p` first, so equal residues always
    /// produce identical bytes and bit 255 of the output is zero.
    pub(crate) fn to_bytes(self) -> [u8; 32] {
        let mut limbs = Self::weak_reduce(self.0).0;

        // q = 1 exactly when the weakly reduced value is >= p.
        let mut q = (limbs[0] + 19) >> 51;
        q = (limbs[1] + q) >> 51;
        q = (limbs[2] + q) >> 51;
        q = (limbs[3] + q) >> 51;
        q = (limbs[4] + q) >> 51;

        // Adding 19·q and dropping bit 255 subtracts q·p.
        limbs[0] += 19 * q;

        limbs[1] += limbs[0] >> 51;
        limbs[0] &= LOW_51_BIT_MASK;
        limbs[2] += limbs[1] >> 51;
        limbs[1] &= LOW_51_BIT_MASK;
        limbs[3] += limbs[2] >> 51;
        limbs[2] &= LOW_51_BIT_MASK;
        limbs[4] += limbs[3] >> 51;
        limbs[3] &= LOW_51_BIT_MASK;
        limbs[4] &= LOW_51_BIT_MASK;

        let words = [
            limbs[0] | (limbs[1] << 51),
            (limbs[1] >> 13) | (limbs[2] << 38),
            (limbs[2] >> 26) | (limbs[3] << 25),
            (limbs[3] >> 39) | (limbs[4] << 12),
        ];

        let mut out = [0u8; 32];
        for (chunk, word) in out.chunks_exact_mut(8).zip(words) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }

        out
    }

    /// Returns `1` when the canonical encoding is odd.
    ///
    /// Ed25519 calls such elements negative; the sign of `x` is the bit
    /// packed into compressed points.
    pub(crate) fn is_negative(&self) -> Choice {
        Choice::from(self.to_bytes()[0] & 1)
    }

    /// Returns `1` when this element is congruent to zero.
    pub(crate) fn is_zero(&self) -> Choice {
        self.to_bytes()[..].ct_eq(&[0u8; 32][..])
    }

    /// Computes `self²`.
    pub(crate) fn square(&self) -> Self {
        let f = &self.0;

        let f0_2 = 2 * f[0];
        let f1_2 = 2 * f[1];
        let f3_19 = 19 * f[3];
        let f4_19 = 19 * f[4];

        let h0 = m(f[0], f[0]) + m(f1_2, f4_19) + m(2 * f[2], f3_19);
        let h1 = m(f0_2, f[1]) + m(2 * f[2], f4_19) + m(f[3], f3_19);
        let h2 = m(f0_2, f[2]) + m(f[1], f[1]) + m(2 * f[3], f4_19);
        let h3 = m(f0_2, f[3]) + m(f1_2, f[2]) + m(f[4], f4_19);
        let h4 = m(f0_2, f[4]) + m(f1_2, f[3]) + m(f[2], f[2]);

        Self::carry_wide([h0, h1, h2, h3, h4])
    }

    /// Computes `self^(2^k)` by `k` successive squarings, `k >= 1`.
    pub(crate) fn pow2k(&self, k: u32) -> Self {
        debug_assert!(k > 0);

        let mut out = self.square();
        for _ in 1..k {
            out = out.square();
        }

        out
    }

    /// Multiplies by the ladder constant `a24 = (486662 − 2) / 4 = 121665`.
    pub(crate) fn mul121665(&self) -> Self {
        const A24: u64 = 121_665;

        Self::carry_wide([
            m(self.0[0], A24),
            m(self.0[1], A24),
            m(self.0[2], A24),
            m(self.0[3], A24),
            m(self.0[4], A24),
        ])
    }

    /// Returns `(self^(2^250 − 1), self^11)`, the shared prefix of the
    /// inversion and square-root exponent chains.
    fn pow22501(&self) -> (Self, Self) {
        let t0 = self.square(); // 2
        let t1 = t0.pow2k(2); // 8
        let t2 = *self * t1; // 9
        let t3 = t0 * t2; // 11
        let t4 = t3.square(); // 22
        let t5 = t2 * t4; // 2^5 - 1
        let t6 = t5.pow2k(5);
        let t7 = t6 * t5; // 2^10 - 1
        let t8 = t7.pow2k(10);
        let t9 = t8 * t7; // 2^20 - 1
        let t10 = t9.pow2k(20);
        let t11 = t10 * t9; // 2^40 - 1
        let t12 = t11.pow2k(10);
        let t13 = t12 * t7; // 2^50 - 1
        let t14 = t13.pow2k(50);
        let t15 = t14 * t13; // 2^100 - 1
        let t16 = t15.pow2k(100);
        let t17 = t16 * t15; // 2^200 - 1
        let t18 = t17.pow2k(50);
        let t19 = t18 * t13; // 2^250 - 1

        (t19, t3)
    }

    /// Computes the multiplicative inverse `self^(p − 2)`.
    ///
    /// The inverse of zero is zero.
    pub(crate) fn invert(&self) -> Self {
        let (t19, t3) = self.pow22501();
        let t20 = t19.pow2k(5); // 2^255 - 32

        t20 * t3 // 2^255 - 21
    }

    /// Computes `self^((p − 5) / 8) = self^(2^252 − 3)`.
    fn pow_p58(&self) -> Self {
        let (t19, _) = self.pow22501();
        let t20 = t19.pow2k(2); // 2^252 - 4

        *self * t20
    }

    /// Computes the non-negative square root of `u / v`, if it exists.
    ///
    /// Returns `(1, sqrt(u/v))` when `u/v` is a square (including `u = 0`),
    /// and `(0, garbage)` otherwise. Since `p ≡ 5 (mod 8)`, the candidate
    /// `r = u·v³·(u·v⁷)^((p−5)/8)` is either a root or a root times `√−1`.
    pub(crate) fn sqrt_ratio_i(u: &Self, v: &Self) -> (Choice, Self) {
        let v3 = v.square() * *v;
        let v7 = v3.square() * *v;
        let mut r = (*u * v3) * (*u * v7).pow_p58();
        let check = *v * r.square();

        let minus_u = -*u;
        let correct_sign_sqrt = check.ct_eq(u);
        let flipped_sign_sqrt = check.ct_eq(&minus_u);
        let flipped_sign_sqrt_i = check.ct_eq(&(minus_u * SQRT_M1));

        let r_prime = SQRT_M1 * r;
        r.conditional_assign(&r_prime, flipped_sign_sqrt | flipped_sign_sqrt_i);

        let r_is_negative = r.is_negative();
        r.conditional_negate(r_is_negative);

        (correct_sign_sqrt | flipped_sign_sqrt, r)
    }
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        FieldElement([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
            u64::conditional_select(&a.0[4], &b.0[4], choice),
        ])
    }
}

impl ConstantTimeEq for FieldElement {
    /// Compares canonical encodings, so non-reduced representations of the
    /// same residue are equal.
    fn ct_eq(&self, other: &Self) -> Choice {
        self.to_bytes()[..].ct_eq(&other.to_bytes()[..])
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for FieldElement {}

impl Add for FieldElement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::weak_reduce([
            self.0[0] + rhs.0[0],
            self.0[1] + rhs.0[1],
            self.0[2] + rhs.0[2],
            self.0[3] + rhs.0[3],
            self.0[4] + rhs.0[4],
        ])
    }
}

impl Sub for FieldElement {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::weak_reduce([
            (self.0[0] + SIXTEEN_P[0]) - rhs.0[0],
            (self.0[1] + SIXTEEN_P[1]) - rhs.0[1],
            (self.0[2] + SIXTEEN_P[2]) - rhs.0[2],
            (self.0[3] + SIXTEEN_P[3]) - rhs.0[3],
            (self.0[4] + SIXTEEN_P[4]) - rhs.0[4],
        ])
    }
}

impl Mul for FieldElement {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let f = &self.0;
        let g = &rhs.0;

        // 2^255 ≡ 19, so limbs that overflow past l₄ come back times 19.
        let g1_19 = 19 * g[1];
        let g2_19 = 19 * g[2];
        let g3_19 = 19 * g[3];
        let g4_19 = 19 * g[4];

        let h0 = m(f[0], g[0]) + m(f[4], g1_19) + m(f[3], g2_19) + m(f[2], g3_19) + m(f[1], g4_19);
        let h1 = m(f[0], g[1]) + m(f[1], g[0]) + m(f[4], g2_19) + m(f[3], g3_19) + m(f[2], g4_19);
        let h2 = m(f[0], g[2]) + m(f[1], g[1]) + m(f[2], g[0]) + m(f[4], g3_19) + m(f[3], g4_19);
        let h3 = m(f[0], g[3]) + m(f[1], g[2]) + m(f[2], g[1]) + m(f[3], g[0]) + m(f[4], g4_19);
        let h4 = m(f[0], g[4]) + m(f[1], g[3]) + m(f[2], g[2]) + m(f[3], g[1]) + m(f[4], g[0]);

        Self::carry_wide([h0, h1, h2, h3, h4])
    }
}

impl Neg for &FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        FieldElement::ZERO - *self
    }
}

impl Neg for FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        -&self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// p − 1 in little-endian bytes.
    const P_MINUS_ONE: [u8; 32] = [
        0xec, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0x7f,
    ];

    fn small(n: u64) -> FieldElement {
        FieldElement([n, 0, 0, 0, 0])
    }

    fn sample() -> FieldElement {
        FieldElement([
            0x123456789abcd,
            0x23456789abcde,
            0x3456789abcdef,
            0x456789abcdef0,
            0x56789abcdef01,
        ])
    }

    #[test]
    fn zero_and_one() {
        assert!(bool::from(FieldElement::ZERO.is_zero()));
        assert!(!bool::from(FieldElement::ONE.is_zero()));
        assert_eq!(FieldElement::ONE.to_bytes()[0], 1);
    }

    #[test]
    fn add_then_sub_is_identity() {
        let a = sample();
        let b = FieldElement([9876543, 8765432, 7654321, 6543210, 5432109]);

        assert_eq!((a + b) - b, a);
        assert_eq!(a - a, FieldElement::ZERO);
    }

    #[test]
    fn square_matches_mul() {
        let a = sample();
        assert_eq!(a.square(), a * a);
        assert_eq!(a.pow2k(3), a.square().square().square());
    }

    #[test]
    fn invert_gives_multiplicative_inverse() {
        let a = sample();
        assert_eq!(a * a.invert(), FieldElement::ONE);
        assert_eq!(small(42) * small(42).invert(), FieldElement::ONE);
    }

    #[test]
    fn invert_of_zero_is_zero() {
        assert!(bool::from(FieldElement::ZERO.invert().is_zero()));
    }

    #[test]
    fn negation_wraps_modulus() {
        let minus_one = -FieldElement::ONE;
        assert_eq!(minus_one.to_bytes(), P_MINUS_ONE);
        assert_eq!(minus_one + FieldElement::ONE, FieldElement::ZERO);
    }

    #[test]
    fn encoding_is_canonical() {
        // p itself decodes to zero, p + 1 to one.
        let mut p = P_MINUS_ONE;
        p[0] = 0xed;
        assert_eq!(FieldElement::from_bytes(&p).to_bytes(), [0u8; 32]);

        p[0] = 0xee;
        assert_eq!(FieldElement::from_bytes(&p), FieldElement::ONE);
    }

    #[test]
    fn decoding_ignores_top_bit() {
        let mut bytes = sample().to_bytes();
        let plain = FieldElement::from_bytes(&bytes);
        bytes[31] |= 0x80;

        assert_eq!(FieldElement::from_bytes(&bytes), plain);
    }

    #[test]
    fn encode_decode_roundtrip() {
        let a = sample();
        assert_eq!(FieldElement::from_bytes(&a.to_bytes()).to_bytes(), a.to_bytes());
    }

    #[test]
    fn sqrt_m1_squares_to_minus_one() {
        assert_eq!(SQRT_M1.square(), -FieldElement::ONE);
    }

    #[test]
    fn sqrt_ratio_of_square() {
        let x = sample();
        let v = small(7);
        let u = x.square() * v;

        let (ok, r) = FieldElement::sqrt_ratio_i(&u, &v);
        assert!(bool::from(ok));
        assert_eq!(r.square() * v, u);
        assert!(!bool::from(r.is_negative()));
    }

    #[test]
    fn sqrt_ratio_of_non_square() {
        // 2 is a non-residue modulo p.
        let (ok, _) = FieldElement::sqrt_ratio_i(&small(2), &FieldElement::ONE);
        assert!(!bool::from(ok));
    }

    #[test]
    fn sqrt_ratio_of_zero() {
        let (ok, r) = FieldElement::sqrt_ratio_i(&FieldElement::ZERO, &small(5));
        assert!(bool::from(ok));
        assert!(bool::from(r.is_zero()));
    }

    #[test]
    fn conditional_swap() {
        let mut a = small(1);
        let mut b = small(2);

        FieldElement::conditional_swap(&mut a, &mut b, Choice::from(0));
        assert_eq!((a.0[0], b.0[0]), (1, 2));

        FieldElement::conditional_swap(&mut a, &mut b, Choice::from(1));
        assert_eq!((a.0[0], b.0[0]), (2, 1));
    }

    #[test]
    fn conditional_move() {
        let mut a = small(1);
        a.conditional_assign(&small(9), Choice::from(0));
        assert_eq!(a, small(1));

        a.conditional_assign(&small(9), Choice::from(1));
        assert_eq!(a, small(9));
    }

    #[test]
    fn mul121665_matches_mul() {
        let a = sample();
        assert_eq!(a.mul121665(), a * small(121_665));
    }

    #[test]
    fn sign_follows_low_bit() {
        assert!(!bool::from(small(2).is_negative()));
        assert!(bool::from(small(3).is_negative()));
        // -1 = p - 1 is even.
        assert!(!bool::from((-FieldElement::ONE).is_negative()));
    }
}
