//! Scalar arithmetic modulo the prime group order ℓ.
//!
//! ```text
//! ℓ = 2^252 + 27742317777372353535851937790883648493
//! ```
//!
//! Scalars are the exponents of the prime-order subgroup: secret keys,
//! signing nonces, hash challenges and the `S` half of a signature.
//!
//! ## Representation
//!
//! A [`Scalar`] is stored as 32 little-endian bytes. Every value built by
//! this module is fully reduced below ℓ, except for clamped integers which
//! are only guaranteed to have bit 255 clear. Either way the top bit is
//! zero, which is what the radix-16 recoding used by point multiplication
//! requires.
//!
//! ## Algorithms
//!
//! Reduction works on signed radix-2²¹ limbs held in `i64`. Limbs at or
//! above position 12 (bit 252) are folded back using
//!
//! ```text
//! 2^252 ≡ −27742317777372353535851937790883648493 (mod ℓ)
//! ```
//!
//! whose radix-2²¹ digits are [`REDUCTION`]. Folding and carrying alternate
//! until twelve non-negative limbs remain, which are then packed back into
//! bytes. No step branches on limb values.

use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

/// Mask for one radix-2²¹ limb.
const MASK_21: i64 = (1 << 21) - 1;

/// Coefficients `c` such that `2^252 ≡ Σ c[j]·2^(21·j) (mod ℓ)`.
const REDUCTION: [i64; 6] = [666_643, 470_296, 654_183, -997_805, 136_657, -683_901];

/// An integer modulo ℓ, in little-endian byte form.
#[derive(Clone, Copy, Debug, Default, Zeroize)]
pub struct Scalar(pub(crate) [u8; 32]);

impl Scalar {
    /// The scalar `0`.
    pub const ZERO: Self = Scalar([0; 32]);

    /// The scalar `1`.
    pub const ONE: Self = {
        let mut bytes = [0u8; 32];
        bytes[0] = 1;
        Scalar(bytes)
    };

    /// Reduces a 256-bit little-endian integer modulo ℓ.
    pub fn from_bytes_mod_order(bytes: [u8; 32]) -> Self {
        let mut wide = [0u8; 64];
        wide[..32].copy_from_slice(&bytes);

        let scalar = Self::from_bytes_mod_order_wide(&wide);
        wide.zeroize();

        scalar
    }

    /// Reduces a 512-bit little-endian integer modulo ℓ.
    ///
    /// This is how SHA-512 digests become nonces and challenges.
    pub fn from_bytes_mod_order_wide(wide: &[u8; 64]) -> Self {
        let mut limbs = load_limbs::<24>(wide);
        let scalar = Scalar(reduce_limbs(&mut limbs));
        limbs.zeroize();

        scalar
    }

    /// Accepts `bytes` only if it already encodes an integer below ℓ.
    ///
    /// Signature verification uses this to reject malleable `S` values.
    pub fn from_canonical_bytes(bytes: [u8; 32]) -> Option<Self> {
        let candidate = Scalar(bytes);
        let reduced = Self::from_bytes_mod_order(bytes);

        if bool::from(candidate.ct_eq(&reduced)) {
            Some(candidate)
        } else {
            None
        }
    }

    /// Clamps a 32-byte string and keeps it unreduced.
    ///
    /// The result is a multiple of the cofactor 8 in `[2^254, 2^255)`.
    pub fn from_clamped(bytes: [u8; 32]) -> Self {
        Scalar(clamp_integer(bytes))
    }

    /// Returns the little-endian encoding.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Borrows the little-endian encoding.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Computes `a·b + c mod ℓ`.
    ///
    /// This is the final step of signing: `S = k·a + r`. Inputs may be any
    /// 256-bit values with bit 255 clear; the output is fully reduced.
    pub fn mul_add(a: &Scalar, b: &Scalar, c: &Scalar) -> Self {
        let mut a = load_limbs::<12>(&a.0);
        let mut b = load_limbs::<12>(&b.0);
        let mut c = load_limbs::<12>(&c.0);

        let mut s = [0i64; 24];
        for (i, ai) in a.iter().enumerate() {
            for (j, bj) in b.iter().enumerate() {
                s[i + j] += ai * bj;
            }
        }
        for (si, ci) in s.iter_mut().zip(c.iter()) {
            *si += ci;
        }

        for i in (0..23).step_by(2) {
            carry_rounded(&mut s, i);
        }
        for i in (1..22).step_by(2) {
            carry_rounded(&mut s, i);
        }

        let scalar = Scalar(reduce_limbs(&mut s));

        a.zeroize();
        b.zeroize();
        c.zeroize();
        s.zeroize();

        scalar
    }

    /// Recodes the scalar into 64 signed radix-16 digits.
    ///
    /// The output satisfies `self = Σ e[i]·16^i` with every `e[i]` in
    /// `[-8, 8)`, except the last which lies in `[-8, 8]`. Requires bit 255
    /// to be clear, which every constructor in this module guarantees.
    pub(crate) fn as_radix_16(&self) -> [i8; 64] {
        debug_assert!(self.0[31] <= 127);

        let mut digits = [0i8; 64];
        for (i, byte) in self.0.iter().enumerate() {
            digits[2 * i] = (byte & 15) as i8;
            digits[2 * i + 1] = ((byte >> 4) & 15) as i8;
        }

        let mut carry = 0i8;
        for digit in digits.iter_mut().take(63) {
            *digit += carry;
            carry = (*digit + 8) >> 4;
            *digit -= carry << 4;
        }
        digits[63] += carry;

        digits
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[..].ct_eq(&other.0[..])
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Scalar {}

/// Applies the Curve25519 clamping rule to a little-endian integer.
///
/// Clears the three low bits (cofactor clearing) and bit 255, and sets
/// bit 254. Shared by Ed25519 secret expansion and X25519.
pub fn clamp_integer(mut bytes: [u8; 32]) -> [u8; 32] {
    bytes[0] &= 248;
    bytes[31] &= 127;
    bytes[31] |= 64;
    bytes
}

#[inline(always)]
fn load_3(input: &[u8]) -> u64 {
    (input[0] as u64) | ((input[1] as u64) << 8) | ((input[2] as u64) << 16)
}

#[inline(always)]
fn load_4(input: &[u8]) -> u64 {
    load_3(input) | ((input[3] as u64) << 24)
}

/// Splits a little-endian integer into `N` radix-2²¹ limbs.
///
/// The top limb is not masked and keeps every remaining bit.
fn load_limbs<const N: usize>(bytes: &[u8]) -> [i64; N] {
    let mut limbs = [0i64; N];

    for (k, limb) in limbs.iter_mut().enumerate() {
        let bit = 21 * k;
        let offset = bit / 8;
        let shift = bit % 8;

        let raw = if shift + 21 <= 24 && k + 1 < N {
            load_3(&bytes[offset..])
        } else {
            load_4(&bytes[offset..])
        };

        *limb = (raw >> shift) as i64;
        if k + 1 < N {
            *limb &= MASK_21;
        }
    }

    limbs
}

/// Folds limb `i >= 12` into limbs `i − 12 ..= i − 7`.
#[inline(always)]
fn fold(s: &mut [i64; 24], i: usize) {
    let high = s[i];
    for (j, coefficient) in REDUCTION.iter().enumerate() {
        s[i - 12 + j] += high * coefficient;
    }
    s[i] = 0;
}

/// Carries limb `i` into `i + 1`, leaving it in `[-2^20, 2^20)`.
#[inline(always)]
fn carry_rounded(s: &mut [i64; 24], i: usize) {
    let carry = (s[i] + (1 << 20)) >> 21;
    s[i + 1] += carry;
    s[i] -= carry << 21;
}

/// Carries limb `i` into `i + 1`, leaving it in `[0, 2^21)`.
#[inline(always)]
fn carry_floor(s: &mut [i64; 24], i: usize) {
    let carry = s[i] >> 21;
    s[i + 1] += carry;
    s[i] -= carry << 21;
}

/// Reduces 24 signed limbs modulo ℓ and packs the result.
fn reduce_limbs(s: &mut [i64; 24]) -> [u8; 32] {
    for i in (18..24).rev() {
        fold(s, i);
    }

    for i in (6..17).step_by(2) {
        carry_rounded(s, i);
    }
    for i in (7..16).step_by(2) {
        carry_rounded(s, i);
    }

    for i in (12..18).rev() {
        fold(s, i);
    }

    for i in (0..11).step_by(2) {
        carry_rounded(s, i);
    }
    for i in (1..12).step_by(2) {
        carry_rounded(s, i);
    }

    fold(s, 12);
    for i in 0..12 {
        carry_floor(s, i);
    }

    fold(s, 12);
    for i in 0..11 {
        carry_floor(s, i);
    }

    pack_limbs(s)
}

/// Packs twelve limbs in `[0, 2^21)` into 32 little-endian bytes.
fn pack_limbs(s: &[i64; 24]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let mut acc = 0u64;
    let mut acc_bits = 0;
    let mut index = 0;

    for limb in s.iter().take(12) {
        acc |= (*limb as u64) << acc_bits;
        acc_bits += 21;

        while acc_bits >= 8 {
            out[index] = acc as u8;
            acc >>= 8;
            acc_bits -= 8;
            index += 1;
        }
    }
    out[index] = acc as u8;

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    /// ℓ in little-endian bytes.
    const L: [u8; 32] = [
        0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde,
        0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x10,
    ];

    fn small(n: u8) -> Scalar {
        let mut bytes = [0u8; 32];
        bytes[0] = n;
        Scalar(bytes)
    }

    fn l_minus(n: u8) -> [u8; 32] {
        let mut bytes = L;
        bytes[0] -= n;
        bytes
    }

    #[test]
    fn order_reduces_to_zero() {
        assert_eq!(Scalar::from_bytes_mod_order(L), Scalar::ZERO);
    }

    #[test]
    fn wide_reduction_of_order_plus_five() {
        let mut wide = [0u8; 64];
        wide[..32].copy_from_slice(&L);
        wide[0] += 5;

        assert_eq!(Scalar::from_bytes_mod_order_wide(&wide), small(5));
    }

    #[test]
    fn all_ones_is_reduced_below_order() {
        let reduced = Scalar::from_bytes_mod_order_wide(&[0xff; 64]);
        assert!(Scalar::from_canonical_bytes(reduced.to_bytes()).is_some());
    }

    #[test]
    fn wide_reduction_known_values() {
        assert_eq!(
            Scalar::from_bytes_mod_order_wide(&[0xff; 64]).to_bytes(),
            hex!("000f9c44e31106a447938568a71b0ed065bef517d273ecce3d9a307c1b419903")
        );

        let mut counting = [0u8; 64];
        for (i, byte) in counting.iter_mut().enumerate() {
            *byte = i as u8;
        }
        assert_eq!(
            Scalar::from_bytes_mod_order_wide(&counting).to_bytes(),
            hex!("7a3c6282f02d37a05023b60d5428e6cc5961d4c31221937adae0b574e4d07205")
        );
    }

    #[test]
    fn top_byte_of_wide_input_is_reduced() {
        // 2^504 mod ℓ
        let mut wide = [0u8; 64];
        wide[63] = 1;

        let reduced = Scalar::from_bytes_mod_order_wide(&wide);
        assert_ne!(reduced, Scalar::ZERO);
        assert_eq!(
            reduced.to_bytes(),
            hex!("698912ab85f6ede21da3982276920368bef517d273ecce3d9a307c1b4199b301")
        );
    }

    #[test]
    fn canonical_boundary() {
        assert!(Scalar::from_canonical_bytes(l_minus(1)).is_some());
        assert!(Scalar::from_canonical_bytes(L).is_none());
        assert!(Scalar::from_canonical_bytes([0xff; 32]).is_none());
        assert!(Scalar::from_canonical_bytes([0u8; 32]).is_some());
    }

    #[test]
    fn mul_add_small_values() {
        assert_eq!(Scalar::mul_add(&small(2), &small(3), &small(4)), small(10));
    }

    #[test]
    fn mul_add_wraps_modulus() {
        let minus_one = Scalar(l_minus(1));

        // (-1)·(-1) + 0 = 1
        assert_eq!(Scalar::mul_add(&minus_one, &minus_one, &Scalar::ZERO), Scalar::ONE);
        // (-1)·1 + 1 = 0
        assert_eq!(Scalar::mul_add(&minus_one, &Scalar::ONE, &Scalar::ONE), Scalar::ZERO);
    }

    #[test]
    fn clamping_sets_expected_bits() {
        let clamped = clamp_integer([0xff; 32]);
        assert_eq!(clamped[0], 0xf8);
        assert_eq!(clamped[31], 0x7f);

        let clamped = clamp_integer([0u8; 32]);
        assert_eq!(clamped[31], 0x40);
    }

    #[test]
    fn radix_16_recomposes() {
        let scalar = Scalar::from_clamped([0xa7; 32]);
        let digits = scalar.as_radix_16();

        let mut carry = 0i32;
        let mut nibbles = [0u8; 64];
        for (nibble, digit) in nibbles.iter_mut().zip(digits) {
            assert!((-8..=8).contains(&digit));
            let value = digit as i32 + carry;
            *nibble = value.rem_euclid(16) as u8;
            carry = value.div_euclid(16);
        }
        assert_eq!(carry, 0);

        for (i, byte) in scalar.0.iter().enumerate() {
            assert_eq!(*byte, nibbles[2 * i] | (nibbles[2 * i + 1] << 4));
        }
    }
}
