//! X25519 key agreement.
//!
//! Two byte orders are served here.
//!
//! The typed functions ([`clamp`], [`public_key`], [`exchange`],
//! [`exchange_contributory`], [`generate`]) use the RFC 7748 wire form:
//! secrets and u-coordinates are 32 little-endian bytes.
//!
//! The flat pair [`key_from_random`] / [`x25519`] works on the big-endian
//! form used where Curve25519 secrets and points are stored as native
//! multi-precision integers (for example OpenPGP `cv25519` keys). They
//! reverse their inputs and output around the same ladder, so for every
//! `k` and `u`:
//!
//! ```text
//! x25519(k, u) = reverse(exchange(reverse(k), reverse(u)))
//! ```
//!
//! No input is rejected. Low-order u-coordinates produce the all-zero
//! output defined by RFC 7748; [`exchange_contributory`] is the variant
//! that reports it as an error.

use log::debug;
use zeroize::Zeroize;

#[cfg(feature = "rand_core")]
use rand_core::{CryptoRng, RngCore};

use crate::curve::scalar::clamp_integer;
use crate::curve::{MontgomeryPoint, X25519_BASEPOINT};
use crate::error::{Error, Result};

/// Applies RFC 7748 clamping to a little-endian secret.
#[inline]
pub fn clamp(raw: [u8; 32]) -> [u8; 32] {
    clamp_integer(raw)
}

/// Computes the public u-coordinate `clamp(secret) · 9`.
pub fn public_key(secret: &[u8; 32]) -> [u8; 32] {
    MontgomeryPoint::mul_base_clamped(*secret).to_bytes()
}

/// Computes the raw shared secret `clamp(secret) · peer`.
///
/// The top bit of `peer` is ignored. The result may be all zeros when
/// `peer` has small order.
pub fn exchange(secret: &[u8; 32], peer: &[u8; 32]) -> [u8; 32] {
    MontgomeryPoint(*peer).mul_clamped(*secret).to_bytes()
}

/// Like [`exchange`], but fails with [`Error::NonContributory`] when the
/// shared secret is all zeros.
pub fn exchange_contributory(secret: &[u8; 32], peer: &[u8; 32]) -> Result<[u8; 32]> {
    let shared = MontgomeryPoint(*peer).mul_clamped(*secret);

    if bool::from(shared.is_zero()) {
        debug!("x25519 exchange rejected: peer point has small order");
        return Err(Error::NonContributory);
    }

    Ok(shared.to_bytes())
}

/// Draws a clamped little-endian secret from `rng`.
#[cfg(feature = "rand_core")]
pub fn generate<R: CryptoRng + RngCore>(rng: &mut R) -> [u8; 32] {
    let mut raw = [0u8; 32];
    rng.fill_bytes(&mut raw);

    let secret = clamp(raw);
    raw.zeroize();

    secret
}

/// Clamps a big-endian secret in place.
///
/// Clears the three low bits of the last byte, clears the top bit of the
/// first byte and sets its second-highest bit.
pub fn key_from_random(raw: &mut [u8; 32]) {
    raw[31] &= 248;
    raw[0] &= 127;
    raw[0] |= 64;
}

/// Big-endian X25519: `clamp(scalar) · u`.
///
/// The scalar is clamped internally and bit 7 of `u[0]` is ignored, so
/// every input is accepted.
pub fn x25519(scalar: &[u8; 32], u: &[u8; 32]) -> [u8; 32] {
    let mut secret = *scalar;
    secret.reverse();

    let mut point = *u;
    point.reverse();

    let mut out = exchange(&secret, &point);
    out.reverse();
    secret.zeroize();

    out
}

/// The little-endian base point, `u = 9`.
pub const BASEPOINT: [u8; 32] = X25519_BASEPOINT;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn big_endian_clamping_mirrors_little_endian() {
        let raw: [u8; 32] = core::array::from_fn(|i| (i as u8).wrapping_mul(37).wrapping_add(11));

        let mut be = raw;
        be.reverse();
        key_from_random(&mut be);
        be.reverse();

        assert_eq!(be, clamp(raw));
    }

    #[test]
    fn exchange_with_basepoint_is_public_key() {
        let secret = [0x5c; 32];
        assert_eq!(exchange(&secret, &BASEPOINT), public_key(&secret));
    }

    #[test]
    fn flat_and_typed_forms_agree() {
        let scalar = [0x21; 32];
        let mut u = [0u8; 32];
        u[31] = 9;

        let mut le = exchange(&scalar, &BASEPOINT);
        le.reverse();

        assert_eq!(x25519(&scalar, &u), le);
    }
}
