use log::debug;
use subtle::ConstantTimeEq;

use crate::curve::{CompressedEdwardsY, EdwardsPoint, Scalar};
use crate::error::{Error, Result};
use crate::hash::sha512_parts;
use crate::keys::ed25519::{PublicKey, Signature};

/// Verifies a 64-byte signature over `message`.
///
/// Fails with [`Error::InvalidEncoding`] when `public_key` does not decode
/// to a curve point, and with [`Error::VerificationFailed`] on any other
/// mismatch.
pub fn sign_open(message: &[u8], signature: &[u8; 64], public_key: &[u8; 32]) -> Result<()> {
    let key = PublicKey::from_bytes(public_key)?;

    verify_with_key(&key, message, &Signature::from_bytes(signature))
}

/// Checks `R = S·B − k·A` with `k = H(R ‖ A ‖ M)`.
///
/// `S` must be canonical. `R` is compared as bytes against the canonical
/// encoding of the recomputed point, so a non-canonical `R` never verifies.
pub(crate) fn verify_with_key(key: &PublicKey, message: &[u8], signature: &Signature) -> Result<()> {
    let Some(s) = Scalar::from_canonical_bytes(*signature.s_bytes()) else {
        debug!("signature rejected: S is not reduced modulo the group order");
        return Err(Error::VerificationFailed);
    };

    let digest = sha512_parts(&[&signature.r_bytes()[..], &key.as_bytes()[..], message]);
    let k = Scalar::from_bytes_mod_order_wide(&digest);

    let minus_a = -*key.as_point();
    let expected_r = EdwardsPoint::mul_base(&s) + &minus_a * &k;

    let r = CompressedEdwardsY(*signature.r_bytes());
    if bool::from(expected_r.compress().ct_eq(&r)) {
        Ok(())
    } else {
        debug!("signature rejected: recomputed R does not match");
        Err(Error::VerificationFailed)
    }
}
