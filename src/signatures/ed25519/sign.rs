use log::warn;
use zeroize::Zeroize;

use crate::curve::{EdwardsPoint, Scalar};
use crate::hash::sha512_parts;
use crate::keys::ed25519::{ExpandedSecret, PrivateKey};

/// Signs `message` with the key pair derived from `secret_seed`.
///
/// The expanded secret and the public key are recomputed from the seed.
/// `public_key` is only compared against the derived key: on mismatch a
/// warning is logged and the derived key is used, so the signature always
/// verifies under `publickey(secret_seed)`.
pub fn sign(message: &[u8], secret_seed: &[u8; 32], public_key: &[u8; 32]) -> [u8; 64] {
    let key = PrivateKey::from_seed(secret_seed);

    if !key.matches_public_bytes(public_key) {
        warn!("public key passed to sign does not match the seed; using the derived key");
    }

    key.sign(message).to_bytes()
}

/// Computes `R ‖ S` for an expanded secret.
///
/// ```text
/// r = H(prefix ‖ M) mod ℓ
/// R = r·B
/// k = H(R ‖ A ‖ M) mod ℓ
/// S = r + k·a mod ℓ
/// ```
pub(crate) fn sign_expanded(
    expanded: &ExpandedSecret,
    public_key: &[u8; 32],
    message: &[u8],
) -> [u8; 64] {
    let mut nonce_digest = sha512_parts(&[&expanded.prefix[..], message]);
    let mut r = Scalar::from_bytes_mod_order_wide(&nonce_digest);
    nonce_digest.zeroize();

    let big_r = EdwardsPoint::mul_base(&r).compress();

    let challenge_digest = sha512_parts(&[&big_r.as_bytes()[..], &public_key[..], message]);
    let k = Scalar::from_bytes_mod_order_wide(&challenge_digest);

    let s = Scalar::mul_add(&k, &expanded.scalar, &r);
    r.zeroize();

    let mut signature = [0u8; 64];
    signature[..32].copy_from_slice(big_r.as_bytes());
    signature[32..].copy_from_slice(s.as_bytes());

    signature
}
