use crate::keys::ed25519::ExpandedSecret;

/// Derives the 32-byte public key of a seed.
///
/// Hashes the seed with SHA-512, clamps the low half into the secret
/// scalar `a`, and returns the encoding of `a·B`. Deterministic: the same
/// seed always gives the same key.
pub fn publickey(seed: &[u8; 32]) -> [u8; 32] {
    ExpandedSecret::from_seed(seed).public_key().to_bytes()
}
