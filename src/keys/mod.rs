//! Key material and key agreement.
//!
//! ## Ed25519
//!
//! The `ed25519` module defines the seed-backed [`ed25519::PrivateKey`],
//! the validated [`ed25519::PublicKey`] and the [`ed25519::Signature`]
//! container used by the signature scheme of RFC 8032.
//!
//! ## X25519
//!
//! The `x25519` module implements Curve25519 Diffie–Hellman key agreement
//! (RFC 7748): key clamping, public key derivation and shared-secret
//! computation through the Montgomery ladder.
pub mod ed25519;
pub mod x25519;
