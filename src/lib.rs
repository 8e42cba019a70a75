//! Ed25519 signatures and X25519 key exchange over Curve25519.
//!
//! This crate implements the two Curve25519 primitives end to end: the
//! field and scalar arithmetic, the Edwards group, the Montgomery ladder,
//! and the RFC 8032 / RFC 7748 constructions on top of them.
//!
//! The focus is on **constant-time execution, predictability, and
//! auditability**. Every operation on secret data runs the same sequence
//! of instructions and memory accesses regardless of the data; the engine
//! holds no state between calls and never allocates.
//!
//! # Module overview
//!
//! - `curve`
//!   Arithmetic layers: the prime field `2^255 − 19`, scalars modulo the
//!   group order ℓ, the twisted Edwards group (with its fixed-base
//!   table) and the X25519 Montgomery ladder.
//!
//! - `hash`
//!   SHA-512, the only hash used by Ed25519.
//!
//! - `keys`
//!   Key material. Ed25519 private keys (seed-backed, zeroized on drop),
//!   validated public keys and signatures; X25519 clamping, public key
//!   derivation and key agreement.
//!
//! - `signatures`
//!   Ed25519 signing and verification.
//!
//! - `error`
//!   The crate-wide [`Error`] type.
//!
//! # Flat API
//!
//! The byte-oriented entry points are re-exported at the crate root:
//!
//! - [`publickey`]: seed → public key
//! - [`sign`]: message, seed, public key → signature
//! - [`sign_open`]: message, signature, public key → accept / reject
//! - [`key_from_random`]: clamp raw entropy into an X25519 secret
//! - [`x25519`]: scalar, u-coordinate → u-coordinate
//!
//! The flat X25519 pair works on big-endian byte strings; the typed
//! functions in [`keys::x25519`] use the RFC 7748 little-endian form.
//!
//! # Design goals
//!
//! - No heap allocations
//! - No secret-dependent branches or table indices
//! - Decoding is validating: invalid or non-canonical points are rejected
//! - Secrets are wiped once they are no longer needed

pub mod curve;
pub mod error;
pub mod hash;
pub mod keys;
pub mod signatures;

pub use error::{Error, Result};
pub use keys::x25519::{key_from_random, x25519};
pub use signatures::ed25519::{publickey, sign, sign_open};
