//! Hash functions used by the signature scheme.
//!
//! Ed25519 needs exactly one hash, SHA-512, applied to short
//! concatenations (seed; prefix ‖ message; R ‖ A ‖ message). The
//! implementation comes from the `sha2` crate.

pub mod sha512;

/// Re-export of the SHA-512 convenience functions.
pub use sha512::{Sha512, sha512};
pub(crate) use sha512::sha512_parts;
