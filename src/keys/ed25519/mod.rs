//! Ed25519 key material.
//!
//! The types here own and validate key bytes. Signing and verification
//! logic lives in [`crate::signatures::ed25519`]; the methods on these
//! types are thin entry points into it.

pub(crate) mod core;

pub use self::core::{
    PUBLIC_KEY_LENGTH, PrivateKey, PublicKey, SECRET_KEY_LENGTH, SIGNATURE_LENGTH, Signature,
};
pub(crate) use self::core::ExpandedSecret;
