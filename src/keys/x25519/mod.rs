//! X25519 Diffie–Hellman key agreement over Curve25519 (RFC 7748).

pub(crate) mod core;

pub use self::core::{
    BASEPOINT, clamp, exchange, exchange_contributory, key_from_random, public_key, x25519,
};

#[cfg(feature = "rand_core")]
pub use self::core::generate;
