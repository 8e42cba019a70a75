//! Ed25519 signatures (RFC 8032, PureEdDSA over edwards25519).
//!
//! The functions here are byte-oriented: seeds, public keys and
//! signatures are plain fixed-size arrays, and every derived value is
//! recomputed from the seed on each call. The typed equivalents are
//! [`PrivateKey`](crate::keys::ed25519::PrivateKey) and
//! [`PublicKey`](crate::keys::ed25519::PublicKey).

/// Public key derivation from a seed.
pub mod keypair;

/// Deterministic signing.
pub mod sign;

/// Signature verification.
pub mod verify;

pub use keypair::publickey;
pub use sign::sign;
pub use verify::sign_open;
