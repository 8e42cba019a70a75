//! Error type shared by the whole crate.
//!
//! Only decoding and verification can fail cryptographically. Field and
//! scalar arithmetic, the ladder, signing and key derivation are total
//! functions and never return an error. Wrong buffer sizes handed to the
//! slice-based constructors are reported separately as
//! [`Error::InvalidLength`].

/// Errors returned by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A compressed Edwards point has no square root for `x` or is not in
    /// canonical form.
    #[error("invalid point encoding")]
    InvalidEncoding,

    /// A signature did not verify under the given public key.
    #[error("signature verification failed")]
    VerificationFailed,

    /// A byte slice had the wrong length for the requested type.
    #[error("invalid length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },

    /// An X25519 exchange produced the all-zero shared secret, meaning the
    /// peer's u-coordinate had small order.
    #[error("key exchange produced a non-contributory shared secret")]
    NonContributory,
}

/// Result type alias used across the crate.
pub type Result<T> = core::result::Result<T, Error>;
