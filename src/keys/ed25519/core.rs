//! Core Ed25519 key and signature types.
//!
//! This module defines the private and public key structures and the
//! signature container used by the Ed25519 signature scheme (RFC 8032).
//!
//! A [`PrivateKey`] is built from a 32-byte seed. The seed is hashed with
//! SHA-512; the low half is clamped into the secret scalar `a` and the high
//! half becomes the nonce prefix. Both are kept next to the seed and wiped
//! when the key is dropped.
//!
//! A [`PublicKey`] is always a validated curve point: decoding fails with
//! [`Error::InvalidEncoding`] rather than producing a key that could never
//! verify anything.

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

#[cfg(feature = "rand_core")]
use rand_core::{CryptoRng, RngCore};

use crate::curve::scalar::clamp_integer;
use crate::curve::{CompressedEdwardsY, EdwardsPoint, MontgomeryPoint, Scalar};
use crate::error::{Error, Result};
use crate::hash::sha512;
use crate::signatures::ed25519::{sign, verify};

/// Length of an Ed25519 seed.
pub const SECRET_KEY_LENGTH: usize = 32;

/// Length of an encoded Ed25519 public key.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Length of an Ed25519 signature.
pub const SIGNATURE_LENGTH: usize = 64;

/// The SHA-512 expansion of a seed.
#[derive(Clone, Zeroize)]
pub(crate) struct ExpandedSecret {
    /// `clamp(H(seed)[..32]) mod ℓ`.
    pub(crate) scalar: Scalar,
    /// `H(seed)[32..]`, hashed with the message to derive nonces.
    pub(crate) prefix: [u8; 32],
}

impl ExpandedSecret {
    pub(crate) fn from_seed(seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        let mut digest = sha512(seed);

        let mut lower = [0u8; 32];
        let mut prefix = [0u8; 32];
        lower.copy_from_slice(&digest[..32]);
        prefix.copy_from_slice(&digest[32..]);

        // Reducing mod ℓ leaves a·B unchanged and keeps the scalar canonical.
        let scalar = Scalar::from_bytes_mod_order(clamp_integer(lower));

        digest.zeroize();
        lower.zeroize();

        ExpandedSecret { scalar, prefix }
    }

    pub(crate) fn public_key(&self) -> PublicKey {
        PublicKey::from_point(EdwardsPoint::mul_base(&self.scalar))
    }
}

impl Drop for ExpandedSecret {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for ExpandedSecret {}

/// An Ed25519 public key: a validated point together with its encoding.
#[derive(Clone, Copy, Debug)]
pub struct PublicKey {
    compressed: CompressedEdwardsY,
    point: EdwardsPoint,
}

impl PublicKey {
    /// Decodes a public key, rejecting invalid and non-canonical encodings.
    pub fn from_bytes(bytes: &[u8; PUBLIC_KEY_LENGTH]) -> Result<Self> {
        let compressed = CompressedEdwardsY(*bytes);
        let point = compressed.decompress()?;

        Ok(PublicKey { compressed, point })
    }

    pub(crate) fn from_point(point: EdwardsPoint) -> Self {
        PublicKey {
            compressed: point.compress(),
            point,
        }
    }

    /// Returns the 32-byte encoding.
    #[inline]
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.compressed.to_bytes()
    }

    /// Borrows the 32-byte encoding.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        self.compressed.as_bytes()
    }

    /// Returns the decoded curve point `A`.
    #[inline]
    pub fn as_point(&self) -> &EdwardsPoint {
        &self.point
    }

    /// Verifies `signature` over `message`.
    ///
    /// Returns [`Error::VerificationFailed`] when the signature does not
    /// match, including when its `S` half is not below ℓ.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<()> {
        verify::verify_with_key(self, message, signature)
    }

    /// Maps the key to the X25519 public key of the same secret.
    ///
    /// Uses the birational map `u = (1 + y) / (1 − y)`.
    pub fn to_montgomery(&self) -> MontgomeryPoint {
        self.point.to_montgomery()
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.compressed == other.compressed
    }
}

impl Eq for PublicKey {}

impl TryFrom<&[u8]> for PublicKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let bytes: &[u8; PUBLIC_KEY_LENGTH] = bytes.try_into().map_err(|_| Error::InvalidLength {
            expected: PUBLIC_KEY_LENGTH,
            got: bytes.len(),
        })?;

        Self::from_bytes(bytes)
    }
}

/// An Ed25519 private key.
///
/// Holds the seed, its expansion and the derived public key. The secret
/// parts are zeroized on drop.
#[derive(Clone)]
pub struct PrivateKey {
    seed: [u8; SECRET_KEY_LENGTH],
    expanded: ExpandedSecret,
    public: PublicKey,
}

impl PrivateKey {
    /// Derives the key pair from a 32-byte seed.
    pub fn from_seed(seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        let expanded = ExpandedSecret::from_seed(seed);
        let public = expanded.public_key();

        PrivateKey {
            seed: *seed,
            expanded,
            public,
        }
    }

    /// Draws a fresh seed from `rng` and derives the key pair.
    #[cfg(feature = "rand_core")]
    pub fn generate<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        let mut seed = [0u8; SECRET_KEY_LENGTH];
        rng.fill_bytes(&mut seed);

        let key = Self::from_seed(&seed);
        seed.zeroize();

        key
    }

    /// Borrows the seed.
    #[inline]
    pub fn seed(&self) -> &[u8; SECRET_KEY_LENGTH] {
        &self.seed
    }

    /// Returns the matching public key.
    #[inline]
    pub fn public_key(&self) -> PublicKey {
        self.public
    }

    /// Signs `message` deterministically.
    pub fn sign(&self, message: &[u8]) -> Signature {
        let bytes = sign::sign_expanded(&self.expanded, self.public.as_bytes(), message);
        Signature::from_bytes(&bytes)
    }

    pub(crate) fn matches_public_bytes(&self, public: &[u8; PUBLIC_KEY_LENGTH]) -> bool {
        self.public.as_bytes()[..].ct_eq(&public[..]).into()
    }
}

impl core::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

impl TryFrom<&[u8]> for PrivateKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let seed: &[u8; SECRET_KEY_LENGTH] = bytes.try_into().map_err(|_| Error::InvalidLength {
            expected: SECRET_KEY_LENGTH,
            got: bytes.len(),
        })?;

        Ok(Self::from_seed(seed))
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.seed.zeroize();
        self.expanded.zeroize();
    }
}

impl ZeroizeOnDrop for PrivateKey {}

/// An Ed25519 signature, `R ‖ S`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature {
    r: [u8; 32],
    s: [u8; 32],
}

impl Signature {
    #[inline]
    pub fn from_bytes(bytes: &[u8; SIGNATURE_LENGTH]) -> Self {
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);

        Self { r, s }
    }

    #[inline]
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut out = [0u8; SIGNATURE_LENGTH];

        out[..32].copy_from_slice(&self.r);
        out[32..].copy_from_slice(&self.s);

        out
    }

    /// The encoded commitment point `R`.
    #[inline]
    pub fn r_bytes(&self) -> &[u8; 32] {
        &self.r
    }

    /// The response scalar `S`, possibly non-canonical.
    #[inline]
    pub fn s_bytes(&self) -> &[u8; 32] {
        &self.s
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let bytes: &[u8; SIGNATURE_LENGTH] = bytes.try_into().map_err(|_| Error::InvalidLength {
            expected: SIGNATURE_LENGTH,
            got: bytes.len(),
        })?;

        Ok(Self::from_bytes(bytes))
    }
}
