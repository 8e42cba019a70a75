//! Curve25519 arithmetic.
//!
//! Layered bottom-up:
//!
//! - [`field`]: arithmetic modulo `p = 2^255 − 19`
//! - [`scalar`]: arithmetic modulo the group order ℓ
//! - [`group`]: the twisted Edwards group used by Ed25519
//! - [`montgomery`]: the u-coordinate ladder used by X25519
//! - [`table`]: curve constants and the fixed-base table
//!
//! Everything in this module is free of secret-dependent branches and
//! secret-dependent memory indices.

mod ct;
pub(crate) mod field;
pub mod group;
pub mod montgomery;
pub mod scalar;
pub mod table;

pub use group::{CompressedEdwardsY, EdwardsPoint};
pub use montgomery::MontgomeryPoint;
pub use scalar::Scalar;
pub use table::{ED25519_BASEPOINT, ED25519_BASEPOINT_COMPRESSED, X25519_BASEPOINT};
