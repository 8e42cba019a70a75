//! Digital signature schemes.
//!
//! Each submodule implements one scheme according to its RFC,
//! on top of the key types in [`crate::keys`] and the arithmetic in
//! [`crate::curve`]. Nothing is shared across schemes beyond those layers.

pub mod ed25519;
