//! SHA-512 (FIPS 180-4) helpers over the `sha2` implementation.

pub use sha2::Sha512;
use sha2::Digest;

/// Size of a SHA-512 digest in bytes.
pub const SHA512_OUTPUT_LENGTH: usize = 64;

/// Computes the SHA-512 digest of `input`.
pub fn sha512(input: &[u8]) -> [u8; SHA512_OUTPUT_LENGTH] {
    sha512_parts(&[input])
}

/// Computes the SHA-512 digest of the concatenation of `parts`, without
/// materializing the concatenation.
pub(crate) fn sha512_parts(parts: &[&[u8]]) -> [u8; SHA512_OUTPUT_LENGTH] {
    let mut hasher = Sha512::new();
    for part in parts {
        hasher.update(part);
    }

    let mut digest = [0u8; SHA512_OUTPUT_LENGTH];
    digest.copy_from_slice(&hasher.finalize());
    digest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts_match_concatenation() {
        let whole = sha512(b"prefix-and-message");
        let split = sha512_parts(&[&b"prefix-"[..], &b"and-"[..], &b"message"[..]]);

        assert_eq!(whole, split);
    }

    #[test]
    fn empty_parts_match_empty_input() {
        assert_eq!(sha512_parts(&[]), sha512(b""));
    }
}
