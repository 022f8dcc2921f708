//! The external digest functions the hash primitives collaborate with.
//!
//! Both hash primitives treat their digest as an opaque
//! `bytes in, bytes out` collaborator: the Pedersen hasher digests a
//! counter-indexed label to derive base points, and the MiMC sponge digests a
//! seed repeatedly to derive round constants. This module adapts the concrete
//! digest crates to that shape so the rest of the crate never touches their
//! trait machinery directly.

/// An injected digest function, `bytes -> bytes`.
///
/// Callers that swap in their own digest must return at least 32 bytes;
/// only the first 32 are consumed.
pub type DigestFn = Box<dyn Fn(&[u8]) -> Vec<u8> + Send + Sync>;

/// BLAKE-256: the original BLAKE SHA-3 finalist at its 256-bit size, not
/// BLAKE2s. The default Pedersen base-point digest.
pub fn blake256(input: &[u8]) -> Vec<u8> {
    use blake_hash::Digest;

    blake_hash::Blake256::digest(input).to_vec()
}

/// BLAKE2b at its full 512-bit output size. The alternate Pedersen
/// base-point digest; only the first 32 bytes of its output are used.
pub fn blake2b512(input: &[u8]) -> Vec<u8> {
    blake2b_simd::blake2b(input).as_bytes().to_vec()
}

/// Keccak-256 with the original (pre-SHA-3) padding. Derives the MiMC round
/// constants.
pub fn keccak256(input: &[u8]) -> [u8; 32] {
    use sha3::{Digest, Keccak256};

    Keccak256::digest(input).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blake256_known_vectors() {
        // Vectors from the BLAKE SHA-3 submission.
        assert_eq!(
            hex::encode(blake256(&[0u8])),
            "0ce8d4ef4dd7cd8d62dfded9d4edb0a774ae6a41929a74da23109e8f11139c87"
        );
        assert_eq!(
            hex::encode(blake256(b"")),
            "716f6e863f744b9ac22c97ec7b76ea5f5908bc5b2f67c61510bfc4751384ea7a"
        );
    }

    #[test]
    fn keccak256_known_vector() {
        // Keccak-256 of the empty string differs from SHA3-256 because of
        // the legacy 0x01 padding.
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn blake2b512_output_length() {
        assert_eq!(blake2b512(b"").len(), 64);
    }
}
