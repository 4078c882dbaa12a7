//! SHA-256 helpers shared by evidence integrity checks and key
//! fingerprinting. Every caller wants a short hex prefix, never the raw
//! digest, per the "fingerprint / prefix" convention in the glossary.

use sha2::{Digest, Sha256};

/// Full lowercase hex digest of `content`.
pub fn sha256_hex(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

/// First `len` hex characters of the SHA-256 digest of `content`.
pub fn sha256_prefix(content: &[u8], len: usize) -> String {
    let digest = sha256_hex(content);
    digest.chars().take(len).collect()
}

/// A fresh, non-reversible key fingerprint derived from a key id and a
/// random UUID, as `AutoRotationScheduler` and `InstantRevocator` both
/// need when minting replacement key material.
pub fn generate_key_fingerprint(key_id: impl std::fmt::Display) -> String {
    let material = format!("{key_id}:{}", uuid::Uuid::new_v4());
    sha256_prefix(material.as_bytes(), 32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_stable_for_same_input() {
        let a = sha256_prefix(b"hello", 16);
        let b = sha256_prefix(b"hello", 16);
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
    }

    #[test]
    fn different_input_changes_prefix() {
        assert_ne!(sha256_prefix(b"hello", 16), sha256_prefix(b"world", 16));
    }

    #[test]
    fn fingerprint_has_expected_length() {
        let fp = generate_key_fingerprint("ki_abcdef12");
        assert_eq!(fp.len(), 32);
    }
}
