//! API key generation and hashing.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Characters an API key is drawn from.
pub const API_KEY_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of every generated API key.
pub const API_KEY_LEN: usize = 64;

/// Generates a fresh API key.
///
/// Each character is drawn uniformly from [`API_KEY_ALPHABET`] using the
/// thread-local CSPRNG, which is seeded from the operating system.
#[must_use]
pub fn generate_api_key() -> String {
    let mut rng = rand::rng();
    (0..API_KEY_LEN)
        .map(|_| char::from(API_KEY_ALPHABET[rng.random_range(0..API_KEY_ALPHABET.len())]))
        .collect()
}

/// Hashes an API key for storage and lookup.
#[must_use]
pub fn hash_api_key(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_key_shape() {
        let key = generate_api_key();
        assert_eq!(key.len(), API_KEY_LEN);
        assert!(key.bytes().all(|b| API_KEY_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_generated_keys_are_distinct() {
        let keys: HashSet<String> = (0..1000).map(|_| generate_api_key()).collect();
        assert_eq!(keys.len(), 1000);
    }

    #[test]
    fn test_hash_is_stable_hex() {
        let hash = hash_api_key("K");
        assert_eq!(hash, hash_api_key("K"));
        assert_eq!(hash.len(), 64);
        assert_ne!(hash, hash_api_key("L"));
    }

    proptest! {
        #[test]
        fn prop_every_key_is_64_alphanumerics(_seed in 0u32..256) {
            let key = generate_api_key();
            prop_assert_eq!(key.len(), 64);
            prop_assert!(key.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }
}
