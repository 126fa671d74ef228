//! Opaque bearer tokens.
//!
//! The plaintext token goes to the client once; only its SHA-256 hex digest
//! is persisted in `sessions.token_hash`.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Returns `(plaintext_token, sha256_hex_hash)`.
pub fn generate_session_token() -> (String, String) {
    let plaintext = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
    let hash = hash_session_token(&plaintext);
    (plaintext, hash)
}

pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_stable_hex() {
        let (plaintext, hash) = generate_session_token();
        assert_eq!(hash, hash_session_token(&plaintext));
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn tokens_are_unique() {
        let (a, _) = generate_session_token();
        let (b, _) = generate_session_token();
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
    }
}
