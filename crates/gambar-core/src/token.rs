//! Edit tokens
//!
//! A photographer has no account. Whoever holds the token handed out at
//! registration may edit the listing. Only the SHA-256 of the token is stored.

use std::fmt;

use rand::rngs::OsRng;
use rand::TryRngCore;
use sha2::{Digest, Sha256};

use crate::constants::{EDIT_TOKEN_BYTES, EDIT_TOKEN_LEN};

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Secure random source unavailable: {0}")]
    EntropyUnavailable(String),
}

/// Plaintext edit token, shown to the photographer exactly once.
#[derive(Clone, PartialEq, Eq)]
pub struct EditToken(String);

impl EditToken {
    /// Draw a fresh token from the operating system CSPRNG.
    pub fn generate() -> Result<Self, TokenError> {
        let mut bytes = [0u8; EDIT_TOKEN_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| TokenError::EntropyUnavailable(e.to_string()))?;
        Ok(EditToken(hex::encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn hash(&self) -> TokenHash {
        TokenHash::of(&self.0)
    }
}

// Keep tokens out of logs.
impl fmt::Debug for EditToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EditToken(***)")
    }
}

/// Hex-encoded SHA-256 of an edit token, as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenHash(String);

impl TokenHash {
    fn of(token: &str) -> Self {
        TokenHash(hex::encode(Sha256::digest(token.as_bytes())))
    }

    /// Hash a token presented by a client.
    ///
    /// Anything that could not have been issued (wrong length, non-hex) yields
    /// `None`, which callers treat exactly like an unknown token.
    pub fn from_presented(presented: &str) -> Option<Self> {
        if presented.len() != EDIT_TOKEN_LEN
            || !presented.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return None;
        }
        Some(TokenHash::of(&presented.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Startup probe: refuse to serve if the OS random source is unusable.
pub fn ensure_entropy_available() -> Result<(), TokenError> {
    EditToken::generate().map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_token_is_32_lowercase_hex() {
        let token = EditToken::generate().unwrap();
        assert_eq!(token.as_str().len(), 32);
        assert!(token
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_tokens_are_distinct() {
        let a = EditToken::generate().unwrap();
        let b = EditToken::generate().unwrap();
        assert_ne!(a, b);
        assert_ne!(a.hash(), b.hash());
    }

    #[test]
    fn test_presented_token_matches_issued_hash() {
        let token = EditToken::generate().unwrap();
        let presented = TokenHash::from_presented(token.as_str()).unwrap();
        assert_eq!(presented, token.hash());
        assert_eq!(presented.as_str().len(), 64);

        let upper = token.as_str().to_ascii_uppercase();
        assert_eq!(TokenHash::from_presented(&upper), Some(token.hash()));
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        assert!(TokenHash::from_presented("").is_none());
        assert!(TokenHash::from_presented("abc").is_none());
        assert!(TokenHash::from_presented(&"z".repeat(32)).is_none());
        assert!(TokenHash::from_presented(&"a".repeat(33)).is_none());
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let token = EditToken::generate().unwrap();
        assert!(!format!("{:?}", token).contains(token.as_str()));
    }

    #[test]
    fn test_entropy_probe() {
        assert!(ensure_entropy_available().is_ok());
    }
}
