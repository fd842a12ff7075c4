//! Session tokens
//!
//! The raw token travels only in the session cookie; the store keeps its
//! SHA-256 digest so a leaked table cannot be replayed as cookies.

use rand::Rng;
use sha2::{Digest, Sha256};

const TOKEN_BYTES: usize = 32;

#[derive(Debug, Clone)]
pub struct SessionToken {
    token: String,
}

impl SessionToken {
    pub fn generate() -> Self {
        let bytes: [u8; TOKEN_BYTES] = rand::rng().random();
        Self {
            token: hex::encode(bytes),
        }
    }

    /// Wraps a token presented by a client. Returns `None` for anything that
    /// could not have been issued by [`SessionToken::generate`].
    pub fn parse(raw: &str) -> Option<Self> {
        let well_formed = raw.len() == TOKEN_BYTES * 2
            && raw.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        well_formed.then(|| Self {
            token: raw.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.token
    }

    pub fn digest(&self) -> String {
        hex::encode(Sha256::digest(self.token.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_tokens_are_unique_and_parseable() {
        let a = SessionToken::generate();
        let b = SessionToken::generate();
        assert_ne!(a.as_str(), b.as_str());
        assert_eq!(a.as_str().len(), 64);
        assert!(SessionToken::parse(a.as_str()).is_some());
    }

    #[test]
    fn digest_is_stable_and_not_the_token() {
        let token = SessionToken::generate();
        let parsed = SessionToken::parse(token.as_str()).unwrap();
        assert_eq!(token.digest(), parsed.digest());
        assert_ne!(token.digest(), token.as_str());
    }

    #[test]
    fn rejects_foreign_values() {
        assert!(SessionToken::parse("").is_none());
        assert!(SessionToken::parse("abc").is_none());
        assert!(SessionToken::parse(&"Z".repeat(64)).is_none());
        assert!(SessionToken::parse(&"A".repeat(64)).is_none());
    }
}
