//! PKCE verifier/challenge pairs for the provider's email flows.
//!
//! Confirmation and recovery links come back to the callback routes with a
//! one-time `code`. The verifier generated at submit time is kept in a cookie
//! and proves the exchange comes from the same browser.

use base64ct::{Base64UrlUnpadded, Encoding};
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::fmt;

/// Challenge method sent alongside the challenge.
pub const CHALLENGE_METHOD: &str = "s256";

const VERIFIER_BYTES: usize = 32;
const MIN_LEN: usize = 43;
const MAX_LEN: usize = 128;

#[derive(Clone, PartialEq, Eq)]
pub struct PkceVerifier(String);

impl PkceVerifier {
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; VERIFIER_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(Base64UrlUnpadded::encode_string(&bytes))
    }

    /// Accept a verifier read back from a cookie; rejects anything outside RFC 7636.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let valid_len = (MIN_LEN..=MAX_LEN).contains(&value.len());
        let valid_chars = value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~'));

        (valid_len && valid_chars).then(|| Self(value.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `BASE64URL(SHA256(verifier))`
    #[must_use]
    pub fn challenge(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        Base64UrlUnpadded::encode_string(&digest)
    }
}

impl fmt::Debug for PkceVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PkceVerifier(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_verifier_is_valid() {
        let verifier = PkceVerifier::generate();
        assert_eq!(verifier.as_str().len(), 43);
        assert_eq!(PkceVerifier::parse(verifier.as_str()), Some(verifier));
    }

    #[test]
    fn challenge_matches_rfc7636_example() {
        let verifier = PkceVerifier::parse("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");
        assert_eq!(
            verifier.map(|v| v.challenge()),
            Some("E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM".to_string())
        );
    }

    #[test]
    fn parse_rejects_short_or_invalid_values() {
        assert_eq!(PkceVerifier::parse("short"), None);
        assert_eq!(PkceVerifier::parse(&"a".repeat(129)), None);
        assert_eq!(PkceVerifier::parse(&format!("{}!", "a".repeat(50))), None);
    }

    #[test]
    fn debug_hides_value() {
        let verifier = PkceVerifier::generate();
        assert_eq!(format!("{verifier:?}"), "PkceVerifier(***)");
    }
}
