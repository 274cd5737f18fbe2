//! Content identifiers.

use std::fmt;
use std::str::FromStr;

use super::error::GatewayError;

/// Length of a content identifier: a hex-encoded SHA-256 digest.
const CID_LEN: usize = 64;

/// Address of an object in the content gateway.
///
/// Always 64 lowercase hexadecimal characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentId(String);

impl ContentId {
    /// Parse a stored or user-supplied identifier.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidContentId`] unless the input is exactly
    /// 64 lowercase hex characters.
    pub fn parse(s: &str) -> Result<Self, GatewayError> {
        let well_formed = s.len() == CID_LEN
            && s
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));

        if well_formed {
            Ok(Self(s.to_string()))
        } else {
            Err(GatewayError::invalid_content_id(s))
        }
    }

    /// Build an identifier from a raw SHA-256 digest.
    #[must_use]
    pub fn from_digest(digest: &[u8]) -> Self {
        Self(digest.iter().map(|b| format!("{b:02x}")).collect())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ContentId {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
