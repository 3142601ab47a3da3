use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a string is not a plausible account identifier.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("account id must be a non-empty decimal string, got {0:?}")]
pub struct InvalidAccountId(pub String);

/// Canonical 64-bit account identifier, rendered as a decimal string
/// (17 digits for valid Steam-style ids).
///
/// Construction is restricted to the two derivation paths: rendering a
/// `u64`, or parsing an externally supplied string validated by shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Render a 64-bit identifier as its canonical decimal string.
    pub fn from_steam64(id: u64) -> Self {
        Self(id.to_string())
    }

    /// Validate an externally supplied identifier by shape only
    /// (all digits, non-empty).
    pub fn parse(raw: &str) -> Result<Self, InvalidAccountId> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidAccountId(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Classified shape of a free-form account reference.
///
/// Produced once per request by the classifier and exhaustively matched
/// downstream; no further string inspection happens after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputIdentifier {
    /// Trade-offer URL carrying a partner code and token. The token is
    /// shape-checked only; it plays no role in id derivation.
    TradeOffer { partner_code: u32, token: String },
    /// Profile URL, already canonicalized to scheme/host/marker/identifier.
    Profile { canonical_url: String },
    /// A bare 17-digit identifier, passed through unchanged.
    RawId64 { value: AccountId },
    /// None of the recognized shapes.
    Invalid,
}
