use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

use stashval_models::{AccountId, InputIdentifier};

use crate::error::EngineError;

/// High-order 32 bits (universe/account-type bytes) of an individual
/// account identifier. Preserved as an opaque literal.
pub const INDIVIDUAL_ACCOUNT_PREFIX: u64 = 0x0110_0001;

const STEAM_ID_MARKER: &str = "\"steamid\":\"";

static TRADE_OFFER_RE: OnceLock<Regex> = OnceLock::new();
static RAW_ID_RE: OnceLock<Regex> = OnceLock::new();
static PROFILE_RE: OnceLock<Regex> = OnceLock::new();

fn trade_offer_re() -> &'static Regex {
    TRADE_OFFER_RE.get_or_init(|| {
        Regex::new(
            r"^https?://steamcommunity\.com/tradeoffer/new/\?partner=(\d{8,12})&token=([A-Za-z0-9_]{6,10})$",
        )
        .expect("trade offer pattern compiles")
    })
}

fn raw_id_re() -> &'static Regex {
    RAW_ID_RE.get_or_init(|| Regex::new(r"^\d{17}$").expect("raw id pattern compiles"))
}

fn profile_re() -> &'static Regex {
    PROFILE_RE.get_or_init(|| {
        Regex::new(r"https://steamcommunity\.com/(id|profiles)/[a-zA-Z0-9]+")
            .expect("profile pattern compiles")
    })
}

/// Classify a free-form account reference. First match wins; no further
/// string inspection happens downstream.
pub fn classify(input: &str) -> InputIdentifier {
    if let Some(caps) = trade_offer_re().captures(input) {
        // The pattern admits 11- and 12-digit partner fields, which cannot
        // be valid 32-bit partner codes.
        return match caps[1].parse::<u32>() {
            Ok(partner_code) => InputIdentifier::TradeOffer {
                partner_code,
                token: caps[2].to_string(),
            },
            Err(_) => InputIdentifier::Invalid,
        };
    }

    if raw_id_re().is_match(input) {
        if let Ok(value) = AccountId::parse(input) {
            return InputIdentifier::RawId64 { value };
        }
    }

    if profile_re().is_match(input) {
        return InputIdentifier::Profile {
            canonical_url: canonicalize_profile_url(input),
        };
    }

    InputIdentifier::Invalid
}

/// Keep scheme-host boundary, the id/profiles marker, and the identifier
/// segment; drop any deeper path or query.
fn canonicalize_profile_url(input: &str) -> String {
    if input.matches('/').count() > 4 {
        input.split('/').take(5).collect::<Vec<_>>().join("/")
    } else {
        input.to_string()
    }
}

/// Derive the canonical account id for a trade-offer partner code.
///
/// The id is the 64-bit integer whose high 32 bits are the fixed
/// individual-account prefix and whose low 32 bits are the partner code.
/// Injective over the full `u32` range; masking the low 32 bits of the
/// result recovers the partner code exactly.
pub fn resolve_trade_offer(partner_code: u32) -> AccountId {
    AccountId::from_steam64((INDIVIDUAL_ACCOUNT_PREFIX << 32) | u64::from(partner_code))
}

/// Fetches the raw profile document behind a canonical profile URL.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_document(&self, url: &str) -> Result<String, EngineError>;
}

/// Pull the quoted numeric id that follows the steamid field label.
pub fn extract_steam_id(document: &str) -> Result<AccountId, EngineError> {
    let start = document.find(STEAM_ID_MARKER).ok_or_else(|| {
        EngineError::Resolution("profile document has no steamid field".to_string())
    })?;
    let rest = &document[start + STEAM_ID_MARKER.len()..];
    let end = rest
        .find('"')
        .ok_or_else(|| EngineError::Resolution("steamid field is not terminated".to_string()))?;
    AccountId::parse(&rest[..end]).map_err(|e| EngineError::Resolution(e.to_string()))
}

/// Resolves classified identifiers to canonical account ids.
pub struct IdentityResolver {
    profiles: Arc<dyn ProfileSource>,
}

impl IdentityResolver {
    pub fn new(profiles: Arc<dyn ProfileSource>) -> Self {
        Self { profiles }
    }

    pub async fn resolve(&self, identifier: &InputIdentifier) -> Result<AccountId, EngineError> {
        match identifier {
            InputIdentifier::TradeOffer { partner_code, .. } => {
                Ok(resolve_trade_offer(*partner_code))
            }
            InputIdentifier::RawId64 { value } => Ok(value.clone()),
            InputIdentifier::Profile { canonical_url } => {
                let document = self.profiles.fetch_document(canonical_url).await?;
                let id = extract_steam_id(&document)?;
                debug!(account_id = %id, url = %canonical_url, "Resolved profile URL");
                Ok(id)
            }
            InputIdentifier::Invalid => Err(EngineError::Validation(
                "expected a Steam ID, profile URL, or trade-offer URL".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StaticProfileSource;

    #[test]
    fn classify_raw_id_passes_through_unchanged() {
        let result = classify("76561199999999999");
        match result {
            InputIdentifier::RawId64 { value } => {
                assert_eq!(value.as_str(), "76561199999999999");
            }
            other => panic!("expected RawId64, got {other:?}"),
        }
    }

    #[test]
    fn classify_rejects_16_and_18_digit_ids() {
        assert_eq!(classify("7656119999999999"), InputIdentifier::Invalid);
        assert_eq!(classify("765611999999999990"), InputIdentifier::Invalid);
    }

    #[test]
    fn classify_trade_offer_extracts_partner_and_token() {
        let result = classify(
            "https://steamcommunity.com/tradeoffer/new/?partner=1234567890&token=AbCd_123",
        );
        assert_eq!(
            result,
            InputIdentifier::TradeOffer {
                partner_code: 1_234_567_890,
                token: "AbCd_123".to_string(),
            }
        );
    }

    #[test]
    fn classify_trade_offer_accepts_plain_http() {
        let result =
            classify("http://steamcommunity.com/tradeoffer/new/?partner=12345678&token=abc123");
        assert!(matches!(result, InputIdentifier::TradeOffer { .. }));
    }

    #[test]
    fn classify_13_digit_partner_falls_through() {
        // Too many digits for the trade-offer shape; no other shape matches.
        let result = classify(
            "https://steamcommunity.com/tradeoffer/new/?partner=1234567890123&token=AbCd_123",
        );
        assert_eq!(result, InputIdentifier::Invalid);
    }

    #[test]
    fn classify_overflowing_partner_is_invalid() {
        // Ten digits, matches the pattern, but exceeds u32::MAX.
        let result = classify(
            "https://steamcommunity.com/tradeoffer/new/?partner=9999999999&token=AbCd_123",
        );
        assert_eq!(result, InputIdentifier::Invalid);
    }

    #[test]
    fn classify_profile_url_kept_as_is_when_short() {
        let result = classify("https://steamcommunity.com/id/gabelogannewell");
        assert_eq!(
            result,
            InputIdentifier::Profile {
                canonical_url: "https://steamcommunity.com/id/gabelogannewell".to_string(),
            }
        );
    }

    #[test]
    fn classify_profile_url_canonicalizes_deep_paths() {
        let result = classify("https://steamcommunity.com/id/foo/inventory/extra");
        assert_eq!(
            result,
            InputIdentifier::Profile {
                canonical_url: "https://steamcommunity.com/id/foo".to_string(),
            }
        );
    }

    #[test]
    fn classify_profiles_variant_matches() {
        let result = classify("https://steamcommunity.com/profiles/76561197960265728");
        assert!(matches!(result, InputIdentifier::Profile { .. }));
    }

    #[test]
    fn classify_garbage_is_invalid() {
        assert_eq!(classify("hello there"), InputIdentifier::Invalid);
        assert_eq!(classify(""), InputIdentifier::Invalid);
        assert_eq!(
            classify("https://example.com/id/someone"),
            InputIdentifier::Invalid
        );
    }

    #[test]
    fn trade_offer_derivation_is_deterministic_and_invertible() {
        for partner_code in [0u32, 1, 226_042_536, u32::MAX - 1, u32::MAX] {
            let id = resolve_trade_offer(partner_code);
            let as_u64: u64 = id.as_str().parse().unwrap();
            assert_eq!(as_u64 >> 32, INDIVIDUAL_ACCOUNT_PREFIX);
            assert_eq!(as_u64 & 0xFFFF_FFFF, u64::from(partner_code));
            // Stable across calls.
            assert_eq!(resolve_trade_offer(partner_code), id);
        }
    }

    #[test]
    fn trade_offer_derivation_known_values() {
        assert_eq!(resolve_trade_offer(0).as_str(), "76561197960265728");
        assert_eq!(
            resolve_trade_offer(226_042_536).as_str(),
            "76561198186308264"
        );
    }

    #[test]
    fn distinct_partners_never_collide() {
        let a = resolve_trade_offer(42);
        let b = resolve_trade_offer(43);
        assert_ne!(a, b);
    }

    #[test]
    fn extract_steam_id_finds_marker() {
        let document = r#"<html>g_rgProfileData = {"url":"...","steamid":"76561198186308264","personaname":"foo"}</html>"#;
        let id = extract_steam_id(document).unwrap();
        assert_eq!(id.as_str(), "76561198186308264");
    }

    #[test]
    fn extract_steam_id_missing_marker() {
        let result = extract_steam_id("<html>not a profile page</html>");
        assert!(matches!(result, Err(EngineError::Resolution(_))));
    }

    #[test]
    fn extract_steam_id_rejects_non_numeric_id() {
        let result = extract_steam_id(r#"{"steamid":"not-a-number"}"#);
        assert!(matches!(result, Err(EngineError::Resolution(_))));
    }

    #[tokio::test]
    async fn resolve_profile_via_source() {
        let source = StaticProfileSource::new(r#"{"steamid":"76561197960265728"}"#);
        let resolver = IdentityResolver::new(Arc::new(source));

        let id = resolver
            .resolve(&InputIdentifier::Profile {
                canonical_url: "https://steamcommunity.com/id/foo".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(id.as_str(), "76561197960265728");
    }

    #[tokio::test]
    async fn resolve_invalid_is_a_validation_error() {
        let resolver = IdentityResolver::new(Arc::new(StaticProfileSource::new("")));
        let result = resolver.resolve(&InputIdentifier::Invalid).await;
        assert!(matches!(result, Err(EngineError::Validation(_))));
    }
}
