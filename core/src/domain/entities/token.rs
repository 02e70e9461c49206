//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Fixed random payload length for refresh tokens (entropy against guessing)
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// A single assertion about an authenticated identity.
///
/// The core never restricts or requires a particular claim vocabulary;
/// claims are supplied by the caller at generation time and round-tripped
/// through the token payload. Duplicate names are legal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub name: String,
    pub value: String,
}

impl Claim {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Decoded payload of an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Issuer stamped into the token (first configured issuer)
    pub issuer: String,

    /// Full audience list embedded in the token
    pub audiences: Vec<String>,

    /// When the token was issued
    pub issued_at: DateTime<Utc>,

    /// When the token expires
    pub expires_at: DateTime<Utc>,

    /// Unique token identifier
    pub jti: String,

    /// Caller-supplied claims, in payload order
    pub claims: Vec<Claim>,
}

/// A signed access token.
///
/// Owns both the compact encoded string and its decoded structure. The two
/// are always consistent: one is derived from the other at construction and
/// never mutated independently. Only the token service constructs values of
/// this type, either at issuance or by decoding a presented string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    encoded: String,
    claims: AccessTokenClaims,
}

impl AccessToken {
    pub(crate) fn new(encoded: String, claims: AccessTokenClaims) -> Self {
        Self { encoded, claims }
    }

    /// The compact serialized form (header.claims.signature)
    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    /// The decoded payload
    pub fn claims(&self) -> &AccessTokenClaims {
        &self.claims
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.claims.issued_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.claims.expires_at
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.claims.expires_at
    }
}

/// An opaque refresh token.
///
/// Carries no embedded structure: just `REFRESH_TOKEN_BYTES` of CSPRNG
/// output, Base64-encoded, plus a validity window. The core does not persist
/// it; the embedding application hands it to a revocation store if rotation
/// or revocation is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    token: String,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl RefreshToken {
    pub(crate) fn new(token: String, issued_at: DateTime<Utc>, lifetime: Duration) -> Self {
        Self {
            token,
            issued_at,
            expires_at: issued_at + lifetime,
        }
    }

    /// The Base64-encoded random payload
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Time remaining until expiration, or zero if already expired
    pub fn time_until_expiration(&self) -> Duration {
        let now = Utc::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}

/// Token pair written to the client on sign-in.
///
/// Field names are fixed for wire compatibility; optional fields are
/// omitted when absent, never emitted as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_expires_in: Option<DateTime<Utc>>,
}

impl TokenPair {
    /// Builds the wire payload from an issued token pair
    pub fn from_tokens(access: &AccessToken, refresh: Option<&RefreshToken>) -> Self {
        Self {
            access_token: access.encoded().to_string(),
            expires_in: Some(access.expires_at()),
            refresh_token: refresh.map(|r| r.token().to_string()),
            refresh_expires_in: refresh.map(|r| r.expires_at()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_access_token() -> AccessToken {
        let now = Utc::now();
        AccessToken::new(
            "header.payload.signature".to_string(),
            AccessTokenClaims {
                issuer: "signet".to_string(),
                audiences: vec!["signet-clients".to_string()],
                issued_at: now,
                expires_at: now + Duration::minutes(15),
                jti: "test-jti".to_string(),
                claims: vec![Claim::new("sub", "user-42")],
            },
        )
    }

    #[test]
    fn test_access_token_accessors() {
        let token = sample_access_token();

        assert_eq!(token.encoded(), "header.payload.signature");
        assert_eq!(token.claims().issuer, "signet");
        assert!(!token.is_expired());
        assert_eq!(token.expires_at() - token.issued_at(), Duration::minutes(15));
    }

    #[test]
    fn test_refresh_token_window() {
        let now = Utc::now();
        let token = RefreshToken::new("b64payload==".to_string(), now, Duration::days(10));

        assert_eq!(token.token(), "b64payload==");
        assert_eq!(token.expires_at() - token.issued_at(), Duration::days(10));
        assert!(!token.is_expired());
        assert!(token.time_until_expiration() > Duration::days(9));
    }

    #[test]
    fn test_refresh_token_expiration() {
        let past = Utc::now() - Duration::days(11);
        let token = RefreshToken::new("payload".to_string(), past, Duration::days(10));

        assert!(token.is_expired());
        assert_eq!(token.time_until_expiration(), Duration::zero());
    }

    #[test]
    fn test_token_pair_serialization_field_names() {
        let access = sample_access_token();
        let refresh = RefreshToken::new("opaque==".to_string(), Utc::now(), Duration::days(10));
        let pair = TokenPair::from_tokens(&access, Some(&refresh));

        let json = serde_json::to_value(&pair).unwrap();
        assert_eq!(json["access_token"], "header.payload.signature");
        assert_eq!(json["refresh_token"], "opaque==");
        assert!(json.get("expires_in").is_some());
        assert!(json.get("refresh_expires_in").is_some());
    }

    #[test]
    fn test_token_pair_omits_null_fields() {
        let access = sample_access_token();
        let pair = TokenPair::from_tokens(&access, None);

        let json = serde_json::to_value(&pair).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("refresh_token"));
        assert!(!obj.contains_key("refresh_expires_in"));
        assert!(obj.contains_key("access_token"));
    }

    #[test]
    fn test_token_pair_round_trip() {
        let access = sample_access_token();
        let refresh = RefreshToken::new("opaque==".to_string(), Utc::now(), Duration::days(10));
        let pair = TokenPair::from_tokens(&access, Some(&refresh));

        let json = serde_json::to_string(&pair).unwrap();
        let deserialized: TokenPair = serde_json::from_str(&json).unwrap();
        assert_eq!(pair, deserialized);
    }
}
