//! Main token service implementation

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{
    decode, decode_header, encode, DecodingKey, EncodingKey, Header, Validation,
};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::Deserialize;
use serde_json::map::Entry;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::entities::principal::AuthenticatedPrincipal;
use crate::domain::entities::token::{
    AccessToken, AccessTokenClaims, Claim, RefreshToken, REFRESH_TOKEN_BYTES,
};
use crate::errors::{AuthError, AuthResult, ConfigurationError, TokenValidationError};

use super::config::TokenServiceConfig;

/// Claim names the service controls; caller-supplied claims with these
/// names are dropped rather than allowed to corrupt the token envelope.
const RESERVED_CLAIMS: [&str; 6] = ["iss", "aud", "exp", "iat", "nbf", "jti"];

/// Service for generating and validating JWT access tokens and opaque
/// refresh tokens.
///
/// Stateless after construction: every call is a pure function of its
/// inputs, the immutable configuration, wall-clock time and the system
/// random source, so a single instance is safely shared across threads.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry_exempt_validation: Validation,
}

/// Wire shape of the JWT payload as decoded from a presented token
#[derive(Debug, Deserialize)]
struct RawClaims {
    iss: String,
    aud: Audience,
    iat: i64,
    exp: i64,
    #[serde(default)]
    jti: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Audience {
    One(String),
    Many(Vec<String>),
}

impl Audience {
    fn into_vec(self) -> Vec<String> {
        match self {
            Audience::One(aud) => vec![aud],
            Audience::Many(auds) => auds,
        }
    }
}

impl TokenService {
    /// Creates a new token service.
    ///
    /// Configuration invariants (non-empty secret, at least one issuer and
    /// one audience) are checked here, before any signing is attempted.
    pub fn new(config: TokenServiceConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&config.issuers);
        validation.set_audience(&config.audiences);
        validation.validate_exp = true;
        // The expiry contract is exact; no clock-skew allowance.
        validation.leeway = 0;

        // Same checks minus expiry, for refresh flows.
        let mut expiry_exempt_validation = validation.clone();
        expiry_exempt_validation.validate_exp = false;

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
            expiry_exempt_validation,
        })
    }

    /// Creates a token service directly from deserialized settings
    pub fn from_settings(
        settings: &signet_shared::TokenSettings,
    ) -> Result<Self, ConfigurationError> {
        Self::new(TokenServiceConfig::try_from(settings)?)
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Generates a signed access token carrying the given claims.
    ///
    /// The token is issued by the first configured issuer, addressed to the
    /// full configured audience list, and expires after the configured
    /// access-token lifetime.
    pub fn generate_access_token(&self, claims: &[Claim]) -> AuthResult<AccessToken> {
        let issued_at = self.now_to_the_second()?;
        let expires_at = issued_at + Duration::minutes(self.config.access_token_expiry_minutes);
        let jti = Uuid::new_v4().to_string();

        let mut payload = fold_claims(claims);
        payload.insert("iss".to_string(), Value::from(self.config.issuers[0].clone()));
        payload.insert("aud".to_string(), Value::from(self.config.audiences.clone()));
        payload.insert("iat".to_string(), Value::from(issued_at.timestamp()));
        payload.insert("exp".to_string(), Value::from(expires_at.timestamp()));
        payload.insert("jti".to_string(), Value::from(jti.clone()));

        let encoded = self.encode_payload(&payload)?;
        tracing::debug!(%jti, %expires_at, "issued access token");

        Ok(AccessToken::new(
            encoded,
            AccessTokenClaims {
                issuer: self.config.issuers[0].clone(),
                audiences: self.config.audiences.clone(),
                issued_at,
                expires_at,
                jti,
                claims: claims
                    .iter()
                    .filter(|c| !RESERVED_CLAIMS.contains(&c.name.as_str()))
                    .cloned()
                    .collect(),
            },
        ))
    }

    /// Generates an opaque refresh token.
    ///
    /// The payload is 32 bytes from the OS random source, Base64-encoded;
    /// there is no failure path. An unavailable random source panics, which
    /// is deliberate: there is no meaningful retry.
    pub fn generate_refresh_token(&self) -> RefreshToken {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);

        RefreshToken::new(
            BASE64.encode(bytes),
            Utc::now(),
            Duration::minutes(self.config.refresh_token_expiry_minutes),
        )
    }

    /// Generates an access/refresh token pair for a sign-in
    pub fn issue_pair(&self, claims: &[Claim]) -> AuthResult<(AccessToken, RefreshToken)> {
        let access = self.generate_access_token(claims)?;
        let refresh = self.generate_refresh_token();
        Ok((access, refresh))
    }

    /// Validates a presented token and reconstructs its principal.
    ///
    /// Signature, issuer and audience are always checked; expiry is checked
    /// unless `allow_expired` is set. That mode exists for refresh flows,
    /// where an expired but otherwise valid token must still yield its
    /// claims.
    pub fn validate_and_decode(
        &self,
        token: &str,
        allow_expired: bool,
    ) -> AuthResult<AuthenticatedPrincipal> {
        let access = self.decode_access_token(token, allow_expired)?;
        let AccessTokenClaims { claims, .. } = access.claims().clone();
        Ok(AuthenticatedPrincipal::bearer(claims))
    }

    /// Validates a presented token and returns its structured form.
    ///
    /// Same validation as [`validate_and_decode`](Self::validate_and_decode),
    /// for callers that also need the token's envelope (expiry, audiences).
    pub fn decode_access_token(
        &self,
        token: &str,
        allow_expired: bool,
    ) -> AuthResult<AccessToken> {
        let header = decode_header(token).map_err(|e| {
            tracing::warn!(error = %e, "rejected token with undecodable header");
            AuthError::from(TokenValidationError::Malformed)
        })?;

        // An exact algorithm match is required even when the signature would
        // otherwise verify; this closes algorithm-confusion attacks.
        if header.alg != self.config.algorithm {
            tracing::warn!(algorithm = ?header.alg, "rejected token signed with unexpected algorithm");
            return Err(TokenValidationError::AlgorithmMismatch.into());
        }

        let validation = if allow_expired {
            &self.expiry_exempt_validation
        } else {
            &self.validation
        };

        let data = decode::<RawClaims>(token, &self.decoding_key, validation).map_err(|e| {
            let reason = map_decode_error(&e);
            tracing::warn!(error = %e, ?reason, "token validation failed");
            AuthError::from(reason)
        })?;
        let raw = data.claims;

        let issued_at = timestamp_to_datetime(raw.iat)?;
        let expires_at = timestamp_to_datetime(raw.exp)?;

        Ok(AccessToken::new(
            token.to_string(),
            AccessTokenClaims {
                issuer: raw.iss,
                audiences: raw.aud.into_vec(),
                issued_at,
                expires_at,
                jti: raw.jti.unwrap_or_default(),
                claims: unfold_claims(raw.extra),
            },
        ))
    }

    /// Hashes a token for handoff to a revocation store.
    ///
    /// Stores never see the raw token, only its SHA-256 hex digest.
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Signs an arbitrary payload with the configured key and algorithm
    pub(crate) fn encode_payload(&self, payload: &Map<String, Value>) -> AuthResult<String> {
        encode(&Header::new(self.config.algorithm), payload, &self.encoding_key).map_err(|e| {
            AuthError::Internal {
                message: format!("token signing failed: {e}"),
            }
        })
    }

    // Whole-second precision, so the decoded structure matches what the
    // payload's numeric timestamps can carry.
    fn now_to_the_second(&self) -> AuthResult<DateTime<Utc>> {
        timestamp_to_datetime(Utc::now().timestamp())
    }
}

/// Folds an ordered claim sequence into a JSON payload object.
///
/// Duplicate names become arrays, mirroring how multi-valued claims are
/// conventionally carried in a JWT. Claims named like registered claims are
/// dropped; the service-controlled values win.
fn fold_claims(claims: &[Claim]) -> Map<String, Value> {
    let mut payload = Map::new();
    for claim in claims {
        if RESERVED_CLAIMS.contains(&claim.name.as_str()) {
            tracing::warn!(claim = %claim.name, "dropping caller-supplied registered claim");
            continue;
        }
        match payload.entry(claim.name.clone()) {
            Entry::Occupied(mut slot) => match slot.get_mut() {
                Value::Array(values) => values.push(Value::from(claim.value.clone())),
                existing => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, Value::from(claim.value.clone())]);
                }
            },
            Entry::Vacant(slot) => {
                slot.insert(Value::from(claim.value.clone()));
            }
        }
    }
    payload
}

/// Unfolds a decoded payload object back into a claim sequence, expanding
/// arrays into repeated claims. Non-string scalars keep their JSON text.
fn unfold_claims(extra: Map<String, Value>) -> Vec<Claim> {
    let mut claims = Vec::new();
    for (name, value) in extra {
        if RESERVED_CLAIMS.contains(&name.as_str()) {
            continue;
        }
        match value {
            Value::Array(values) => {
                for v in values {
                    claims.push(Claim::new(name.clone(), value_to_string(v)));
                }
            }
            other => claims.push(Claim::new(name, value_to_string(other))),
        }
    }
    claims
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn timestamp_to_datetime(ts: i64) -> AuthResult<DateTime<Utc>> {
    Utc.timestamp_opt(ts, 0)
        .single()
        .ok_or_else(|| AuthError::from(TokenValidationError::Malformed))
}

fn map_decode_error(error: &jsonwebtoken::errors::Error) -> TokenValidationError {
    use jsonwebtoken::errors::ErrorKind;

    match error.kind() {
        ErrorKind::ExpiredSignature => TokenValidationError::Expired,
        ErrorKind::InvalidSignature => TokenValidationError::BadSignature,
        ErrorKind::InvalidIssuer => TokenValidationError::BadIssuer,
        ErrorKind::InvalidAudience => TokenValidationError::BadAudience,
        ErrorKind::InvalidAlgorithm => TokenValidationError::AlgorithmMismatch,
        _ => TokenValidationError::Malformed,
    }
}
