//! Configuration for the token service

use jsonwebtoken::Algorithm;
use signet_shared::TokenSettings;

use crate::errors::ConfigurationError;

/// Parsed configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub secret: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
    /// Trusted issuers; the first entry is stamped into issued tokens
    pub issuers: Vec<String>,
    /// Accepted audiences; the full list is embedded in issued tokens
    pub audiences: Vec<String>,
    /// Access token expiry in minutes
    pub access_token_expiry_minutes: i64,
    /// Refresh token expiry in minutes
    pub refresh_token_expiry_minutes: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            secret: "development-secret-please-change-in-production".to_string(),
            algorithm: Algorithm::HS256,
            issuers: vec!["signet".to_string()],
            audiences: vec!["signet-clients".to_string()],
            access_token_expiry_minutes: 15,
            refresh_token_expiry_minutes: 14_400,
        }
    }
}

impl TokenServiceConfig {
    /// Checks the invariants required before any token can be generated.
    ///
    /// Called eagerly at service construction so a misconfigured deployment
    /// fails fast instead of surfacing a cryptic signing error per request.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.secret.is_empty() {
            return Err(ConfigurationError::MissingSecret);
        }
        if self.issuers.is_empty() {
            return Err(ConfigurationError::NoIssuers);
        }
        if self.audiences.is_empty() {
            return Err(ConfigurationError::NoAudiences);
        }
        Ok(())
    }

    /// Parses an algorithm identifier, case-insensitively.
    ///
    /// Only symmetric HMAC algorithms are supported; asymmetric signing is
    /// out of scope for this core.
    pub fn parse_algorithm(name: &str) -> Result<Algorithm, ConfigurationError> {
        match name.to_ascii_uppercase().as_str() {
            "HS256" => Ok(Algorithm::HS256),
            "HS384" => Ok(Algorithm::HS384),
            "HS512" => Ok(Algorithm::HS512),
            _ => Err(ConfigurationError::UnsupportedAlgorithm(name.to_string())),
        }
    }
}

impl TryFrom<&TokenSettings> for TokenServiceConfig {
    type Error = ConfigurationError;

    fn try_from(settings: &TokenSettings) -> Result<Self, Self::Error> {
        Ok(Self {
            secret: settings.secret_key.clone(),
            algorithm: Self::parse_algorithm(&settings.signing_algorithm)?,
            issuers: settings.issuers.clone(),
            audiences: settings.audiences.clone(),
            access_token_expiry_minutes: settings.access_token_expires_in_minutes,
            refresh_token_expiry_minutes: settings.refresh_token_expires_in_minutes,
        })
    }
}
