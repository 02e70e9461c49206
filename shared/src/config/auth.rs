//! Token signing and validation configuration

use serde::{Deserialize, Serialize};

const DEFAULT_SECRET: &str = "development-secret-please-change-in-production";

/// Settings for token issuance and validation.
///
/// Loaded once at process start and treated as immutable afterwards. The
/// secret key must be non-empty before any token can be generated; that is
/// enforced eagerly when the token service is constructed, not at signing
/// time.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenSettings {
    /// Symmetric key material used to sign access tokens
    pub secret_key: String,

    /// Signing algorithm identifier (default: HS256)
    #[serde(default = "default_algorithm")]
    pub signing_algorithm: String,

    /// Trusted issuers; the first entry is stamped into generated tokens
    #[serde(default = "default_issuers")]
    pub issuers: Vec<String>,

    /// Accepted audiences; the full list is embedded in generated tokens
    #[serde(default = "default_audiences")]
    pub audiences: Vec<String>,

    /// Access token lifetime in minutes (default: 15)
    #[serde(default = "default_access_minutes")]
    pub access_token_expires_in_minutes: i64,

    /// Refresh token lifetime in minutes (default: 14400, i.e. 10 days)
    #[serde(default = "default_refresh_minutes")]
    pub refresh_token_expires_in_minutes: i64,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            secret_key: String::from(DEFAULT_SECRET),
            signing_algorithm: default_algorithm(),
            issuers: default_issuers(),
            audiences: default_audiences(),
            access_token_expires_in_minutes: default_access_minutes(),
            refresh_token_expires_in_minutes: default_refresh_minutes(),
        }
    }
}

impl TokenSettings {
    /// Create new settings with the given secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret_key: secret.into(),
            ..Default::default()
        }
    }

    /// Load settings from environment variables
    ///
    /// `SIGNET_ISSUERS` and `SIGNET_AUDIENCES` are comma-separated lists.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let secret_key =
            std::env::var("SIGNET_SECRET_KEY").unwrap_or(defaults.secret_key);
        let signing_algorithm =
            std::env::var("SIGNET_SIGNING_ALGORITHM").unwrap_or(defaults.signing_algorithm);
        let issuers = std::env::var("SIGNET_ISSUERS")
            .map(|v| split_list(&v))
            .unwrap_or(defaults.issuers);
        let audiences = std::env::var("SIGNET_AUDIENCES")
            .map(|v| split_list(&v))
            .unwrap_or(defaults.audiences);
        let access_token_expires_in_minutes = std::env::var("SIGNET_ACCESS_TOKEN_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.access_token_expires_in_minutes);
        let refresh_token_expires_in_minutes = std::env::var("SIGNET_REFRESH_TOKEN_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.refresh_token_expires_in_minutes);

        Self {
            secret_key,
            signing_algorithm,
            issuers,
            audiences,
            access_token_expires_in_minutes,
            refresh_token_expires_in_minutes,
        }
    }

    /// Set the access token lifetime in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expires_in_minutes = minutes;
        self
    }

    /// Set the refresh token lifetime in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expires_in_minutes = days * 24 * 60;
        self
    }

    /// Replace the trusted issuer list
    pub fn with_issuers(mut self, issuers: Vec<String>) -> Self {
        self.issuers = issuers;
        self
    }

    /// Replace the accepted audience list
    pub fn with_audiences(mut self, audiences: Vec<String>) -> Self {
        self.audiences = audiences;
        self
    }

    /// Check if using the default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn default_algorithm() -> String {
    String::from("HS256")
}

fn default_issuers() -> Vec<String> {
    vec![String::from("signet")]
}

fn default_audiences() -> Vec<String> {
    vec![String::from("signet-clients")]
}

fn default_access_minutes() -> i64 {
    15
}

fn default_refresh_minutes() -> i64 {
    14_400 // 10 days
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = TokenSettings::default();
        assert_eq!(settings.signing_algorithm, "HS256");
        assert_eq!(settings.access_token_expires_in_minutes, 15);
        assert_eq!(settings.refresh_token_expires_in_minutes, 14_400);
        assert_eq!(settings.issuers, vec!["signet"]);
        assert_eq!(settings.audiences, vec!["signet-clients"]);
        assert!(settings.is_using_default_secret());
    }

    #[test]
    fn test_settings_builder() {
        let settings = TokenSettings::new("my-secret")
            .with_access_expiry_minutes(30)
            .with_refresh_expiry_days(14)
            .with_issuers(vec!["app".to_string()])
            .with_audiences(vec!["app-clients".to_string(), "partners".to_string()]);

        assert_eq!(settings.access_token_expires_in_minutes, 30);
        assert_eq!(settings.refresh_token_expires_in_minutes, 14 * 24 * 60);
        assert_eq!(settings.issuers, vec!["app"]);
        assert_eq!(settings.audiences.len(), 2);
        assert!(!settings.is_using_default_secret());
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("a, b,c"), vec!["a", "b", "c"]);
        assert_eq!(split_list(""), Vec::<String>::new());
        assert_eq!(split_list("one"), vec!["one"]);
    }
}
