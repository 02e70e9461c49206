//! Specific error types for token configuration and validation
//!
//! Configuration errors are fatal and surface at service construction;
//! validation errors are expected per-request outcomes that the caller
//! translates into HTTP-level responses without leaking the sub-reason
//! to the client.

use thiserror::Error;

/// Fatal configuration errors
///
/// These are checked eagerly when the token service is constructed so a
/// misconfigured deployment fails at startup instead of producing cryptic
/// signing failures per request. Not retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Signing secret is missing or empty")]
    MissingSecret,

    #[error("No trusted issuers configured")]
    NoIssuers,

    #[error("No accepted audiences configured")]
    NoAudiences,

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

/// Per-request token validation failures
///
/// Each carries the sub-reason for logging and telemetry. The HTTP-facing
/// response generalizes to 401 Unauthorized regardless of the variant.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid signature")]
    BadSignature,

    #[error("Untrusted issuer")]
    BadIssuer,

    #[error("Unaccepted audience")]
    BadAudience,

    #[error("Signing algorithm does not match configuration")]
    AlgorithmMismatch,

    #[error("Malformed token")]
    Malformed,
}
