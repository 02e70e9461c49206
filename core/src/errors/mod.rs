//! Error types for token issuance and validation.

mod types;

pub use types::{ConfigurationError, TokenValidationError};

use thiserror::Error;

/// Top-level error for the token core
#[derive(Error, Debug)]
pub enum AuthError {
    // Bridge to specific error types
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Validation(#[from] TokenValidationError),

    #[error("Revocation store error: {message}")]
    Store { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AuthError {
    /// The validation sub-reason, if this is a validation failure
    pub fn validation_reason(&self) -> Option<TokenValidationError> {
        match self {
            AuthError::Validation(reason) => Some(*reason),
            _ => None,
        }
    }
}

pub type AuthResult<T> = Result<T, AuthError>;
