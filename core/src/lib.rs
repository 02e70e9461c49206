//! # Signet Core
//!
//! Token domain entities, error taxonomy and the JWT token service.
//! This crate turns verified claims into signed, time-bounded access tokens,
//! mints opaque refresh tokens, and reverses the access-token encoding
//! (including past-expiry tokens) to recover claims for renewal flows.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
