//! Shared configuration types for the Signet token core.
//!
//! This crate holds the configuration surface consumed by the other
//! workspace members: token settings with environment loading and
//! sensible defaults.

pub mod config;

// Re-export commonly used items at crate root
pub use config::TokenSettings;
