//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - JWT access token generation and validation
//! - Opaque refresh token generation
//! - Expired-token decoding for refresh flows

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::TokenService;
