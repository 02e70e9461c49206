//! Business services built on the domain layer.

pub mod token;

pub use token::{TokenService, TokenServiceConfig};
