//! Configuration modules

mod auth;

pub use auth::TokenSettings;
