mod auth;

pub use auth::{ErrorResponse, RefreshRequest};
