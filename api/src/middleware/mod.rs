mod auth;

pub use auth::{AuthContext, BearerAuth, OptionalAuth};
