//! actix-web adapter for the Signet token core.
//!
//! Bridges the token service into the request pipeline's authentication
//! contract: a bearer sign-in handler (sign-in, sign-out, challenge) and a
//! middleware that authenticates presented bearer tokens.

pub mod dto;
pub mod handlers;
pub mod middleware;

pub use handlers::BearerSignInHandler;
pub use middleware::{AuthContext, BearerAuth, OptionalAuth};
