pub mod principal;
pub mod token;

pub use principal::AuthenticatedPrincipal;
pub use token::{AccessToken, AccessTokenClaims, Claim, RefreshToken, TokenPair};
