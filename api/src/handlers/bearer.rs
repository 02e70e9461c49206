//! Bearer sign-in handler.
//!
//! Adapts the token service into the pipeline's sign-in / sign-out /
//! challenge contract. The handler performs no cryptography itself; all
//! token semantics stay in the token service.

use std::sync::Arc;

use actix_web::http::header;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;

use signet_core::domain::entities::principal::AuthenticatedPrincipal;
use signet_core::domain::entities::token::TokenPair;
use signet_core::services::token::TokenService;

use crate::dto::ErrorResponse;

/// Handles sign-in, sign-out and challenge for bearer-token schemes.
///
/// The token service and its settings are injected at construction; the
/// handler never resolves services at request time.
pub struct BearerSignInHandler {
    token_service: Arc<TokenService>,
}

impl BearerSignInHandler {
    pub fn new(token_service: Arc<TokenService>) -> Self {
        Self { token_service }
    }

    /// Issues a token pair for an authenticated principal and writes it as
    /// the response body.
    ///
    /// The principal comes from an external credential check; its claims are
    /// passed through to the token service untouched. Issuance failures are
    /// configuration-level and answered with a 500 problem payload.
    pub fn sign_in(&self, principal: &AuthenticatedPrincipal) -> HttpResponse {
        match self.token_service.issue_pair(principal.claims()) {
            Ok((access, refresh)) => {
                HttpResponse::Ok().json(TokenPair::from_tokens(&access, Some(&refresh)))
            }
            Err(error) => {
                tracing::error!(%error, "token issuance failed during sign-in");
                ErrorResponse::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Sign-In Error",
                    "An error occurred while generating the token pair.",
                )
                .to_response()
            }
        }
    }

    /// Emits a bearer challenge.
    ///
    /// Appends `WWW-Authenticate: Bearer` and answers 401; deciding whether
    /// the request proceeds is the pipeline's job, not this handler's.
    pub fn challenge(&self) -> HttpResponse {
        HttpResponse::Unauthorized()
            .append_header((header::WWW_AUTHENTICATE, "Bearer"))
            .finish()
    }

    /// Sign-out is a no-op for this handler.
    ///
    /// Server-side refresh-token revocation lives behind the
    /// `RevocationStore` collaborator, wired by the embedding application.
    pub fn sign_out(&self) -> HttpResponse {
        HttpResponse::NoContent().finish()
    }
}
