//! Request and error payloads for the bearer authentication surface.
//!
//! The success payload (the token pair) is defined in `signet_core`; its
//! field names are part of the wire contract.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};

/// Body of a token renewal request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// The expired (or expiring) access token
    pub access_token: String,

    /// The opaque refresh token issued alongside it
    pub refresh_token: String,
}

/// Problem-details style error payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            title: title.into(),
            detail: Some(detail.into()),
        }
    }

    pub fn to_response(&self) -> HttpResponse {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        HttpResponse::build(status).json(self)
    }
}
