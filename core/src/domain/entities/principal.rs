//! The principal reconstructed from a validated token.

use serde::{Deserialize, Serialize};

use super::token::Claim;

/// Authentication scheme stamped on principals recovered from bearer tokens
pub const BEARER_SCHEME: &str = "Bearer";

/// The set of claims recovered from a validated access token.
///
/// The core treats the claims as an opaque ordered collection; it never
/// inspects or enforces claim semantics. That is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedPrincipal {
    scheme: String,
    claims: Vec<Claim>,
}

impl AuthenticatedPrincipal {
    pub fn new(scheme: impl Into<String>, claims: Vec<Claim>) -> Self {
        Self {
            scheme: scheme.into(),
            claims,
        }
    }

    /// Builds a bearer-scheme principal
    pub fn bearer(claims: Vec<Claim>) -> Self {
        Self::new(BEARER_SCHEME, claims)
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    /// First claim value with the given name, if any
    pub fn find(&self, name: &str) -> Option<&str> {
        self.claims
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value.as_str())
    }

    /// All claim values with the given name, in order
    pub fn find_all(&self, name: &str) -> Vec<&str> {
        self.claims
            .iter()
            .filter(|c| c.name == name)
            .map(|c| c.value.as_str())
            .collect()
    }

    pub fn into_claims(self) -> Vec<Claim> {
        self.claims
    }
}
