//! Token issuers supplied by the host.
//!
//! The procedure never signs or stores anything itself. It hands claims to these
//! issuers and puts whatever string they return into the response.

use std::sync::Arc;

use async_trait::async_trait;

use crate::attributes::Attributes;
use crate::error::IssuerError;

/// Opaque handle to the original authorization grant. New tokens are bound to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delegation {
    pub id: String,
}

impl Delegation {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
pub trait AccessTokenIssuer: Send + Sync {
    async fn issue(&self, attributes: &Attributes, delegation: &Delegation) -> Result<String, IssuerError>;
}

#[async_trait]
pub trait RefreshTokenIssuer: Send + Sync {
    async fn issue(&self, attributes: &Attributes, delegation: &Delegation) -> Result<String, IssuerError>;
}

#[async_trait]
pub trait IdTokenIssuer: Send + Sync {
    async fn issue(&self, attributes: &Attributes) -> Result<String, IssuerError>;

    /// Hash of the access token for the `at_hash` claim. Algorithm is up to the issuer.
    fn at_hash(&self, access_token: &str) -> Result<String, IssuerError>;
}

/// The three issuers the procedure mints tokens with.
#[derive(Clone)]
pub struct Issuers {
    pub access_token: Arc<dyn AccessTokenIssuer>,
    pub refresh_token: Arc<dyn RefreshTokenIssuer>,
    pub id_token: Arc<dyn IdTokenIssuer>,
}

impl std::fmt::Debug for Issuers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Issuers").finish_non_exhaustive()
    }
}
