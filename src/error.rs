//! Errors returned by the refresh procedure.

use std::fmt;

/// Boxed error produced by a token issuer.
pub type IssuerError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T, E = ProcedureError> = std::result::Result<T, E>;

/// Which issuer failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssuerKind {
    AccessToken,
    RefreshToken,
    IdToken,
}

impl fmt::Display for IssuerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssuerKind::AccessToken => f.write_str("access_token"),
            IssuerKind::RefreshToken => f.write_str("refresh_token"),
            IssuerKind::IdToken => f.write_str("id_token"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProcedureError {
    /// The request cannot be handled as sent, e.g. a repeated `long_lived_token` parameter.
    #[error("Malformed request: {message}")]
    MalformedRequest { message: String },

    /// An issuer failed to mint a token. Never retried here.
    #[error("Failed to issue {kind}: {source}")]
    Issuer {
        kind: IssuerKind,
        #[source]
        source: IssuerError,
    },

    /// The default access token data handed over by the host lacks a claim we need.
    #[error("Access token data has no usable `{claim}` claim")]
    MissingClaim { claim: &'static str },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl ProcedureError {
    pub fn malformed_request(message: impl Into<String>) -> Self {
        Self::MalformedRequest {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub(crate) fn issuer(kind: IssuerKind) -> impl FnOnce(IssuerError) -> Self {
        move |source| Self::Issuer { kind, source }
    }

    /// OAuth2 error code the host should put in its error response.
    pub fn error_code(&self) -> &'static str {
        match self {
            ProcedureError::MalformedRequest { .. } => "invalid_request",
            _ => "server_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ProcedureError::malformed_request("dup").error_code(), "invalid_request");
        let err = ProcedureError::issuer(IssuerKind::IdToken)("signing key missing".into());
        assert_eq!(err.error_code(), "server_error");
        assert_eq!(err.to_string(), "Failed to issue id_token: signing key missing");
    }
}
