//! Procedure configuration, read once when the host loads the procedure.
//!
//! ```toml
//! long_lived_access_token_expiration_seconds = 28800
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ProcedureError, Result};
use crate::issuer::{AccessTokenIssuer, IdTokenIssuer, Issuers, RefreshTokenIssuer};

/// Four hours.
pub const DEFAULT_LONG_LIVED_ACCESS_TOKEN_EXPIRATION: u64 = 4 * 60 * 60;

/// Upper bound for the long-lived TTL: 100 years.
pub const MAX_LONG_LIVED_ACCESS_TOKEN_EXPIRATION: u64 = 100 * 365 * 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcedureConfig {
    /// TTL of a long-lived access token, in seconds.
    pub long_lived_access_token_expiration_seconds: u64,
}

impl Default for ProcedureConfig {
    fn default() -> Self {
        Self {
            long_lived_access_token_expiration_seconds: DEFAULT_LONG_LIVED_ACCESS_TOKEN_EXPIRATION,
        }
    }
}

impl ProcedureConfig {
    pub fn with_long_lived_expiration(mut self, seconds: u64) -> Self {
        self.long_lived_access_token_expiration_seconds = seconds;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.long_lived_expiration().map(drop)
    }

    /// The long-lived TTL in seconds, checked to lie in `1..=MAX_LONG_LIVED_ACCESS_TOKEN_EXPIRATION`.
    pub(crate) fn long_lived_expiration(&self) -> Result<i64> {
        match self.long_lived_access_token_expiration_seconds {
            0 => Err(ProcedureError::configuration(
                "long_lived_access_token_expiration_seconds must be positive",
            )),
            // bounded above, so the cast is lossless
            seconds @ 1..=MAX_LONG_LIVED_ACCESS_TOKEN_EXPIRATION => Ok(seconds as i64),
            seconds => Err(ProcedureError::configuration(format!(
                "long_lived_access_token_expiration_seconds must not exceed {MAX_LONG_LIVED_ACCESS_TOKEN_EXPIRATION}, got {seconds}"
            ))),
        }
    }
}

/// Custom issuers to use instead of the host's defaults.
#[derive(Clone, Default)]
pub struct IssuerOverrides {
    pub access_token: Option<Arc<dyn AccessTokenIssuer>>,
    pub refresh_token: Option<Arc<dyn RefreshTokenIssuer>>,
    pub id_token: Option<Arc<dyn IdTokenIssuer>>,
}

impl IssuerOverrides {
    /// Fill every unset override from the host's default issuers.
    pub fn resolve(self, host: Issuers) -> Issuers {
        Issuers {
            access_token: self.access_token.unwrap_or(host.access_token),
            refresh_token: self.refresh_token.unwrap_or(host.refresh_token),
            id_token: self.id_token.unwrap_or(host.id_token),
        }
    }
}

impl std::fmt::Debug for IssuerOverrides {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuerOverrides")
            .field("access_token", &self.access_token.is_some())
            .field("refresh_token", &self.refresh_token.is_some())
            .field("id_token", &self.id_token.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_four_hours() {
        let config: ProcedureConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.long_lived_access_token_expiration_seconds, 14400);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_ttl() {
        let config: ProcedureConfig =
            serde_json::from_str(r#"{"long_lived_access_token_expiration_seconds": 86400}"#).unwrap();
        assert_eq!(config.long_lived_access_token_expiration_seconds, 86400);
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let err = ProcedureConfig::default().with_long_lived_expiration(0).validate().unwrap_err();
        assert!(matches!(err, ProcedureError::Configuration { .. }));
    }

    #[test]
    fn test_ttl_upper_bound() {
        let max = ProcedureConfig::default().with_long_lived_expiration(MAX_LONG_LIVED_ACCESS_TOKEN_EXPIRATION);
        assert_eq!(max.long_lived_expiration().unwrap(), MAX_LONG_LIVED_ACCESS_TOKEN_EXPIRATION as i64);

        for seconds in [MAX_LONG_LIVED_ACCESS_TOKEN_EXPIRATION + 1, i64::MAX as u64, u64::MAX] {
            let err = ProcedureConfig::default().with_long_lived_expiration(seconds).validate().unwrap_err();
            assert!(matches!(err, ProcedureError::Configuration { .. }), "ttl {seconds}");
        }
    }
}
