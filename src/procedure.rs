use std::sync::Arc;

use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::ProcedureConfig;
use crate::error::{IssuerKind, ProcedureError, Result};
use crate::issuer::Issuers;
use crate::request::RefreshContext;
use crate::response::{TokenResponse, TokenType};

pub const LONG_LIVED_TOKEN_PARAMETER: &str = "long_lived_token";
pub const ID_TOKEN_ON_REFRESH_PROPERTY: &str = "id_token_on_refresh";

/// Refresh token procedure. Issues a long-lived access token when the request asks for
/// `long_lived_token=true`, and an ID token when the client has `id_token_on_refresh=true`.
pub struct LongLivedRefreshProcedure {
    long_lived_expiration: i64,
    issuers: Issuers,
    clock: Arc<dyn Clock>,
}

impl LongLivedRefreshProcedure {
    pub fn new(config: ProcedureConfig, issuers: Issuers) -> Result<Self> {
        let long_lived_expiration = config.long_lived_expiration()?;
        Ok(Self {
            long_lived_expiration,
            issuers,
            clock: Arc::new(SystemClock),
        })
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub async fn run(&self, context: &RefreshContext) -> Result<TokenResponse> {
        let issue_long_lived = context.query.single(LONG_LIVED_TOKEN_PARAMETER).inspect_err(|_| {
            warn!("Rejecting refresh with repeated {LONG_LIVED_TOKEN_PARAMETER} parameter");
        })? == Some("true");
        let issue_id_token = self.should_issue_id_token(context);

        let access_token_data = if issue_long_lived {
            let exp = self
                .clock
                .now()
                .checked_add(self.long_lived_expiration)
                .ok_or_else(|| ProcedureError::configuration("long-lived expiration overflows the current time"))?;
            context.default_access_token_data.with("exp", exp)
        } else {
            context.default_access_token_data.clone()
        };
        let expires = access_token_data
            .expires()
            .ok_or(ProcedureError::MissingClaim { claim: "exp" })?;

        let access_token = self
            .issuers
            .access_token
            .issue(&access_token_data, &context.delegation)
            .await
            .map_err(ProcedureError::issuer(IssuerKind::AccessToken))?;
        let refresh_token = self
            .issuers
            .refresh_token
            .issue(&context.default_refresh_token_data, &context.delegation)
            .await
            .map_err(ProcedureError::issuer(IssuerKind::RefreshToken))?;

        let expires_in = u64::try_from(expires.saturating_sub(self.clock.now())).unwrap_or(0);
        debug!(issue_long_lived, issue_id_token, expires_in, "Issued refreshed tokens");

        let mut response = TokenResponse {
            scope: context.scope.clone(),
            access_token,
            token_type: TokenType::Bearer,
            expires_in,
            refresh_token,
            id_token: None,
        };

        if let Some(id_token_data) = context.default_id_token_data.as_ref().filter(|_| issue_id_token) {
            let id_token_issuer = &self.issuers.id_token;
            let at_hash = id_token_issuer
                .at_hash(&response.access_token)
                .map_err(ProcedureError::issuer(IssuerKind::IdToken))?;
            let id_token = id_token_issuer
                .issue(&id_token_data.with("at_hash", at_hash))
                .await
                .map_err(ProcedureError::issuer(IssuerKind::IdToken))?;
            response.id_token = Some(id_token);
        }

        Ok(response)
    }

    fn should_issue_id_token(&self, context: &RefreshContext) -> bool {
        if !context.client.is_true(ID_TOKEN_ON_REFRESH_PROPERTY) {
            return false;
        }
        if !context.has_scope("openid") {
            debug!("Client wants an ID token on refresh but openid scope was not granted");
            return false;
        }
        context.default_id_token_data.is_some()
    }
}

impl std::fmt::Debug for LongLivedRefreshProcedure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LongLivedRefreshProcedure")
            .field("long_lived_expiration", &self.long_lived_expiration)
            .finish_non_exhaustive()
    }
}
