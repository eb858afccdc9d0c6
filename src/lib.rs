//! A refresh token procedure for OAuth2/OIDC authorization servers.
//!
//! On top of the usual refresh response it can:
//!
//! - issue a long-lived access token when the token request carries `long_lived_token=true`,
//! - include an ID token when the client is configured with `id_token_on_refresh=true`.
//!
//! Token minting is delegated to the host through the [`AccessTokenIssuer`],
//! [`RefreshTokenIssuer`] and [`IdTokenIssuer`] traits.
pub use attributes::Attributes;
pub use clock::{Clock, SystemClock};
pub use config::{
    IssuerOverrides, ProcedureConfig, DEFAULT_LONG_LIVED_ACCESS_TOKEN_EXPIRATION, MAX_LONG_LIVED_ACCESS_TOKEN_EXPIRATION,
};
pub use error::{IssuerError, IssuerKind, ProcedureError, Result};
pub use issuer::{AccessTokenIssuer, Delegation, IdTokenIssuer, Issuers, RefreshTokenIssuer};
pub use procedure::{LongLivedRefreshProcedure, ID_TOKEN_ON_REFRESH_PROPERTY, LONG_LIVED_TOKEN_PARAMETER};
pub use request::{ClientProperties, QueryParameters, RefreshContext, RefreshGrant};
pub use response::{TokenResponse, TokenType};

mod attributes;
mod clock;
mod config;
mod error;
mod issuer;
mod procedure;
mod request;
mod response;
