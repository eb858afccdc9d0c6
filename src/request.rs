use std::collections::HashMap;

use serde::Deserialize;

use crate::attributes::Attributes;
use crate::error::{ProcedureError, Result};
use crate::issuer::Delegation;

/// Query parameters of the token request. Keeps every value of a repeated name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParameters(HashMap<String, Vec<String>>);

impl QueryParameters {
    /// Decode a raw query string such as `long_lived_token=true&foo=bar`.
    pub fn parse(query: &str) -> Self {
        url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    pub fn values(&self, name: &str) -> &[String] {
        self.0.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// The value of `name`, if present. More than one value is an error, even if they are equal.
    pub fn single(&self, name: &str) -> Result<Option<&str>> {
        match self.values(name) {
            [] => Ok(None),
            [value] => Ok(Some(value.as_str())),
            _ => Err(ProcedureError::malformed_request(format!(
                "More than one value of {name} parameter found."
            ))),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params: HashMap<String, Vec<String>> = HashMap::new();
        for (k, v) in iter {
            params.entry(k.into()).or_default().push(v.into());
        }
        Self(params)
    }
}

/// Typed properties configured on the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientProperties(HashMap<String, String>);

impl ClientProperties {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// True only for the exact string `"true"`.
    pub fn is_true(&self, name: &str) -> bool {
        self.get(name) == Some("true")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ClientProperties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Form body of a refresh token grant.
///
/// The procedure never reads this itself. The host decodes the token request body with
/// [`RefreshGrant::from_form`], looks up the grant by `refresh_token`, and fills
/// [`RefreshContext::scope`] from the narrowed `scope` or the originally granted one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshGrant {
    pub grant_type: String,
    pub refresh_token: String,
    #[serde(default)]
    pub scope: Option<String>,
}

impl RefreshGrant {
    pub fn from_form(body: &str) -> Result<Self> {
        let grant: RefreshGrant = serde_qs::from_str(body)
            .map_err(|e| ProcedureError::malformed_request(format!("Invalid refresh grant: {e}")))?;
        if grant.grant_type != "refresh_token" {
            return Err(ProcedureError::malformed_request(format!(
                "Unsupported grant_type {}",
                grant.grant_type
            )));
        }
        Ok(grant)
    }
}

/// Everything the host knows about one refresh request.
#[derive(Debug, Clone)]
pub struct RefreshContext {
    pub client: ClientProperties,
    pub query: QueryParameters,
    /// Access token claims as the host would issue them, including its normal `exp`.
    /// `exp` must be a JSON integer of epoch seconds, otherwise the refresh fails with
    /// `MissingClaim` unless a long-lived token replaces it.
    pub default_access_token_data: Attributes,
    pub default_refresh_token_data: Attributes,
    /// `None` when the host would not issue an ID token for this request.
    pub default_id_token_data: Option<Attributes>,
    /// Space separated granted scope.
    pub scope: String,
    pub delegation: Delegation,
}

impl RefreshContext {
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scope.split_whitespace().any(|s| s == scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_value() {
        let query = QueryParameters::parse("?long_lived_token=true&other=1");
        assert_eq!(query.single("long_lived_token").unwrap(), Some("true"));
        assert_eq!(query.single("missing").unwrap(), None);
    }

    #[test]
    fn test_repeated_value_is_malformed() {
        let query = QueryParameters::parse("long_lived_token=true&long_lived_token=false");
        assert_eq!(query.values("long_lived_token").len(), 2);
        let err = query.single("long_lived_token").unwrap_err();
        assert!(matches!(err, ProcedureError::MalformedRequest { .. }));

        let same = QueryParameters::parse("long_lived_token=true&long_lived_token=true");
        assert!(same.single("long_lived_token").is_err());
    }

    #[test]
    fn test_client_property_exact_true() {
        let props: ClientProperties = [("a", "true"), ("b", "True"), ("c", "1")].into_iter().collect();
        assert!(props.is_true("a"));
        assert!(!props.is_true("b"));
        assert!(!props.is_true("c"));
        assert!(!props.is_true("d"));
    }

    #[test]
    fn test_refresh_grant_from_form() {
        let grant = RefreshGrant::from_form("grant_type=refresh_token&refresh_token=abc&scope=openid%20read").unwrap();
        assert_eq!(grant.refresh_token, "abc");
        assert_eq!(grant.scope.as_deref(), Some("openid read"));

        let err = RefreshGrant::from_form("grant_type=authorization_code&refresh_token=abc").unwrap_err();
        assert_eq!(err.error_code(), "invalid_request");
        assert!(RefreshGrant::from_form("grant_type=refresh_token").is_err());
    }
}
