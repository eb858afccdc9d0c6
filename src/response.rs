use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "oasgen", derive(oasgen::OaSchema))]
pub enum TokenType {
    #[default]
    Bearer,
}

/// Body of a successful refresh. Fields serialize in this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "oasgen", derive(oasgen::OaSchema))]
pub struct TokenResponse {
    pub scope: String,
    pub access_token: String,
    pub token_type: TokenType,
    pub expires_in: u64,
    pub refresh_token: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let response = TokenResponse {
            scope: "read".into(),
            access_token: "at".into(),
            token_type: TokenType::Bearer,
            expires_in: 300,
            refresh_token: "rt".into(),
            id_token: None,
        };
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"scope":"read","access_token":"at","token_type":"bearer","expires_in":300,"refresh_token":"rt"}"#
        );
    }
}
