use serde::{Deserialize, Serialize};

/// Bearer token issued when a client is paired with the health gateway.
/// Long-lived; revoked by unpairing on the gateway side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessToken {
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub access_token: String,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl AccessToken {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            token_type: default_token_type(),
            access_token: access_token.into(),
        }
    }

    /// Returns the Authorization header value.
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}
