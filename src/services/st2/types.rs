//! Wire types exchanged with the st2 auth service.
use serde::{Deserialize, Serialize};

/// Body POSTed to `ST2AUTH_URL`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthPayload {
    pub user: String,
    /// Empty when the proxy did not forward a client address.
    pub remote_addr: String,
}

impl AuthPayload {
    pub fn new(user: impl Into<String>, remote_addr: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            remote_addr: remote_addr.into(),
        }
    }
}

/// Successful answer from the st2 auth service.
///
/// Other fields (`user`, `expiry`, ...) are ignored. An absent or `null`
/// token, or a body that is just `null`, is read as an empty token; a token
/// of the wrong JSON type is a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    token: Option<String>,
}

impl TokenResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let parsed: Option<Self> = serde_json::from_slice(body)?;
        Ok(parsed.unwrap_or_default())
    }

    pub fn into_token(self) -> String {
        self.token.unwrap_or_default()
    }
}
