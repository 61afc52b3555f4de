use axum::extract::FromRequestParts;
use axum::http::{HeaderValue, request::Parts};

use crate::error::AppError;
use crate::state::AppState;

/// Identity the reverse proxy already authenticated, plus the client address.
///
/// Header names come from `AppState::headers`. The identity must be present
/// and non-empty, otherwise the request is rejected with 401 before anything
/// is sent upstream. Its raw header value is kept so it can be echoed back
/// byte for byte; `user` is the same value read as UTF-8, with invalid
/// sequences replaced by U+FFFD. The client address is optional and becomes
/// `""` when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardedIdentity {
    pub user: String,
    pub user_header: HeaderValue,
    pub client_addr: String,
}

impl FromRequestParts<AppState> for ForwardedIdentity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_header = match parts.headers.get(&state.headers.identity) {
            Some(v) if !v.is_empty() => v.clone(),
            _ => {
                tracing::warn!(
                    header = %state.headers.identity,
                    "unauthorized: forwarded identity header is empty"
                );
                return Err(AppError::MissingIdentity);
            }
        };
        let user = lossy(&user_header);

        let client_addr = parts
            .headers
            .get(&state.headers.client_addr)
            .map(lossy)
            .unwrap_or_default();

        Ok(Self {
            user,
            user_header,
            client_addr,
        })
    }
}

fn lossy(value: &HeaderValue) -> String {
    String::from_utf8_lossy(value.as_bytes()).into_owned()
}
