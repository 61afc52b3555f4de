/*
 * Responsibility
 * - /auth: forwarded identity -> st2 token -> response headers
 * - Identity validation lives in the extractor, the upstream call in services::st2
 */
use axum::{
    extract::State,
    http::{HeaderName, HeaderValue, StatusCode},
    response::IntoResponse,
};

use crate::api::extractors::ForwardedIdentity;
use crate::error::AppError;
use crate::services::st2::AuthPayload;
use crate::state::AppState;

pub const AUTH_USER_HEADER: HeaderName = HeaderName::from_static("x-auth-request-user");
pub const ST2_TOKEN_HEADER: HeaderName = HeaderName::from_static("x-st2-token");

pub async fn auth(
    State(state): State<AppState>,
    ForwardedIdentity {
        user,
        user_header,
        client_addr,
    }: ForwardedIdentity,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(%user, %client_addr, "authenticating user");

    let payload = AuthPayload::new(user.as_str(), client_addr.as_str());
    let token = state.upstream.exchange(&payload).await?;

    // The token ends up in a header; a value with control characters cannot.
    let token = HeaderValue::from_str(&token).map_err(|_| {
        tracing::error!(%user, "st2 token is not a valid header value");
        AppError::InvalidHeaderValue("token")
    })?;

    tracing::info!(%user, "authentication successful");

    Ok((
        StatusCode::OK,
        [(AUTH_USER_HEADER, user_header), (ST2_TOKEN_HEADER, token)],
        "OK",
    ))
}
