//! Client for the st2 auth service.
//!
//! One POST per inbound request, no retries. The underlying `reqwest::Client`
//! keeps a connection pool, so concurrent requests reuse connections to the
//! upstream without sharing any other state.

use std::time::Duration;

use async_trait::async_trait;
use axum::http::{StatusCode, header};

use crate::error::AppError;
use crate::services::st2::types::{AuthPayload, TokenResponse};

/// Exchanges a forwarded identity for an st2 token.
///
/// Implementations must be safe to share across requests (`Arc<dyn TokenExchange>`).
#[async_trait]
pub trait TokenExchange: Send + Sync + 'static {
    async fn exchange(&self, payload: &AuthPayload) -> Result<String, AppError>;
}

#[derive(Clone, Debug)]
pub struct St2AuthClient {
    http: reqwest::Client,
    url: String,
}

impl St2AuthClient {
    pub fn new(
        url: impl Into<String>,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("st2-auth-bridge/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(AppError::HttpClient)?;

        Ok(Self {
            http,
            url: url.into(),
        })
    }
}

#[async_trait]
impl TokenExchange for St2AuthClient {
    async fn exchange(&self, payload: &AuthPayload) -> Result<String, AppError> {
        let body = serde_json::to_vec(payload).map_err(|e| {
            tracing::error!(user = %payload.user, error = %e, "failed to serialize auth payload");
            AppError::Serialization(e)
        })?;

        let res = self
            .http
            .post(&self.url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    tracing::warn!(user = %payload.user, error = %e, "st2 auth call timed out");
                    AppError::UpstreamTimeout
                } else {
                    tracing::warn!(user = %payload.user, error = %e, "st2 auth call failed");
                    AppError::UpstreamUnreachable(e)
                }
            })?;

        let status = res.status();
        tracing::debug!(user = %payload.user, %status, "st2 auth responded");
        if status != StatusCode::OK {
            tracing::warn!(user = %payload.user, %status, "st2 auth returned non-200 status");
            return Err(AppError::UpstreamDenied(status));
        }

        // The total timeout also covers the body; expiry here is still a timeout.
        let bytes = res.bytes().await.map_err(|e| {
            if e.is_timeout() {
                tracing::warn!(user = %payload.user, error = %e, "st2 auth body timed out");
                AppError::UpstreamTimeout
            } else {
                tracing::error!(user = %payload.user, error = %e, "failed to read st2 auth body");
                AppError::ResponseRead(e)
            }
        })?;

        let parsed = TokenResponse::from_slice(&bytes).map_err(|e| {
            tracing::error!(user = %payload.user, error = %e, "failed to parse st2 auth body");
            AppError::Serialization(e)
        })?;

        Ok(parsed.into_token())
    }
}
