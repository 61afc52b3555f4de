/*
 * Responsibility
 * - Application-wide AppError
 * - IntoResponse: every failure collapses into one of two plain-text responses
 *   (401 "Unauthorized\n" or 500 "Internal Server Error\n")
 */
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("forwarded identity header is missing or empty")]
    MissingIdentity,

    #[error("upstream unreachable: {0}")]
    UpstreamUnreachable(#[source] reqwest::Error),

    #[error("upstream did not answer in time")]
    UpstreamTimeout,

    #[error("upstream denied the request with status {0}")]
    UpstreamDenied(StatusCode),

    #[error("json error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to read upstream response: {0}")]
    ResponseRead(#[source] reqwest::Error),

    #[error("{0} is not a valid header value")]
    InvalidHeaderValue(&'static str),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build http client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingIdentity
            | AppError::UpstreamUnreachable(_)
            | AppError::UpstreamTimeout
            | AppError::UpstreamDenied(_) => StatusCode::UNAUTHORIZED,
            AppError::Serialization(_)
            | AppError::ResponseRead(_)
            | AppError::InvalidHeaderValue(_)
            | AppError::Config(_)
            | AppError::HttpClient(_)
            | AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match status {
            StatusCode::UNAUTHORIZED => "Unauthorized\n",
            _ => "Internal Server Error\n",
        };

        (status, body).into_response()
    }
}
