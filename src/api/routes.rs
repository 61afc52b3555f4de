/*
 * Responsibility
 * - URL layout of the bridge
 * - /auth answers any method: the proxy's auth subrequest decides the verb
 */
use axum::{
    Router,
    routing::{any, get},
};

use crate::api::handlers::{auth::auth, health::health};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth", any(auth))
        .route("/health", get(health))
}
