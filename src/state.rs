/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 *   - upstream: the st2 token exchange, headers: forwarded header names
 * - Cheap to clone (Arc inside); nothing in here is mutated after startup
 */
use std::sync::Arc;

use crate::config::ForwardedHeaders;
use crate::services::st2::TokenExchange;

#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<dyn TokenExchange>,
    pub headers: Arc<ForwardedHeaders>,
}

impl AppState {
    pub fn new(upstream: Arc<dyn TokenExchange>, headers: ForwardedHeaders) -> Self {
        Self {
            upstream,
            headers: Arc::new(headers),
        }
    }
}
