/*
 * Responsibility
 * - GET /health (liveness probe, no identity required)
 */
pub async fn health() -> &'static str {
    "ok"
}
