/*
 * Responsibility
 * - Start the tokio runtime
 * - Call app::run() (no logic lives here)
 */
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    st2_auth_bridge::app::run().await
}
