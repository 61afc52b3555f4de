/*
 * Responsibility
 * - Load Config -> build the st2 client and state -> assemble the Router
 * - Apply middleware
 * - Serve with axum::serve() until Ctrl-C / SIGTERM
 */
use std::{panic, process, sync::Arc};

use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::error::AppError;
use crate::middleware;
use crate::services::st2::St2AuthClient;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,st2_auth_bridge=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Surface panics via tracing; stderr may be hidden depending on how we are launched.
        tracing::error!(?info, "panic");

        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> anyhow::Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting auth bridge in {:?} mode on {}",
        config.app_env,
        config.addr
    );
    log_upstream(&config);

    let state = build_state(&config)?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .map_err(AppError::Io)?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Io)?;

    tracing::info!("auth bridge stopped");
    Ok(())
}

fn log_upstream(config: &Config) {
    tracing::info!(url = %config.upstream_url, "ST2AUTH_URL");

    // Not fatal: a bad URL only turns every request into a 401.
    if config.upstream_url.is_empty() {
        tracing::warn!("ST2AUTH_URL is empty; every auth request will be rejected");
    } else if let Err(e) = url::Url::parse(&config.upstream_url) {
        tracing::warn!(error = %e, "ST2AUTH_URL does not parse as a URL");
    }
}

pub fn build_state(config: &Config) -> Result<AppState, AppError> {
    let upstream = St2AuthClient::new(
        config.upstream_url.clone(),
        config.upstream_timeout,
        config.upstream_connect_timeout,
    )?;

    Ok(AppState::new(
        Arc::new(upstream),
        config.forwarded_headers.clone(),
    ))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = api::routes().with_state(state);
    middleware::http::apply(router, config.request_timeout)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
