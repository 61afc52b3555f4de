//! Shared helpers for integration tests: a stub st2 auth service and an app
//! wired to it.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use st2_auth_bridge::{app, config::Config};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// What the stub answers with.
#[derive(Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: &'static str,
    pub delay: Option<Duration>,
}

impl Reply {
    pub fn ok(body: &'static str) -> Self {
        Self {
            status: StatusCode::OK,
            body,
            delay: None,
        }
    }

    pub fn status(status: StatusCode, body: &'static str) -> Self {
        Self {
            status,
            body,
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// A request the stub received.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub content_type: Option<String>,
    pub body: serde_json::Value,
}

#[derive(Clone)]
struct StubState {
    reply: Reply,
    calls: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<Recorded>>>,
}

pub struct StubUpstream {
    pub url: String,
    calls: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<Recorded>>>,
}

impl StubUpstream {
    pub async fn start(reply: Reply) -> Self {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            reply,
            calls: calls.clone(),
            seen: seen.clone(),
        };

        let app = Router::new()
            .route("/auth/v1/tokens", post(stub_tokens))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{addr}/auth/v1/tokens"),
            calls,
            seen,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.seen.lock().unwrap().clone()
    }
}

async fn stub_tokens(State(state): State<StubState>, headers: HeaderMap, body: Bytes) -> Response {
    state.calls.fetch_add(1, Ordering::SeqCst);
    state.seen.lock().unwrap().push(Recorded {
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
    });

    if let Some(delay) = state.reply.delay {
        tokio::time::sleep(delay).await;
    }

    (state.reply.status, state.reply.body).into_response()
}

/// A raw TCP upstream that sends a 200 status line and headers, then only
/// part of the announced body, and stalls for `stall` before closing.
pub async fn stalled_body_url(stall: Duration) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let _ = socket
                    .write_all(
                        b"HTTP/1.1 200 OK\r\n\
                          Content-Type: application/json\r\n\
                          Content-Length: 30\r\n\r\n\
                          {\"tok",
                    )
                    .await;
                let _ = socket.flush().await;
                tokio::time::sleep(stall).await;
            });
        }
    });

    format!("http://{addr}/auth/v1/tokens")
}

/// An address nothing is listening on.
pub async fn refused_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/auth/v1/tokens")
}

/// Build the real router pointed at `upstream_url`, with optional extra settings.
pub fn test_app_with(upstream_url: &str, extra: &[(&str, &str)]) -> Router {
    let mut env: HashMap<String, String> = extra
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    env.insert("ST2AUTH_URL".to_string(), upstream_url.to_string());

    let config = Config::from_lookup(|key| env.get(key).cloned()).unwrap();
    let state = app::build_state(&config).unwrap();
    app::build_router(state, &config)
}

pub fn test_app(upstream_url: &str) -> Router {
    test_app_with(upstream_url, &[])
}
