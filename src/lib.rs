//! Auth bridge between a reverse proxy doing subrequest auth and the
//! StackStorm auth service.
//!
//! The proxy forwards an already-authenticated username; this service
//! trades it for an st2 token and hands the token back in response headers.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
