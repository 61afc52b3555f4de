pub mod client;
pub mod types;

pub use client::{St2AuthClient, TokenExchange};
pub use types::{AuthPayload, TokenResponse};
