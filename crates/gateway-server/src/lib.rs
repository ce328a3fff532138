//! # Gateway Server
//!
//! HTTP surface for the LLM routing gateway: an axum router exposing
//! health/metrics probes, the chat-completions endpoint, and the
//! admin/analytics endpoints, wired over [`AppState`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use server::Server;
pub use state::{AppState, AppStateBuilder};
