//! The bound HTTP listener.

use std::net::SocketAddr;

use tracing::info;

use crate::{routes::create_router, state::AppState};

/// A gateway ready to accept connections, built from an [`AppState`].
pub struct Server {
    addr: SocketAddr,
    state: AppState,
}

impl Server {
    /// Bind to the host/port recorded in `state.config.server`.
    ///
    /// # Panics
    /// Panics if `host` cannot be parsed as an IP address.
    #[must_use]
    pub fn new(state: AppState) -> Self {
        let addr = SocketAddr::new(
            state
                .config
                .server
                .host
                .parse()
                .expect("server.host must be a valid IP address"),
            state.config.server.port,
        );
        Self { addr, state }
    }

    /// Run until the process is terminated.
    ///
    /// # Errors
    /// Returns an I/O error if the address can't be bound.
    pub async fn run(self) -> std::io::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        info!(addr = %self.addr, "gateway listening");
        axum::serve(listener, create_router(self.state)).await
    }
}
