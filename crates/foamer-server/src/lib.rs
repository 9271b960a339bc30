//! Foamer message service.
//!
//! This crate provides the HTTP service messages are posted to:
//! - Axum for routing and extraction
//! - Tokio for async runtime
//! - In-memory storage from `foamer-core`
//!
//! ## Architecture
//!
//! ```text
//! foamer-server
//!   ├─ Server          (listener + graceful shutdown)
//!   ├─ router          (POST/GET /messages, GET /messages/display)
//!   └─ MemoryStorage   (process-lifetime message store)
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod service;

use std::net::SocketAddr;

pub use error::ServerError;
use foamer_core::MemoryStorage;
pub use service::{INVALID_API_KEY_TEXT, INVALID_CONTENT_TEXT, ServiceConfig, router};
use tokio::net::TcpListener;

/// Server configuration for the production runtime.
#[derive(Debug, Clone)]
pub struct ServerRuntimeConfig {
    /// Address to bind to (e.g., "0.0.0.0:8080")
    pub bind_address: String,
    /// Service configuration (auth)
    pub service: ServiceConfig,
}

impl Default for ServerRuntimeConfig {
    fn default() -> Self {
        Self { bind_address: "0.0.0.0:8080".to_string(), service: ServiceConfig::default() }
    }
}

/// Production Foamer server.
pub struct Server {
    listener: TcpListener,
    storage: MemoryStorage,
    service: ServiceConfig,
}

impl Server {
    /// Create and bind a new server.
    ///
    /// # Errors
    ///
    /// Returns error if the address does not parse or binding fails.
    pub async fn bind(config: ServerRuntimeConfig) -> Result<Self, ServerError> {
        let addr: SocketAddr = config
            .bind_address
            .parse()
            .map_err(|e| {
                ServerError::Config(format!("invalid bind address {}: {e}", config.bind_address))
            })?;

        let listener = TcpListener::bind(addr).await?;

        Ok(Self { listener, storage: MemoryStorage::new(), service: config.service })
    }

    /// Address the server is listening on.
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Storage backing this server.
    pub fn storage(&self) -> &MemoryStorage {
        &self.storage
    }

    /// Serve requests until ctrl-c.
    pub async fn run(self) -> Result<(), ServerError> {
        self.run_until(shutdown_signal()).await
    }

    /// Serve requests until `shutdown` resolves.
    pub async fn run_until(
        self,
        shutdown: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> Result<(), ServerError> {
        tracing::info!("Server starting on {}", self.listener.local_addr()?);

        let app = router(self.storage, self.service);
        axum::serve(self.listener, app).with_graceful_shutdown(shutdown).await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
}
