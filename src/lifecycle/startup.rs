//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the restaurant catalog from configuration
//! - Start the metrics exporter when enabled
//! - Bind the listener and spawn the HTTP server
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The catalog is generated before the listener binds, so no request
//!   ever sees a partially built store

use std::io;
use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::catalog::RestaurantStore;
use crate::config::FeedConfig;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;

/// A server spawned onto the runtime.
pub struct RunningServer {
    pub local_addr: SocketAddr,
    handle: JoinHandle<io::Result<()>>,
}

impl RunningServer {
    /// Wait for the server task to finish.
    pub async fn wait(self) -> io::Result<()> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(io::Error::other(e)),
        }
    }
}

/// Initialize subsystems in order and start serving.
pub async fn launch(config: FeedConfig, shutdown: &Shutdown) -> io::Result<RunningServer> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let store = RestaurantStore::from_config(&config.catalog);
    match store.price_range() {
        Some((min, max)) => tracing::info!(
            restaurants = store.len(),
            min_price = min,
            max_price = max,
            seeded = config.catalog.seed.is_some(),
            "Catalog generated"
        ),
        None => tracing::warn!("Catalog is empty"),
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let server = HttpServer::new(config, store);
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    Ok(RunningServer { local_addr, handle })
}
