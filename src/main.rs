//! Reactive Feed Service (v1)
//!
//! Streams restaurants under a price cap while tagging every feed log line
//! with the caller's identifier.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌───────────────────────────────────────────────────┐
//!                     │                  REACTIVE FEED                    │
//!                     │                                                   │
//!   Client Request    │  ┌─────────┐   ┌──────────┐   ┌────────────────┐  │
//!   ──────────────────┼─▶│  http   │──▶│ handlers │──▶│    catalog     │  │
//!                     │  │ server  │   │          │   │ RestaurantStore│  │
//!                     │  └─────────┘   └──────────┘   └───────┬────────┘  │
//!                     │                                       │ Stream    │
//!                     │                                       ▼           │
//!   Streamed Response │  ┌──────────┐   ┌────────────────────────────┐    │
//!   ◀─────────────────┼──│ response │◀──│ reactive::context_log      │    │
//!                     │  │ framing  │   │ (uid scoped per log call)  │    │
//!                     │  └──────────┘   └────────────────────────────┘    │
//!                     │                                                   │
//!                     │  config · observability · lifecycle               │
//!                     └───────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use reactive_feed::config::{self, validation::validate_config, ConfigError, FeedConfig};
use reactive_feed::lifecycle::{self, Shutdown};
use reactive_feed::observability::logging;

#[derive(Parser)]
#[command(name = "reactive-feed")]
#[command(about = "Restaurant feed with per-request contextual logging", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => FeedConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability);

    tracing::info!("reactive-feed v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config_file = ?cli.config,
        bind_address = %config.listener.bind_address,
        catalog_size = config.catalog.size,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    let server = lifecycle::launch(config, &shutdown).await?;
    tokio::spawn(shutdown.trigger_on_signal());

    server.wait().await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
