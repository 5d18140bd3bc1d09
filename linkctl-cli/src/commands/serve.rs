//! HTTP server command
//!
//! Opens the SQLite store and serves the tag and link API until shutdown.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use linkctl_server::{run_server, ServerConfig, Store, DEFAULT_MAX_CONNECTIONS};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Interface to bind to
    #[arg(long, short = 'b', env = "LINKCTL_BIND", default_value = "0.0.0.0")]
    pub bind: IpAddr,

    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Path of the SQLite database file (created if missing)
    #[arg(long, env = "DATABASE_PATH", default_value = "botdata.db")]
    pub database_path: PathBuf,

    /// Maximum pooled store connections
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: SocketAddr::new(self.bind, self.port),
            request_timeout: Duration::from_secs(self.timeout),
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.server_config();
    tracing::info!(
        database = %args.database_path.display(),
        "Starting linkctl server on {}",
        config.bind_addr
    );

    let store = Store::open(&args.database_path, args.max_connections)
        .await
        .with_context(|| format!("Failed to open database {}", args.database_path.display()))?;

    // Run server (blocks until shutdown)
    run_server(store, config).await.context("Server error")?;

    Ok(())
}
