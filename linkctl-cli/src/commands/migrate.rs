//! Schema migration command

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use linkctl_server::Store;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Path of the SQLite database file (created if missing)
    #[arg(long, env = "DATABASE_PATH", default_value = "botdata.db")]
    pub database_path: PathBuf,
}

/// Open the store, which applies the schema, then close it.
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let store = Store::open(&args.database_path, 1)
        .await
        .with_context(|| format!("Failed to migrate {}", args.database_path.display()))?;
    store.close().await;

    tracing::info!("Schema ready at {}", args.database_path.display());
    Ok(())
}
