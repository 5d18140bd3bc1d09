//! Environment loading

use std::path::{Path, PathBuf};

use tracing::{debug, info};

/// Load `.env` from the current directory (or a parent), if there is one.
///
/// Variables already present in the environment win. Runs before tracing is
/// initialised, so the outcome is returned and logged by [`log_dotenv`].
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

pub fn log_dotenv(loaded: Option<&Path>) {
    match loaded {
        Some(path) => info!("Loaded configuration from {}", path.display()),
        None => {
            debug!("No .env file found");
            info!("Using environment variables only (no .env file found)");
        }
    }
}
