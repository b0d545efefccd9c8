//! Tracing setup. The terminal belongs to the UI, so logs go to a file.

use std::{
    fs::{self, OpenOptions},
    path::PathBuf,
    sync::Mutex,
};

use anyhow::{Context, Result, anyhow};
use skycast_core::Config;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "skycast.log";

/// Install the global subscriber and return the log file path.
///
/// Filter comes from `RUST_LOG`, defaulting to `info`.
pub fn init(path: Option<PathBuf>) -> Result<PathBuf> {
    let path = match path {
        Some(p) => p,
        None => default_log_path()?,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to install log subscriber: {e}"))?;

    Ok(path)
}

fn default_log_path() -> Result<PathBuf> {
    Ok(Config::project_dirs()?.data_local_dir().join(LOG_FILE_NAME))
}
