//! Tracing setup.
//!
//! The terminal belongs to the player, so logs go to the file named by
//! `FOGLINE_LOG`. Without it, no subscriber is installed.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

pub const LOG_PATH_VAR: &str = "FOGLINE_LOG";

pub fn init() -> Result<()> {
    let Ok(path) = std::env::var(LOG_PATH_VAR) else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {path}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    tracing::info!(path = %path, "logging started");
    Ok(())
}
