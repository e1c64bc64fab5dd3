//! Diagnostic logging. The terminal belongs to the game, so logs go to a file.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("snake.log")
}

/// Installs the global subscriber writing to `log_file_path`.
///
/// Filtering follows `RUST_LOG`, defaulting to `info`. Returns `None` if the file
/// can't be created or a subscriber is already installed; the game runs either way.
pub fn init_global(log_file_path: &Path) -> Option<()> {
    let log_file = File::create(log_file_path).ok()?;
    build_subscriber(log_file).try_init().ok()
}

pub fn build_subscriber(log_file: File) -> impl tracing::Subscriber + Send + Sync {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer().with_ansi(false).with_writer(Arc::new(log_file));

    tracing_subscriber::registry().with(fmt_layer).with(env_filter)
}
