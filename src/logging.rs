//! Tracing setup for the desktop binary.
//!
//! Console output honours `RUST_LOG`, falling back to the configured
//! `log_filter`. A second layer writes debug-level logs to
//! `<data dir>/logs/shelf.log`, rotated daily.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::project_dirs;

pub fn init(default_filter: &str) {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "shelf.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(err) => {
            eprintln!("Warning: could not initialize file logging: {err:#}");
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

fn ensure_logs_dir() -> Result<PathBuf> {
    let dirs = project_dirs().ok_or_else(|| anyhow!("unable to resolve data directory"))?;
    let logs_dir = dirs.data_local_dir().join("logs");
    std::fs::create_dir_all(&logs_dir)
        .with_context(|| format!("failed to create log dir: {}", logs_dir.display()))?;
    Ok(logs_dir)
}
