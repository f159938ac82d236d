use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing::warn;

use shelf::config::{project_dirs, AppConfig};
use shelf::logging;

mod app;
mod ui;

fn main() {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    logging::init(&config.log_filter);
    if let Some(err) = config_error {
        warn!(%err, "falling back to default config");
    }

    let mut desktop_cfg = dioxus::desktop::Config::new()
        .with_window(dioxus::desktop::WindowBuilder::new().with_title("Shelf"));
    match default_webview_data_dir() {
        Ok(dir) => desktop_cfg = desktop_cfg.with_data_directory(dir),
        Err(err) => warn!(error = %format!("{err:#}"), "using default webview data directory"),
    }

    dioxus::LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(config)
        .launch(app::App);
}

fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

fn default_webview_data_dir() -> Result<PathBuf> {
    let dirs = project_dirs().ok_or_else(|| anyhow!("unable to resolve data directory"))?;
    ensure_webview_data_dir(dirs.data_local_dir())
}
