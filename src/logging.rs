use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Where log lines go for this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LogTarget {
    Stderr,
    /// Append to the log file; stderr would draw over the dashboard.
    File,
}

pub(crate) fn init(config: &Config, target: LogTarget) -> Result<()> {
    let filter = EnvFilter::try_new(&config.settings.log_filter)
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).init(),
        LogTarget::File => {
            let file = open_log(&config.log_path())?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
    }

    tracing::debug!(
        config_dir = %config.config_dir.display(),
        data_dir = %config.data_dir.display(),
        "paths resolved"
    );
    for warning in &config.warnings {
        tracing::warn!("{warning}");
    }
    Ok(())
}

fn open_log(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
}
