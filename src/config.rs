use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub(crate) const CONFIG_DIR_VAR: &str = "FINTRACK_CONFIG_DIR";
pub(crate) const DATA_DIR_VAR: &str = "FINTRACK_DATA_DIR";
pub(crate) const LOG_VAR: &str = "FINTRACK_LOG";

const SETTINGS_FILE: &str = "settings.json";
const DB_FILE: &str = "fintrack.db";
const LOG_FILE: &str = "fintrack.log";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Settings {
    /// Overrides the platform data directory.
    #[serde(default)]
    pub data_dir: Option<String>,
    #[serde(default = "default_export_file_name")]
    pub export_file_name: String,
    #[serde(default)]
    pub strict_import: bool,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_export_file_name() -> String {
    "SimpleFinanceTrackerUserData.json".to_string()
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: None,
            export_file_name: default_export_file_name(),
            strict_import: false,
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    /// A missing file is the defaults. A malformed one is an error the
    /// caller may downgrade to a warning.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Malformed settings: {}", path.display()))
    }
}

/// Everything resolved at startup: settings plus the directories in use.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub settings: Settings,
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
    pub download_dir: PathBuf,
    /// Problems found while resolving, logged once logging is up.
    pub warnings: Vec<String>,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        Self::resolve(|name| std::env::var(name).ok().filter(|v| !v.is_empty()))
    }

    fn resolve(env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let proj_dirs = directories::ProjectDirs::from("com", "fintrack", "fintrack");

        let config_dir = match env(CONFIG_DIR_VAR) {
            Some(dir) => PathBuf::from(dir),
            None => proj_dirs
                .as_ref()
                .map(|d| d.config_dir().to_path_buf())
                .ok_or_else(|| anyhow!("Could not determine config directory"))?,
        };
        let mut warnings = Vec::new();
        let mut settings = Settings::load(&config_dir.join(SETTINGS_FILE)).unwrap_or_else(|e| {
            warnings.push(format!("{e:#}, using defaults"));
            Settings::default()
        });

        let data_dir = match env(DATA_DIR_VAR).or_else(|| settings.data_dir.clone()) {
            Some(dir) => PathBuf::from(dir),
            None => proj_dirs
                .as_ref()
                .map(|d| d.data_dir().to_path_buf())
                .ok_or_else(|| anyhow!("Could not determine data directory"))?,
        };

        let download_dir = directories::UserDirs::new()
            .and_then(|d| {
                d.download_dir()
                    .map(Path::to_path_buf)
                    .or_else(|| Some(d.home_dir().to_path_buf()))
            })
            .unwrap_or_else(|| PathBuf::from("."));

        if let Some(filter) = env(LOG_VAR) {
            settings.log_filter = filter;
        }

        Ok(Self {
            settings,
            config_dir,
            data_dir,
            download_dir,
            warnings,
        })
    }

    /// Create the data directory and return the database path inside it.
    pub(crate) fn db_path(&self) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.data_dir).with_context(|| {
            format!("Failed to create data directory: {}", self.data_dir.display())
        })?;
        Ok(self.data_dir.join(DB_FILE))
    }

    pub(crate) fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }

    pub(crate) fn default_export_path(&self) -> PathBuf {
        self.download_dir.join(&self.settings.export_file_name)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
