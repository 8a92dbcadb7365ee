// SPDX-License-Identifier: MIT OR Apache-2.0

//! On-disk CLI configuration (`config.toml`)

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Default tracing filter when neither `--debug` nor `RUST_LOG` is set
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub default_red_name: Option<String>,
    #[serde(default)]
    pub default_blue_name: Option<String>,
    /// Base directory for relative save/record filenames
    #[serde(default)]
    pub save_dir: Option<PathBuf>,
    #[serde(default = "default_show_legend")]
    pub show_legend: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_show_legend() -> bool {
    true
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            default_red_name: None,
            default_blue_name: None,
            save_dir: None,
            show_legend: default_show_legend(),
        }
    }
}

impl CliConfig {
    /// Resolve a user-supplied filename against `save_dir`
    pub fn resolve(&self, file: &str) -> PathBuf {
        let path = Path::new(file);
        match &self.save_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("io", "jungle", "jungle")
        .context("Failed to determine config directory")?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Load the config at `path`, or the default location when `None`.
///
/// A missing file is created with default contents.
pub fn load_config(path: Option<&Path>) -> Result<CliConfig> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => get_config_path().context("Failed to determine config path")?,
    };

    if !config_path.exists() {
        tracing::info!("Config file not found, creating default at: {}", config_path.display());

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let default_config = CliConfig::default();
        let toml_content =
            toml::to_string_pretty(&default_config).context("Failed to serialize default config")?;
        fs::write(&config_path, toml_content).context("Failed to write default config file")?;
        return Ok(default_config);
    }

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

    toml::from_str::<CliConfig>(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
}
