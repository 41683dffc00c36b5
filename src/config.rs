//! Configuration file parsing (`~/.stackgen/config.toml`).
//!
//! Every field has a default, so a missing file or a partial file is fine.
//!
//! ```toml
//! [project]
//! root = "~/projects"
//!
//! [tools]
//! package_manager = "npm"
//! strict_stderr = false
//! ```

use crate::error::{Result, ScaffoldError};
use crate::process::PackageManager;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable pointing at an alternative config file.
pub const CONFIG_ENV: &str = "STACKGEN_CONFIG";

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct StackgenConfig {
    pub project: ProjectConfig,
    pub tools: ToolsConfig,
    pub title: TitleConfig,
    pub docker: DockerConfig,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct ProjectConfig {
    /// Parent directory for new projects. Falls back to the current directory.
    pub root: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ToolsConfig {
    pub package_manager: PackageManager,
    /// Treat any stderr output from a tool as a failure.
    pub strict_stderr: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            package_manager: PackageManager::Yarn,
            strict_stderr: true,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct TitleConfig {
    pub word_list: PathBuf,
    pub max_attempts: usize,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            word_list: PathBuf::from("/usr/share/dict/words"),
            max_attempts: 10,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DockerConfig {
    pub node_image: String,
    pub python_image: String,
    pub postgres_image: String,
    /// Install `react-scripts` and `sass` globally in the React image.
    pub install_global_tools: bool,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            node_image: "node:14".to_string(),
            python_image: "python:3.9-slim".to_string(),
            postgres_image: "postgres:13".to_string(),
            install_global_tools: true,
        }
    }
}

impl StackgenConfig {
    /// Default project location, with a leading `~/` expanded.
    pub fn default_location(&self) -> PathBuf {
        match &self.project.root {
            Some(root) => expand_home(root),
            None => PathBuf::from("."),
        }
    }
}

/// `$STACKGEN_CONFIG`, or `~/.stackgen/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(".stackgen").join("config.toml"))
}

/// Load the config from its default path. A missing file yields defaults.
pub fn load_config() -> Result<StackgenConfig> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => Ok(StackgenConfig::default()),
    }
}

pub fn load_config_from(path: &Path) -> Result<StackgenConfig> {
    if !path.exists() {
        tracing::debug!("no config at {}, using defaults", path.display());
        return Ok(StackgenConfig::default());
    }
    let raw = fs::read_to_string(path)
        .map_err(|e| ScaffoldError::io(format!("Failed to read {}", path.display()), e))?;
    toml::from_str(&raw)
        .map_err(|e| ScaffoldError::Config(format!("{}: {}", path.display(), e)))
}

fn expand_home(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(raw)
}
