//! Configuration file support.
//!
//! Lookup order: the `--config` path, `./sociogram.toml`, then
//! `<config_dir>/sociogram/config.toml`. The first file found wins; with
//! none, defaults apply. An explicit `--config` path must exist.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sociogram_core::LoadOptions;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name searched in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "sociogram.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub load: LoadOptions,
    #[serde(default)]
    pub scc: SccConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// `pretty`, `text` or `json`. Unknown values are ignored.
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SccConfig {
    /// Components smaller than this are not listed by `sg scc`.
    #[serde(default = "default_min_size")]
    pub min_size: usize,
}

impl Default for SccConfig {
    fn default() -> Self {
        Self {
            min_size: default_min_size(),
        }
    }
}

const fn default_min_size() -> usize {
    1
}

/// Where the user-level config file lives, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sociogram/config.toml"))
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<Config>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Pick the config file to use, without reading it.
fn locate_config(
    explicit: Option<&Path>,
    working_dir: &Path,
    user_path: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let local = working_dir.join(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    user_path.filter(|path| path.exists())
}

/// Load the effective configuration.
///
/// # Errors
///
/// Returns an error if the chosen file cannot be read or is not valid TOML
/// for [`Config`], including when an explicit path does not exist.
pub fn load_config(explicit: Option<&Path>, working_dir: &Path) -> Result<Config> {
    match locate_config(explicit, working_dir, user_config_path()) {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            read_config(&path)
        }
        None => Ok(Config::default()),
    }
}
