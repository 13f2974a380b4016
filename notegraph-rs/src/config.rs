//! Configuration loading and vault path resolution.

use crate::error::{Result, VaultError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable consulted when no `--vault` flag is given.
pub const VAULT_ENV_VAR: &str = "OBSIDIAN_VAULT_PATH";

/// User configuration, read from `<config dir>/notegraph/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default vault root.
    pub vault: Option<PathBuf>,

    /// Folder (relative to the vault root) holding daily notes.
    pub daily_notes_folder: String,

    /// Page size used by `list-notes` when no limit is given.
    pub default_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vault: None,
            daily_notes_folder: "Daily Notes".to_string(),
            default_limit: 50,
        }
    }
}

impl Config {
    /// Location of the config file, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("notegraph").join("config.toml"))
    }

    /// Load the config from the default location. A missing file yields defaults.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load the config from a specific file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Resolve the vault root: explicit flag, then environment, then config file.
    pub fn resolve_vault_path(&self, cli_vault: Option<&Path>) -> Result<PathBuf> {
        let env_vault = std::env::var_os(VAULT_ENV_VAR).map(PathBuf::from);
        self.resolve_vault_path_with(cli_vault, env_vault)
    }

    fn resolve_vault_path_with(
        &self,
        cli_vault: Option<&Path>,
        env_vault: Option<PathBuf>,
    ) -> Result<PathBuf> {
        if let Some(path) = cli_vault {
            return Ok(path.to_path_buf());
        }
        if let Some(path) = env_vault.filter(|p| !p.as_os_str().is_empty()) {
            return Ok(path);
        }
        self.vault.clone().ok_or_else(|| {
            VaultError::ConfigError(format!(
                "no vault specified: pass --vault, set {}, or add `vault = \"...\"` to the config file",
                VAULT_ENV_VAR
            ))
        })
    }
}
