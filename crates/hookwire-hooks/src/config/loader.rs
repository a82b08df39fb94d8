//! Configuration loader for hooks
//!
//! Loads registry settings from YAML files following a hierarchy:
//! Environment → Project → User → Defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{HooksError, Result},
    registry::StoredHookRegistry,
    store::JsonFileStore,
    types::DEFAULT_PRIORITY,
};

/// Directory holding hookwire configuration, relative to a project or home
pub const CONFIG_DIR: &str = ".hookwire";

/// Configuration file name inside [`CONFIG_DIR`]
pub const CONFIG_FILE: &str = "config.yaml";

/// Environment variable overriding the hook file location
pub const STATE_FILE_ENV: &str = "HOOKWIRE_STATE_FILE";

/// Registry settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HooksConfig {
    /// Path of the persisted hook file
    pub state_file: PathBuf,

    /// Priority used when a registration does not name one
    pub default_priority: i64,

    /// Whether the hook file is pretty-printed
    pub pretty: bool,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            state_file: PathBuf::from("hooks.json"),
            default_priority: DEFAULT_PRIORITY,
            pretty: true,
        }
    }
}

impl HooksConfig {
    /// Store for the configured hook file
    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::new(&self.state_file).with_pretty(self.pretty)
    }

    /// Registry hydrated from the configured hook file
    ///
    /// # Errors
    ///
    /// Returns an error if the hook file exists but cannot be read
    pub fn open_registry(&self) -> Result<StoredHookRegistry> {
        Ok(StoredHookRegistry::open(self.store())?.with_default_priority(self.default_priority))
    }
}

/// One configuration file; unset fields leave lower layers in place
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigLayer {
    state_file: Option<PathBuf>,
    default_priority: Option<i64>,
    pretty: Option<bool>,
}

impl ConfigLayer {
    /// Apply this layer; a relative `state_file` is taken from `base_dir`
    fn apply(self, config: &mut HooksConfig, base_dir: &Path) {
        if let Some(path) = self.state_file {
            config.state_file = if path.is_relative() {
                base_dir.join(path)
            } else {
                path
            };
        }
        if let Some(priority) = self.default_priority {
            config.default_priority = priority;
        }
        if let Some(pretty) = self.pretty {
            config.pretty = pretty;
        }
    }
}

/// Configuration loader for hooks
///
/// Later sources override earlier ones field by field:
/// 1. Built-in defaults
/// 2. User configuration (`~/.hookwire/config.yaml`)
/// 3. Project configuration (`.hookwire/config.yaml`)
/// 4. `HOOKWIRE_STATE_FILE`
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for the current directory
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file exists but is invalid.
    pub fn load() -> Result<HooksConfig> {
        Self::load_for_project(Path::new("."))
    }

    /// Load configuration for the project rooted at `project_root`
    pub fn load_for_project(project_root: &Path) -> Result<HooksConfig> {
        let user_path = Self::user_config_path();
        let project_path = project_root.join(CONFIG_DIR).join(CONFIG_FILE);
        let state_override = env::var(STATE_FILE_ENV).ok().filter(|v| !v.is_empty());

        Self::resolve(user_path.as_deref(), &project_path, state_override)
    }

    /// Load defaults overridden by the single file at `path`
    ///
    /// A missing file yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<HooksConfig> {
        let mut config = HooksConfig::default();
        Self::merge_file(&mut config, path)?;
        Ok(config)
    }

    /// `~/.hookwire/config.yaml`, when a home directory is known
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    fn resolve(
        user_path: Option<&Path>,
        project_path: &Path,
        state_override: Option<String>,
    ) -> Result<HooksConfig> {
        let mut config = HooksConfig::default();

        if let Some(user_path) = user_path {
            Self::merge_file(&mut config, user_path)?;
        }
        Self::merge_file(&mut config, project_path)?;

        if let Some(path) = state_override {
            debug!(state_file = %path, "Hook file overridden by environment");
            config.state_file = PathBuf::from(path);
        }

        Ok(config)
    }

    fn merge_file(config: &mut HooksConfig, path: &Path) -> Result<()> {
        // Missing files are skipped, not errors
        if !path.exists() {
            return Ok(());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            HooksError::InvalidConfiguration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::parse_layer(&content)?.apply(config, base_dir);
        debug!(path = %path.display(), "Loaded hook configuration");
        Ok(())
    }

    fn parse_layer(content: &str) -> Result<ConfigLayer> {
        if content.trim().is_empty() {
            return Ok(ConfigLayer::default());
        }
        serde_yaml::from_str(content)
            .map_err(|e| HooksError::InvalidConfiguration(format!("Invalid YAML: {}", e)))
    }

    /// Parse YAML content on top of the defaults
    ///
    /// Relative paths stay relative to the current directory.
    pub fn parse_yaml(content: &str) -> Result<HooksConfig> {
        let mut config = HooksConfig::default();
        Self::parse_layer(content)?.apply(&mut config, Path::new(""));
        Ok(config)
    }
}
