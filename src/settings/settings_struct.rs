use std::collections::HashMap;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::RuntimeSettings;
use crate::plugin::StaticPluginResolver;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Settings loaded from the settings file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Values injected into every generated engine config
    pub runtime: RuntimeSettings,
    /// Plugin id to plugin binary path
    pub plugins: HashMap<String, String>,
}

impl Settings {
    /// Create a new settings instance with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from TOML or YAML content.
    ///
    /// Content that parses as a TOML document is read as TOML, anything else
    /// as YAML. The parsed TOML table is deserialized directly.
    pub fn load_from_content(content: &str) -> Result<Self, SettingsError> {
        if let Ok(table) = toml::from_str::<toml::Table>(content) {
            debug!("Reading settings as TOML");
            return Ok(toml::Value::Table(table).try_into()?);
        }

        debug!("Reading settings as YAML");
        let settings: Option<Settings> = serde_yaml::from_str(content)?;
        Ok(settings.unwrap_or_default())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let settings = Self::load_from_content(&content)?;
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Resolver over the configured plugin binaries
    pub fn plugin_resolver(&self) -> StaticPluginResolver {
        StaticPluginResolver::new(self.plugins.clone())
    }
}
