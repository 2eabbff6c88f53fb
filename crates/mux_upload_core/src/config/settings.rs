//! Deployment settings file.
//!
//! Settings are organized into sections that map to TOML tables. Each section
//! can be updated independently.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::plugin::PluginConfig;
use crate::logging::LogLevel;
use crate::models::Secrets;

/// Contents of the settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Plugin-wide defaults and ceilings.
    #[serde(default)]
    pub plugin: PluginConfig,

    /// Per-schema-field overrides, keyed by field name.
    #[serde(default)]
    pub schemas: BTreeMap<String, PluginConfig>,

    /// Mux credentials.
    #[serde(default)]
    pub secrets: Secrets,

    /// Subscriber level.
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Settings {
    /// Look up a schema override by field name.
    pub fn schema(&self, name: &str) -> Option<&PluginConfig> {
        self.schemas.get(name)
    }
}

/// The `[logging]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Level used when `RUST_LOG` is not set.
    #[serde(default)]
    pub level: LogLevel,
}

/// Top-level tables that `ConfigManager::update_section` can rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    Plugin,
    Schemas,
    Secrets,
    Logging,
}

impl ConfigSection {
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Plugin => "plugin",
            ConfigSection::Schemas => "schemas",
            ConfigSection::Secrets => "secrets",
            ConfigSection::Logging => "logging",
        }
    }

    pub fn all() -> &'static [ConfigSection] {
        &[Self::Plugin, Self::Schemas, Self::Secrets, Self::Logging]
    }
}
