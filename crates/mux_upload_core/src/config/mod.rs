//! Configuration for the upload engine.
//!
//! This module provides:
//! - `PluginConfig`: one layer of developer policy (plugin-wide or per schema field)
//! - `Settings`: the TOML deployment file (plugin, schema overrides, secrets, logging)
//! - `ConfigManager`: atomic loading, saving and section-level updates
//!
//! # Example
//!
//! ```no_run
//! use mux_upload_core::config::{ConfigManager, ConfigSection};
//! use mux_upload_core::models::MaxResolutionTier;
//!
//! let mut config = ConfigManager::new("mux-upload.toml");
//! config.load_or_create().unwrap();
//!
//! config.settings_mut().plugin.max_resolution_tier = Some(MaxResolutionTier::Uhd2160p);
//! config.update_section(ConfigSection::Plugin).unwrap();
//! ```

mod manager;
mod plugin;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use plugin::{PluginConfig, ToolConfig, DEFAULT_TOOL_TITLE};
pub use settings::{ConfigSection, LoggingSettings, Settings};
