//! Reading and writing the settings file.
//!
//! A full save regenerates the file under a fixed header. Targeted updates
//! (`update_section`, `update_schema`) edit the existing document through
//! `toml_edit`, so hand-written comments elsewhere in the file survive.
//! Every write goes to a sibling `*.toml.tmp` file that is then renamed over
//! the real one.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use toml_edit::{DocumentMut, Item, Table};

use super::plugin::PluginConfig;
use super::settings::{ConfigSection, Settings};
use crate::resolve::{BuiltInDefaults, UploadCeiling};

const HEADER: &str = "\
# Mux upload settings
#
# [plugin]           plugin-wide defaults and ceilings
#   encoding_tier = \"smart\" | \"baseline\"
#   max_resolution_tier = \"1080p\" | \"1440p\" | \"2160p\"
#   mp4_support = \"none\" | \"standard\"
#   normalize_audio, default_signed, disable_upload_config,
#   disable_text_track_config = true | false
#   default_autogenerated_subtitle_langs = [\"en\", ...]
# [schemas.<field>]  per-field overrides, same keys as [plugin]
# [secrets]          Mux credentials
# [logging]          level = \"info\"

";

/// Settings file failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid settings in {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Cannot encode settings: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("Settings file is not valid TOML: {0}")]
    Document(#[from] toml_edit::TomlError),

    #[error("Settings file {0} does not exist")]
    NotFound(PathBuf),

    #[error("No schema override named '{0}' in [schemas]")]
    UnknownSchema(String),
}

impl ConfigError {
    fn io(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Owns the in-memory `Settings` and the file they came from.
#[derive(Debug)]
pub struct ConfigManager {
    path: PathBuf,
    settings: Settings,
}

impl ConfigManager {
    /// Starts with default settings. Nothing is read until `load` or
    /// `load_or_create`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            settings: Settings::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Changes stay in memory until `save`, `update_section` or
    /// `update_schema`.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Schema override by name.
    pub fn schema(&self, name: &str) -> ConfigResult<&PluginConfig> {
        self.settings
            .schema(name)
            .ok_or_else(|| ConfigError::UnknownSchema(name.to_string()))
    }

    /// Read the settings file. Fails with `NotFound` if there is none.
    pub fn load(&mut self) -> ConfigResult<()> {
        self.read().map(|_| ())
    }

    /// Read the settings file, or write one with defaults if it is missing.
    /// Tables this version does not know are removed from the file.
    pub fn load_or_create(&mut self) -> ConfigResult<()> {
        if !self.path.exists() {
            self.settings = Settings::default();
            self.save()?;
            tracing::info!("Wrote default settings to {}", self.path.display());
            return Ok(());
        }

        let unknown = self.read()?;
        if !unknown.is_empty() {
            tracing::info!(
                "Removing unknown tables from {}: {}",
                self.path.display(),
                unknown.join(", ")
            );
            self.save()?;
        }
        Ok(())
    }

    /// Replace the whole file with the in-memory settings.
    pub fn save(&self) -> ConfigResult<()> {
        let mut content = String::from(HEADER);
        content.push_str(&toml::to_string_pretty(&self.settings)?);
        self.write_atomically(&content)
    }

    /// Write one top-level table, leaving the rest of the file untouched.
    pub fn update_section(&mut self, section: ConfigSection) -> ConfigResult<()> {
        let table = match section {
            ConfigSection::Plugin => to_table(&self.settings.plugin)?,
            ConfigSection::Schemas => to_table(&self.settings.schemas)?,
            ConfigSection::Secrets => to_table(&self.settings.secrets)?,
            ConfigSection::Logging => to_table(&self.settings.logging)?,
        };

        let mut doc = self.read_document()?;
        doc[section.table_name()] = Item::Table(table);
        self.write_atomically(&doc.to_string())
    }

    /// Write a single `[schemas.<name>]` table. Other schema overrides keep
    /// their on-disk form.
    pub fn update_schema(&mut self, name: &str) -> ConfigResult<()> {
        let table = to_table(self.schema(name)?)?;

        let mut doc = self.read_document()?;
        insert_schema(&mut doc, name, table);
        self.write_atomically(&doc.to_string())
    }

    /// Schema overrides that ask for more than the plugin allows. They still
    /// load; the resolver clamps them.
    pub fn schemas_above_ceiling(&self) -> Vec<&str> {
        let ceiling = UploadCeiling::from_plugin(&self.settings.plugin, &BuiltInDefaults::default());

        self.settings
            .schemas
            .iter()
            .filter(|(_, layer)| {
                let resolution_too_high = layer
                    .max_resolution_tier
                    .is_some_and(|tier| !ceiling.allows_resolution(tier));
                let mp4_not_allowed = layer
                    .mp4_support
                    .is_some_and(|mp4| mp4.is_enabled() && !ceiling.mp4_support_allowed);
                resolution_too_high || mp4_not_allowed
            })
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Load the file into memory and return the unknown top-level tables.
    fn read(&mut self) -> ConfigResult<Vec<String>> {
        if !self.path.exists() {
            return Err(ConfigError::NotFound(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path).map_err(ConfigError::io(&self.path))?;
        let settings: Settings = toml::from_str(&content).map_err(|source| ConfigError::Invalid {
            path: self.path.clone(),
            source,
        })?;
        let doc: DocumentMut = content.parse()?;
        let unknown = unknown_tables(&doc);

        self.settings = settings;
        for name in self.schemas_above_ceiling() {
            tracing::warn!(
                "Schema override '{}' exceeds the plugin ceiling and will be clamped",
                name
            );
        }
        tracing::debug!("Loaded settings from {}", self.path.display());
        Ok(unknown)
    }

    fn read_document(&self) -> ConfigResult<DocumentMut> {
        if !self.path.exists() {
            return Ok(DocumentMut::new());
        }
        let content = fs::read_to_string(&self.path).map_err(ConfigError::io(&self.path))?;
        Ok(content.parse()?)
    }

    fn write_atomically(&self, content: &str) -> ConfigResult<()> {
        let tmp = self.path.with_extension("toml.tmp");

        let write = || -> io::Result<()> {
            if let Some(dir) = self.path.parent() {
                fs::create_dir_all(dir)?;
            }
            let mut file = fs::File::create(&tmp)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp, &self.path)
        };

        write().map_err(ConfigError::io(&self.path))
    }
}

/// Serialize a value into a standalone TOML table.
fn to_table<T: Serialize + ?Sized>(value: &T) -> ConfigResult<Table> {
    let doc: DocumentMut = toml::to_string_pretty(value)?.parse()?;
    Ok(doc.as_table().clone())
}

/// Put `schema` under `[schemas.<name>]`. A missing `[schemas]` table is
/// created implicitly, and an inline `schemas = { ... }` is expanded, since a
/// sub-table cannot be written inside an inline table.
fn insert_schema(doc: &mut DocumentMut, name: &str, schema: Table) {
    let key = ConfigSection::Schemas.table_name();
    let mut schemas = match doc.remove(key) {
        Some(Item::Table(table)) => table,
        other => {
            let mut table = other
                .and_then(|item| item.into_table().ok())
                .unwrap_or_default();
            table.set_implicit(true);
            table
        }
    };
    schemas.insert(name, Item::Table(schema));
    doc.insert(key, Item::Table(schemas));
}

fn unknown_tables(doc: &DocumentMut) -> Vec<String> {
    doc.iter()
        .map(|(key, _)| key)
        .filter(|key| !ConfigSection::all().iter().any(|s| s.table_name() == *key))
        .map(str::to_string)
        .collect()
}
