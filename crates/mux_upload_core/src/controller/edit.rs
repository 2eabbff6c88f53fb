//! Field edits accepted by the controller.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::models::{EncodingTier, MaxResolutionTier, Mp4Support, ParseEnumError};

/// Editable scalar fields of `UploadConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    Filename,
    EncodingTier,
    MaxResolutionTier,
    Mp4Support,
    NormalizeAudio,
    Signed,
}

impl ConfigField {
    /// Name as used in the serialized config.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Filename => "filename",
            Self::EncodingTier => "encoding_tier",
            Self::MaxResolutionTier => "max_resolution_tier",
            Self::Mp4Support => "mp4_support",
            Self::NormalizeAudio => "normalize_audio",
            Self::Signed => "signed",
        }
    }

    pub fn all() -> &'static [ConfigField] {
        &[
            Self::Filename,
            Self::EncodingTier,
            Self::MaxResolutionTier,
            Self::Mp4Support,
            Self::NormalizeAudio,
            Self::Signed,
        ]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.as_str() == name)
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single-field change requested by the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    Filename(String),
    EncodingTier(EncodingTier),
    MaxResolutionTier(MaxResolutionTier),
    Mp4Support(Mp4Support),
    NormalizeAudio(bool),
    Signed(bool),
}

impl FieldEdit {
    pub fn field(&self) -> ConfigField {
        match self {
            Self::Filename(_) => ConfigField::Filename,
            Self::EncodingTier(_) => ConfigField::EncodingTier,
            Self::MaxResolutionTier(_) => ConfigField::MaxResolutionTier,
            Self::Mp4Support(_) => ConfigField::Mp4Support,
            Self::NormalizeAudio(_) => ConfigField::NormalizeAudio,
            Self::Signed(_) => ConfigField::Signed,
        }
    }

    /// The new value, formatted for logs.
    pub fn value_string(&self) -> String {
        match self {
            Self::Filename(name) => name.clone(),
            Self::EncodingTier(v) => v.to_string(),
            Self::MaxResolutionTier(v) => v.to_string(),
            Self::Mp4Support(v) => v.to_string(),
            Self::NormalizeAudio(v) | Self::Signed(v) => v.to_string(),
        }
    }

    /// Parse a value for a named field.
    pub fn parse(name: &str, value: &str) -> Result<Self, FieldEditParseError> {
        let field = ConfigField::from_name(name)
            .ok_or_else(|| FieldEditParseError::UnknownField(name.to_string()))?;

        let edit = match field {
            ConfigField::Filename => Self::Filename(value.to_string()),
            ConfigField::EncodingTier => Self::EncodingTier(parse_enum(field, value)?),
            ConfigField::MaxResolutionTier => Self::MaxResolutionTier(parse_enum(field, value)?),
            ConfigField::Mp4Support => Self::Mp4Support(parse_enum(field, value)?),
            ConfigField::NormalizeAudio => Self::NormalizeAudio(parse_bool(field, value)?),
            ConfigField::Signed => Self::Signed(parse_bool(field, value)?),
        };
        Ok(edit)
    }
}

fn parse_enum<T>(field: ConfigField, value: &str) -> Result<T, FieldEditParseError>
where
    T: FromStr<Err = ParseEnumError>,
{
    value
        .parse::<T>()
        .map_err(|e| FieldEditParseError::invalid(field, value, e.to_string()))
}

fn parse_bool(field: ConfigField, value: &str) -> Result<bool, FieldEditParseError> {
    match value {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(FieldEditParseError::invalid(
            field,
            value,
            "expected true or false",
        )),
    }
}

/// Parses `name=value`.
impl FromStr for FieldEdit {
    type Err = FieldEditParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = s
            .split_once('=')
            .ok_or_else(|| FieldEditParseError::Malformed(s.to_string()))?;
        Self::parse(name.trim(), value.trim())
    }
}

/// A `name=value` edit could not be understood.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldEditParseError {
    #[error("expected FIELD=VALUE, got '{0}'")]
    Malformed(String),

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("invalid value '{value}' for {field}: {reason}")]
    InvalidValue {
        field: ConfigField,
        value: String,
        reason: String,
    },
}

impl FieldEditParseError {
    fn invalid(field: ConfigField, value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
