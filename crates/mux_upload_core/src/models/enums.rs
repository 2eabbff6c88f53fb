//! Core enums shared by the resolver, the controller and the request builder.
//!
//! Serialized values are the literal strings of the Mux asset API.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A string did not name any variant of a config enum.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind} '{value}', expected one of: {expected}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

impl ParseEnumError {
    fn new<T: AsRef<str>>(kind: &'static str, value: &str, all: impl IntoIterator<Item = T>) -> Self {
        let expected = all
            .into_iter()
            .map(|v| v.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            kind,
            value: value.to_string(),
            expected,
        }
    }
}

/// Processing tier for an asset. Controls cost, quality and which features
/// (resolution tiers, static renditions) are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingTier {
    #[default]
    Smart,
    Baseline,
}

impl EncodingTier {
    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Smart => "smart",
            Self::Baseline => "baseline",
        }
    }

    /// Label shown next to the radio button.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Smart => "Smart",
            Self::Baseline => "Baseline",
        }
    }

    /// Get all tiers in display order.
    pub fn all() -> &'static [EncodingTier] {
        &[Self::Smart, Self::Baseline]
    }

    pub fn is_smart(&self) -> bool {
        matches!(self, Self::Smart)
    }
}

impl std::fmt::Display for EncodingTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EncodingTier {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                ParseEnumError::new("encoding tier", s, Self::all().iter().map(|t| t.as_str()))
            })
    }
}

/// Maximum resolution an asset is encoded, stored and streamed at.
///
/// Variants are declared in ascending order, so the derived `Ord` can be
/// used to compare a requested tier against a ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum MaxResolutionTier {
    #[default]
    #[serde(rename = "1080p")]
    Fhd1080p,
    #[serde(rename = "1440p")]
    Qhd1440p,
    #[serde(rename = "2160p")]
    Uhd2160p,
}

impl MaxResolutionTier {
    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fhd1080p => "1080p",
            Self::Qhd1440p => "1440p",
            Self::Uhd2160p => "2160p",
        }
    }

    /// Label for the resolution picker.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fhd1080p => "1080p",
            Self::Qhd1440p => "1440p (2k)",
            Self::Uhd2160p => "2160p (4k)",
        }
    }

    /// Get all tiers, lowest first.
    pub fn all() -> &'static [MaxResolutionTier] {
        &[Self::Fhd1080p, Self::Qhd1440p, Self::Uhd2160p]
    }

    /// Tiers that fit under `ceiling`, lowest first.
    pub fn up_to(ceiling: MaxResolutionTier) -> impl Iterator<Item = MaxResolutionTier> {
        Self::all().iter().copied().filter(move |t| *t <= ceiling)
    }
}

impl std::fmt::Display for MaxResolutionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MaxResolutionTier {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                ParseEnumError::new(
                    "max resolution tier",
                    s,
                    Self::all().iter().map(|t| t.as_str()),
                )
            })
    }
}

/// Static MP4 rendition support (downloadable file variant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mp4Support {
    #[default]
    None,
    Standard,
}

impl Mp4Support {
    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Standard => "standard",
        }
    }

    pub fn all() -> &'static [Mp4Support] {
        &[Self::None, Self::Standard]
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Standard)
    }
}

impl std::fmt::Display for Mp4Support {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Mp4Support {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| {
                ParseEnumError::new("mp4 support", s, Self::all().iter().map(|m| m.as_str()))
            })
    }
}
