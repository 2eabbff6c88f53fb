//! The working upload configuration and the staged source it belongs to.

use serde::{Deserialize, Serialize};

use super::enums::{EncodingTier, MaxResolutionTier, Mp4Support};
use crate::tracks::{AutogeneratedTextTrack, CustomTextTrack, UploadTextTrack};

/// Configuration for one upload attempt.
///
/// Created by the resolver, edited through the controller while the dialog is
/// open, and handed to the transport exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadConfig {
    pub encoding_tier: EncodingTier,
    /// Only meaningful under the smart tier.
    pub max_resolution_tier: MaxResolutionTier,
    /// Only meaningful under the smart tier.
    pub mp4_support: Mp4Support,
    pub normalize_audio: bool,
    pub signed: bool,
    /// Tracks in authoring order.
    #[serde(default)]
    pub text_tracks: Vec<UploadTextTrack>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl UploadConfig {
    /// Resolution tier the transport should request. Baseline assets are
    /// always 1080p regardless of what is stored.
    pub fn effective_max_resolution_tier(&self) -> MaxResolutionTier {
        match self.encoding_tier {
            EncodingTier::Smart => self.max_resolution_tier,
            EncodingTier::Baseline => MaxResolutionTier::Fhd1080p,
        }
    }

    /// MP4 support the transport should request. Baseline assets never get
    /// static renditions.
    pub fn effective_mp4_support(&self) -> Mp4Support {
        match self.encoding_tier {
            EncodingTier::Smart => self.mp4_support,
            EncodingTier::Baseline => Mp4Support::None,
        }
    }

    pub fn autogenerated_tracks(&self) -> impl Iterator<Item = &AutogeneratedTextTrack> {
        self.text_tracks.iter().filter_map(UploadTextTrack::as_autogenerated)
    }

    pub fn custom_tracks(&self) -> impl Iterator<Item = &CustomTextTrack> {
        self.text_tracks.iter().filter_map(UploadTextTrack::as_custom)
    }

    /// Whether an autogenerated track for `code` is already requested.
    pub fn has_autogenerated_language(&self, code: &str) -> bool {
        self.autogenerated_tracks()
            .any(|t| t.language_code.as_str() == code)
    }

    /// The filename with surrounding whitespace removed, if anything is left.
    pub fn trimmed_filename(&self) -> Option<&str> {
        self.filename
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// File metadata of a staged local upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub name: String,
    /// Size in bytes.
    pub size: u64,
}

/// What the editor picked to upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum UploadSource {
    File { file: SourceFile },
    Url { url: String },
}

impl UploadSource {
    pub fn file(name: impl Into<String>, size: u64) -> Self {
        Self::File {
            file: SourceFile {
                name: name.into(),
                size,
            },
        }
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self::Url { url: url.into() }
    }

    /// Headline shown in the "file to upload" card.
    pub fn display_name(&self) -> &str {
        match self {
            Self::File { file } => &file.name,
            Self::Url { url } => url,
        }
    }

    /// Secondary line shown under the headline.
    pub fn description(&self) -> String {
        match self {
            Self::File { file } => format!("Direct File Upload ({})", format_bytes(file.size)),
            Self::Url { .. } => "File From URL (Unknown size)".to_string(),
        }
    }

    /// Local files need a display name before they can be uploaded. Remote
    /// URLs are named by the platform.
    pub fn requires_display_name(&self) -> bool {
        matches!(self, Self::File { .. })
    }

    /// Initial value of `UploadConfig::filename`.
    pub fn default_filename(&self) -> Option<String> {
        match self {
            Self::File { file } => Some(file.name.clone()),
            Self::Url { .. } => None,
        }
    }
}

/// Human readable byte count using binary units, e.g. `1.5 MiB`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["KiB", "MiB", "GiB", "TiB", "PiB"];
    const THRESHOLD: f64 = 1024.0;

    if (bytes as f64) < THRESHOLD {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    loop {
        value /= THRESHOLD;
        if value < THRESHOLD || unit == UNITS.len() - 1 {
            break;
        }
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}
