//! Text tracks attached to an upload.
//!
//! A track is either requested from Mux (autogenerated by speech
//! recognition) or supplied by the editor as a file (custom). On the wire
//! both share one object shape discriminated by `type`:
//! `"autogenerated"` selects the first variant, anything else the second.

mod editor;

pub use editor::{
    available_autogenerated_languages, check_add, SequentialTrackIds, TrackEditor,
    TrackIdGenerator, UuidTrackIds,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::languages::LanguageCode;

/// Errors raised while building or validating a text track.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackError {
    #[error("Language '{code}' is not supported for autogenerated subtitles")]
    UnsupportedLanguage { code: String },

    #[error("Custom track '{name}' has no file contents")]
    EmptyFile { name: String },

    #[error("Custom track '{name}' needs a language code")]
    MissingLanguageCode { name: String },

    #[error("An autogenerated track for language '{code}' already exists")]
    DuplicateAutogeneratedLanguage { code: String },

    #[error("Invalid text track type '{value}', expected autogenerated, subtitles or captions")]
    InvalidTrackType { value: String },
}

/// Result type for track operations.
pub type TrackResult<T> = Result<T, TrackError>;

/// Which variant a track is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKind {
    Autogenerated,
    Custom,
}

/// Wire value of the autogenerated discriminator.
pub const AUTOGENERATED_TYPE: &str = "autogenerated";

/// Classify a raw `type` discriminator.
pub fn classify_type(track_type: &str) -> TrackKind {
    if track_type == AUTOGENERATED_TYPE {
        TrackKind::Autogenerated
    } else {
        TrackKind::Custom
    }
}

pub fn classify(track: &UploadTextTrack) -> TrackKind {
    match track {
        UploadTextTrack::Autogenerated(_) => TrackKind::Autogenerated,
        UploadTextTrack::Custom(_) => TrackKind::Custom,
    }
}

/// Kind of a user-supplied track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomTrackType {
    #[default]
    Subtitles,
    /// Subtitles for the deaf or hard of hearing.
    Captions,
}

impl CustomTrackType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Subtitles => "subtitles",
            Self::Captions => "captions",
        }
    }

    pub fn parse(value: &str) -> TrackResult<Self> {
        match value {
            "subtitles" => Ok(Self::Subtitles),
            "captions" => Ok(Self::Captions),
            other => Err(TrackError::InvalidTrackType {
                value: other.to_string(),
            }),
        }
    }

    pub fn is_closed_captions(&self) -> bool {
        matches!(self, Self::Captions)
    }
}

/// Payload descriptor of a custom track file.
///
/// `contents` is an opaque handle supplied by the host (usually the file
/// body or a data URL) and is passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackFile {
    pub contents: String,
    /// MIME type, e.g. `text/vtt`.
    #[serde(rename = "type")]
    pub mime_type: String,
    pub name: String,
    pub size: u64,
}

/// A subtitle track Mux generates with speech recognition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutogeneratedTextTrack {
    pub id: String,
    pub name: String,
    pub language_code: LanguageCode,
}

impl AutogeneratedTextTrack {
    /// Create a track for a registry language, named after the language.
    pub fn new(id: impl Into<String>, language_code: &str) -> TrackResult<Self> {
        let code = LanguageCode::new(language_code).ok_or_else(|| {
            TrackError::UnsupportedLanguage {
                code: language_code.to_string(),
            }
        })?;
        Ok(Self {
            id: id.into(),
            name: code.language().label.to_string(),
            language_code: code,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// A subtitle or caption file supplied by the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomTextTrack {
    pub id: String,
    pub name: String,
    pub kind: CustomTrackType,
    /// BCP 47 tag, not restricted to the registry.
    pub language_code: String,
    pub file: TrackFile,
}

impl CustomTextTrack {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: CustomTrackType,
        language_code: impl Into<String>,
        file: TrackFile,
    ) -> TrackResult<Self> {
        let name = name.into();
        let language_code = language_code.into();

        if file.contents.is_empty() {
            return Err(TrackError::EmptyFile { name });
        }
        if language_code.trim().is_empty() {
            return Err(TrackError::MissingLanguageCode { name });
        }

        Ok(Self {
            id: id.into(),
            name,
            kind,
            language_code,
            file,
        })
    }
}

/// A text track of an upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTextTrack", into = "RawTextTrack")]
pub enum UploadTextTrack {
    Autogenerated(AutogeneratedTextTrack),
    Custom(CustomTextTrack),
}

impl UploadTextTrack {
    pub fn id(&self) -> &str {
        match self {
            Self::Autogenerated(t) => &t.id,
            Self::Custom(t) => &t.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Autogenerated(t) => &t.name,
            Self::Custom(t) => &t.name,
        }
    }

    pub fn language_code(&self) -> &str {
        match self {
            Self::Autogenerated(t) => t.language_code.as_str(),
            Self::Custom(t) => &t.language_code,
        }
    }

    /// The wire discriminator.
    pub fn type_str(&self) -> &'static str {
        match self {
            Self::Autogenerated(_) => AUTOGENERATED_TYPE,
            Self::Custom(t) => t.kind.as_str(),
        }
    }

    pub fn kind(&self) -> TrackKind {
        classify(self)
    }

    pub fn is_autogenerated(&self) -> bool {
        self.kind() == TrackKind::Autogenerated
    }

    pub fn is_custom(&self) -> bool {
        self.kind() == TrackKind::Custom
    }

    pub fn as_autogenerated(&self) -> Option<&AutogeneratedTextTrack> {
        match self {
            Self::Autogenerated(t) => Some(t),
            Self::Custom(_) => None,
        }
    }

    pub fn as_custom(&self) -> Option<&CustomTextTrack> {
        match self {
            Self::Autogenerated(_) => None,
            Self::Custom(t) => Some(t),
        }
    }
}

impl From<AutogeneratedTextTrack> for UploadTextTrack {
    fn from(track: AutogeneratedTextTrack) -> Self {
        Self::Autogenerated(track)
    }
}

impl From<CustomTextTrack> for UploadTextTrack {
    fn from(track: CustomTextTrack) -> Self {
        Self::Custom(track)
    }
}

/// Flat wire shape shared by both variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawTextTrack {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    #[serde(rename = "type")]
    track_type: String,
    language_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file: Option<TrackFile>,
}

impl TryFrom<RawTextTrack> for UploadTextTrack {
    type Error = TrackError;

    fn try_from(raw: RawTextTrack) -> TrackResult<Self> {
        match classify_type(&raw.track_type) {
            TrackKind::Autogenerated => {
                let track = AutogeneratedTextTrack::new(raw.id, &raw.language_code)?;
                Ok(Self::Autogenerated(track.with_name(raw.name)))
            }
            TrackKind::Custom => {
                let kind = CustomTrackType::parse(&raw.track_type)?;
                let file = raw.file.ok_or_else(|| TrackError::EmptyFile {
                    name: raw.name.clone(),
                })?;
                let track = CustomTextTrack::new(raw.id, raw.name, kind, raw.language_code, file)?;
                Ok(Self::Custom(track))
            }
        }
    }
}

impl From<UploadTextTrack> for RawTextTrack {
    fn from(track: UploadTextTrack) -> Self {
        let track_type = track.type_str().to_string();
        match track {
            UploadTextTrack::Autogenerated(t) => Self {
                id: t.id,
                name: t.name,
                track_type,
                language_code: t.language_code.as_str().to_string(),
                file: None,
            },
            UploadTextTrack::Custom(t) => Self {
                id: t.id,
                name: t.name,
                track_type,
                language_code: t.language_code,
                file: Some(t.file),
            },
        }
    }
}

#[cfg(test)]
pub(crate) fn vtt_file(name: &str) -> TrackFile {
    TrackFile {
        contents: "WEBVTT\n\n00:00.000 --> 00:01.000\nHello".to_string(),
        mime_type: "text/vtt".to_string(),
        name: name.to_string(),
        size: 40,
    }
}
