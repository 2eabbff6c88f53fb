//! Asset creation request built from a finalized configuration.
//!
//! Field names and enum values follow the Mux `new_asset_settings` object,
//! so the serialized form can be posted as is.

use serde::Serialize;

use crate::models::{EncodingTier, MaxResolutionTier, Mp4Support, UploadConfig, UploadSource};
use crate::tracks::{AutogeneratedTextTrack, CustomTextTrack};

/// Kind of an input entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Video,
    Audio,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackPolicy {
    Public,
    Signed,
}

/// Subtitle track Mux should generate for the main input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedSubtitles {
    pub name: String,
    pub language_code: String,
}

impl From<&AutogeneratedTextTrack> for GeneratedSubtitles {
    fn from(track: &AutogeneratedTextTrack) -> Self {
        Self {
            name: track.name.clone(),
            language_code: track.language_code.as_str().to_string(),
        }
    }
}

/// One entry of `input`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetInput {
    #[serde(rename = "type")]
    pub input_type: InputType,

    /// Remote location. Set for URL uploads, and by the transport for text
    /// tracks once their file is hosted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub generated_subtitles: Vec<GeneratedSubtitles>,

    /// Only `subtitles` is accepted by the remote API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_type: Option<&'static str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_captions: Option<bool>,
}

impl AssetInput {
    fn video(generated_subtitles: Vec<GeneratedSubtitles>) -> Self {
        Self {
            input_type: InputType::Video,
            url: None,
            generated_subtitles,
            text_type: None,
            language_code: None,
            name: None,
            closed_captions: None,
        }
    }

    fn text(track: &CustomTextTrack) -> Self {
        Self {
            input_type: InputType::Text,
            url: None,
            generated_subtitles: Vec::new(),
            text_type: Some("subtitles"),
            language_code: Some(track.language_code.clone()),
            name: Some(track.name.clone()),
            closed_captions: Some(track.kind.is_closed_captions()),
        }
    }
}

/// Body of the asset creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewAssetSettings {
    pub input: Vec<AssetInput>,
    pub playback_policy: Vec<PlaybackPolicy>,
    pub encoding_tier: EncodingTier,
    pub max_resolution_tier: MaxResolutionTier,
    pub mp4_support: Mp4Support,
    pub normalize_audio: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub passthrough: Option<String>,
}

impl NewAssetSettings {
    /// Build the request body. The main video input comes first and carries
    /// every autogenerated track; each custom track follows as a text input.
    pub fn from_config(config: &UploadConfig) -> Self {
        let generated = config
            .autogenerated_tracks()
            .map(GeneratedSubtitles::from)
            .collect();

        let mut input = vec![AssetInput::video(generated)];
        input.extend(config.custom_tracks().map(AssetInput::text));

        let playback_policy = if config.signed {
            PlaybackPolicy::Signed
        } else {
            PlaybackPolicy::Public
        };

        Self {
            input,
            playback_policy: vec![playback_policy],
            encoding_tier: config.encoding_tier,
            max_resolution_tier: config.effective_max_resolution_tier(),
            mp4_support: config.effective_mp4_support(),
            normalize_audio: config.normalize_audio,
            passthrough: None,
        }
    }

    /// Like [`from_config`](Self::from_config), pointing the video input at
    /// the source URL for URL uploads.
    pub fn for_upload(config: &UploadConfig, source: &UploadSource) -> Self {
        let mut settings = Self::from_config(config);
        if let (UploadSource::Url { url }, Some(video)) = (source, settings.input.first_mut()) {
            video.url = Some(url.clone());
        }
        settings
    }

    pub fn with_passthrough(mut self, passthrough: impl Into<String>) -> Self {
        self.passthrough = Some(passthrough.into());
        self
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
