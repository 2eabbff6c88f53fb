//! Developer-declared plugin configuration.
//!
//! The same shape is used for the plugin-wide config and for per-schema-field
//! overrides. Every field is optional so that a layer only overrides what it
//! actually sets.

use serde::{Deserialize, Serialize};

use crate::languages::LanguageCode;
use crate::models::{EncodingTier, MaxResolutionTier, Mp4Support};

/// Default title of the videos browser in the studio navigation.
pub const DEFAULT_TOOL_TITLE: &str = "Videos";

/// One configuration layer.
///
/// Keys are snake_case; the camelCase names used by the JavaScript plugin
/// config are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Static renditions. Acts as a ceiling when set on the plugin: `none`
    /// hides the option from editors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mp4_support: Option<Mp4Support>,

    /// Highest resolution editors may pick. Acts as a ceiling when set on
    /// the plugin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_resolution_tier: Option<MaxResolutionTier>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding_tier: Option<EncodingTier>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalize_audio: Option<bool>,

    /// Start new uploads with signed playback.
    #[serde(alias = "defaultSigned", skip_serializing_if = "Option::is_none")]
    pub default_signed: Option<bool>,

    /// Request autogenerated subtitles for these languages on every upload.
    #[serde(
        alias = "defaultAutogeneratedSubtitleLangs",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_autogenerated_subtitle_langs: Option<Vec<LanguageCode>>,

    /// Skip the configuration dialog and upload with the resolved settings.
    #[serde(alias = "disableUploadConfig", skip_serializing_if = "Option::is_none")]
    pub disable_upload_config: Option<bool>,

    /// Hide the text track editor.
    #[serde(alias = "disableTextTrackConfig", skip_serializing_if = "Option::is_none")]
    pub disable_text_track_config: Option<bool>,

    /// Studio tool visibility. Only read from the plugin-wide config.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<ToolConfig>,
}

/// How the videos browser appears as a studio tool.
///
/// `false` removes it, `true` or a table keeps it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolConfig {
    Enabled(bool),
    Custom {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        /// Icon name understood by the studio.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
    },
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self::Enabled(true)
    }
}

impl ToolConfig {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Enabled(false))
    }

    /// Navigation title, or `None` if the tool is disabled.
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Enabled(false) => None,
            Self::Enabled(true) | Self::Custom { title: None, .. } => Some(DEFAULT_TOOL_TITLE),
            Self::Custom { title: Some(title), .. } => Some(title),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_layer_sets_nothing() {
        let layer: PluginConfig = toml::from_str("").unwrap();
        assert_eq!(layer, PluginConfig::default());
    }

    #[test]
    fn parses_camel_case_aliases() {
        let layer: PluginConfig = serde_json::from_str(
            r#"{
                "max_resolution_tier": "2160p",
                "defaultSigned": true,
                "disableUploadConfig": true,
                "defaultAutogeneratedSubtitleLangs": ["en", "de"]
            }"#,
        )
        .unwrap();
        assert_eq!(layer.max_resolution_tier, Some(MaxResolutionTier::Uhd2160p));
        assert_eq!(layer.default_signed, Some(true));
        assert_eq!(layer.disable_upload_config, Some(true));
        let langs = layer.default_autogenerated_subtitle_langs.unwrap();
        assert_eq!(langs.len(), 2);
        assert_eq!(langs[1].as_str(), "de");
    }

    #[test]
    fn rejects_unsupported_default_language() {
        let res = toml::from_str::<PluginConfig>(r#"default_autogenerated_subtitle_langs = ["xx"]"#);
        assert!(res.is_err());
    }

    #[test]
    fn tool_accepts_bool_or_table() {
        let off: PluginConfig = toml::from_str("tool = false").unwrap();
        assert_eq!(off.tool.as_ref().unwrap().title(), None);

        let custom: PluginConfig = toml::from_str("[tool]\ntitle = \"Mux\"").unwrap();
        let tool = custom.tool.unwrap();
        assert!(tool.is_enabled());
        assert_eq!(tool.title(), Some("Mux"));

        assert_eq!(ToolConfig::default().title(), Some(DEFAULT_TOOL_TITLE));
    }
}
