//! Configuration merge engine.
//!
//! Layers, lowest precedence first:
//! 1. [`BuiltInDefaults`]
//! 2. plugin-wide [`PluginConfig`]
//! 3. per-schema-field [`PluginConfig`]
//! 4. editor changes (applied later by the controller)
//!
//! Layers are merged field by field: a field a layer leaves unset never
//! blanks out a lower layer. The plugin layer also defines the ceiling that
//! neither the schema layer nor the editor may exceed.

mod options;

pub use options::{recompute_legal_options, signed_visible, LegalOptions, ResolutionOption};

use crate::config::{PluginConfig, ToolConfig};
use crate::languages::LanguageCode;
use crate::models::{EncodingTier, MaxResolutionTier, Mp4Support, UploadConfig};

/// Values used when no layer sets a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltInDefaults {
    pub encoding_tier: EncodingTier,
    pub max_resolution_tier: MaxResolutionTier,
    pub mp4_support: Mp4Support,
    pub normalize_audio: bool,
    pub signed: bool,
    pub default_autogenerated_subtitle_langs: Vec<LanguageCode>,
    pub disable_upload_config: bool,
    pub disable_text_track_config: bool,
}

impl Default for BuiltInDefaults {
    fn default() -> Self {
        Self {
            encoding_tier: EncodingTier::Smart,
            max_resolution_tier: MaxResolutionTier::Fhd1080p,
            mp4_support: Mp4Support::None,
            normalize_audio: false,
            signed: false,
            default_autogenerated_subtitle_langs: Vec::new(),
            disable_upload_config: false,
            disable_text_track_config: false,
        }
    }
}

/// The most permissive values editors may choose.
///
/// Taken from the plugin layer (falling back to built-in defaults) only, so a
/// schema override can narrow the choice but never widen it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadCeiling {
    pub max_resolution_tier: MaxResolutionTier,
    pub mp4_support_allowed: bool,
}

impl UploadCeiling {
    pub fn from_plugin(plugin: &PluginConfig, defaults: &BuiltInDefaults) -> Self {
        let max_resolution_tier = plugin
            .max_resolution_tier
            .unwrap_or(defaults.max_resolution_tier);
        let mp4_support = plugin.mp4_support.unwrap_or(defaults.mp4_support);

        Self {
            max_resolution_tier,
            mp4_support_allowed: mp4_support.is_enabled(),
        }
    }

    pub fn allows_resolution(&self, tier: MaxResolutionTier) -> bool {
        tier <= self.max_resolution_tier
    }

    pub fn clamp_resolution(&self, tier: MaxResolutionTier) -> MaxResolutionTier {
        tier.min(self.max_resolution_tier)
    }

    pub fn clamp_mp4_support(&self, mp4_support: Mp4Support) -> Mp4Support {
        if self.mp4_support_allowed {
            mp4_support
        } else {
            Mp4Support::None
        }
    }
}

/// Effective developer policy for one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    pub ceiling: UploadCeiling,
    /// Upload straight away without showing the dialog.
    pub disable_upload_config: bool,
    /// Editors may not add or remove text tracks.
    pub disable_text_track_config: bool,
    /// Autogenerated tracks to seed every upload with.
    pub default_autogenerated_subtitle_langs: Vec<LanguageCode>,
    /// Navigation title of the studio tool, `None` when disabled.
    pub tool_title: Option<String>,
}

/// Pick the value of one field: schema over plugin over built-in default.
fn layered<T>(
    plugin: &PluginConfig,
    schema: Option<&PluginConfig>,
    field: impl Fn(&PluginConfig) -> Option<T>,
    default: T,
) -> T {
    schema
        .and_then(&field)
        .or_else(|| field(plugin))
        .unwrap_or(default)
}

/// Merge the configuration layers into the starting `UploadConfig`.
///
/// Pure: the same inputs always give an equal result. Text tracks start
/// empty and the filename unset; the controller fills both in.
pub fn resolve(
    plugin: &PluginConfig,
    schema: Option<&PluginConfig>,
    defaults: &BuiltInDefaults,
) -> UploadConfig {
    let ceiling = UploadCeiling::from_plugin(plugin, defaults);

    let requested_resolution = layered(
        plugin,
        schema,
        |c| c.max_resolution_tier,
        defaults.max_resolution_tier,
    );
    let max_resolution_tier = ceiling.clamp_resolution(requested_resolution);
    if max_resolution_tier != requested_resolution {
        tracing::debug!(
            "Clamped max_resolution_tier {} to plugin ceiling {}",
            requested_resolution,
            max_resolution_tier
        );
    }

    let requested_mp4 = layered(plugin, schema, |c| c.mp4_support, defaults.mp4_support);
    let mp4_support = ceiling.clamp_mp4_support(requested_mp4);
    if mp4_support != requested_mp4 {
        tracing::debug!("Plugin does not allow mp4 support, ignoring '{}'", requested_mp4);
    }

    UploadConfig {
        encoding_tier: layered(plugin, schema, |c| c.encoding_tier, defaults.encoding_tier),
        max_resolution_tier,
        mp4_support,
        normalize_audio: layered(plugin, schema, |c| c.normalize_audio, defaults.normalize_audio),
        signed: layered(plugin, schema, |c| c.default_signed, defaults.signed),
        text_tracks: Vec::new(),
        filename: None,
    }
}

/// Merge the policy switches of the configuration layers.
pub fn resolve_policy(
    plugin: &PluginConfig,
    schema: Option<&PluginConfig>,
    defaults: &BuiltInDefaults,
) -> UploadPolicy {
    UploadPolicy {
        ceiling: UploadCeiling::from_plugin(plugin, defaults),
        disable_upload_config: layered(
            plugin,
            schema,
            |c| c.disable_upload_config,
            defaults.disable_upload_config,
        ),
        disable_text_track_config: layered(
            plugin,
            schema,
            |c| c.disable_text_track_config,
            defaults.disable_text_track_config,
        ),
        default_autogenerated_subtitle_langs: layered(
            plugin,
            schema,
            |c| c.default_autogenerated_subtitle_langs.clone(),
            defaults.default_autogenerated_subtitle_langs.clone(),
        ),
        tool_title: plugin
            .tool
            .clone()
            .unwrap_or_default()
            .title()
            .map(str::to_string),
    }
}
