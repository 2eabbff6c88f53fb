//! Upload configuration controller.
//!
//! Drives one upload from resolution to a single terminal outcome:
//!
//! ```text
//! Resolving ──► Interactive ──► Finalized
//!     │              │
//!     │              └────────► Cancelled
//!     └──► AutoSubmitting ────► Finalized
//! ```
//!
//! The sink sees exactly one call per controller: `finalize` with the final
//! config, or `cancel`.

mod edit;
mod errors;

pub use edit::{ConfigField, FieldEdit, FieldEditParseError};
pub use errors::{EditOutcome, IgnoredEdit, UploadError, UploadResult};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::PluginConfig;
use crate::languages::Language;
use crate::models::{Secrets, UploadConfig, UploadSource};
use crate::resolve::{
    recompute_legal_options, resolve, resolve_policy, signed_visible, BuiltInDefaults,
    LegalOptions, UploadPolicy,
};
use crate::tracks::{available_autogenerated_languages, check_add, TrackEditor, UploadTextTrack};

/// Lifecycle of one upload configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerState {
    Resolving,
    Interactive,
    AutoSubmitting,
    Finalized,
    Cancelled,
}

impl ControllerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resolving => "resolving",
            Self::Interactive => "interactive",
            Self::AutoSubmitting => "auto_submitting",
            Self::Finalized => "finalized",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finalized | Self::Cancelled)
    }
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives the outcome of an upload configuration.
pub trait UploadSink {
    /// Start the upload with this configuration.
    fn finalize(&mut self, config: UploadConfig);

    /// The editor abandoned the upload.
    fn cancel(&mut self);

    /// Called on every state change, before any outcome it leads to.
    fn state_changed(&mut self, _from: ControllerState, _to: ControllerState) {}
}

/// Everything the controller needs to start.
#[derive(Debug, Clone)]
pub struct UploadInputs {
    pub plugin: PluginConfig,
    /// Per-field override, if the schema field declares one.
    pub schema: Option<PluginConfig>,
    pub secrets: Secrets,
    pub source: UploadSource,
    pub defaults: BuiltInDefaults,
}

impl UploadInputs {
    pub fn new(plugin: PluginConfig, source: UploadSource) -> Self {
        Self {
            plugin,
            schema: None,
            secrets: Secrets::default(),
            source,
            defaults: BuiltInDefaults::default(),
        }
    }

    pub fn with_schema(mut self, schema: Option<PluginConfig>) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_secrets(mut self, secrets: Secrets) -> Self {
        self.secrets = secrets;
        self
    }

    pub fn with_defaults(mut self, defaults: BuiltInDefaults) -> Self {
        self.defaults = defaults;
        self
    }
}

/// State machine for a single upload.
pub struct UploadController<S: UploadSink> {
    state: ControllerState,
    /// `None` once the config has been handed to the sink or dropped.
    config: Option<UploadConfig>,
    policy: UploadPolicy,
    secrets: Secrets,
    source: UploadSource,
    editor: TrackEditor,
    sink: S,
}

impl<S: UploadSink> UploadController<S> {
    /// Resolve the configuration and either open it for editing or submit it
    /// right away when the plugin disables the upload dialog.
    pub fn start(inputs: UploadInputs, sink: S) -> Self {
        Self::start_with_editor(inputs, sink, TrackEditor::new())
    }

    pub fn start_with_editor(inputs: UploadInputs, sink: S, editor: TrackEditor) -> Self {
        let UploadInputs {
            plugin,
            schema,
            secrets,
            source,
            defaults,
        } = inputs;

        tracing::debug!("Resolving upload configuration for '{}'", source.display_name());

        let mut config = resolve(&plugin, schema.as_ref(), &defaults);
        let policy = resolve_policy(&plugin, schema.as_ref(), &defaults);
        config.filename = source.default_filename();

        let mut controller = Self {
            state: ControllerState::Resolving,
            config: Some(config),
            policy,
            secrets,
            source,
            editor,
            sink,
        };
        controller.seed_default_tracks();

        if controller.policy.disable_upload_config {
            controller.transition(ControllerState::AutoSubmitting);
            controller.finalize();
        } else {
            controller.transition(ControllerState::Interactive);
        }
        controller
    }

    /// Add an autogenerated track for each default language. Autogenerated
    /// subtitles need the smart tier, so nothing is seeded under baseline.
    fn seed_default_tracks(&mut self) {
        let Some(config) = self.config.as_mut() else {
            return;
        };
        if !config.encoding_tier.is_smart() {
            return;
        }

        for code in &self.policy.default_autogenerated_subtitle_langs {
            let track: UploadTextTrack = match self.editor.autogenerated(code.as_str()) {
                Ok(track) => track.into(),
                Err(e) => {
                    tracing::warn!("Skipping default subtitle language: {}", e);
                    continue;
                }
            };
            if check_add(&config.text_tracks, &track).is_ok() {
                config.text_tracks.push(track);
            }
        }
    }

    fn transition(&mut self, next: ControllerState) {
        tracing::info!("Upload '{}': {} -> {}", self.source.display_name(), self.state, next);
        self.sink.state_changed(self.state, next);
        self.state = next;
    }

    fn finalize(&mut self) {
        if let Some(config) = self.config.take() {
            self.sink.finalize(config);
            self.transition(ControllerState::Finalized);
        }
    }

    /// Config being edited, when the controller is interactive.
    fn editable_config(&mut self) -> Result<&mut UploadConfig, IgnoredEdit> {
        match (self.state, self.config.as_mut()) {
            (ControllerState::Interactive, Some(config)) => Ok(config),
            (state, _) => Err(IgnoredEdit::NotInteractive { state }),
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Current config. `None` after the controller reached a terminal state.
    pub fn config(&self) -> Option<&UploadConfig> {
        self.config.as_ref()
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    pub fn source(&self) -> &UploadSource {
        &self.source
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Builds tracks with this controller's id generator.
    pub fn track_editor(&mut self) -> &mut TrackEditor {
        &mut self.editor
    }

    /// Options the editing surface may offer for the current config.
    pub fn legal_options(&self) -> Option<LegalOptions> {
        self.config
            .as_ref()
            .map(|config| recompute_legal_options(config, &self.policy.ceiling))
    }

    pub fn signed_editable(&self) -> bool {
        self.state == ControllerState::Interactive && signed_visible(&self.secrets)
    }

    pub fn text_tracks_editable(&self) -> bool {
        self.state == ControllerState::Interactive && !self.policy.disable_text_track_config
    }

    /// Languages that can still get an autogenerated track.
    pub fn available_languages(&self) -> Vec<&'static Language> {
        self.config
            .as_ref()
            .map(|config| available_autogenerated_languages(&config.text_tracks))
            .unwrap_or_default()
    }

    /// Whether `edit` would be applied to the current config.
    pub fn is_legal(&self, edit: &FieldEdit) -> bool {
        let Some(config) = self.config.as_ref() else {
            return false;
        };
        let ceiling = &self.policy.ceiling;
        let smart = config.encoding_tier.is_smart();

        match edit {
            FieldEdit::Filename(_) | FieldEdit::EncodingTier(_) | FieldEdit::NormalizeAudio(_) => {
                true
            }
            FieldEdit::MaxResolutionTier(tier) => smart && ceiling.allows_resolution(*tier),
            FieldEdit::Mp4Support(_) => smart && ceiling.mp4_support_allowed,
            FieldEdit::Signed(_) => signed_visible(&self.secrets),
        }
    }

    /// Apply a single-field edit. Illegal edits leave the config untouched.
    pub fn set_field(&mut self, edit: FieldEdit) -> EditOutcome {
        if self.state != ControllerState::Interactive {
            return ignored(IgnoredEdit::NotInteractive { state: self.state });
        }
        if !self.is_legal(&edit) {
            return ignored(IgnoredEdit::IllegalField {
                field: edit.field(),
                value: edit.value_string(),
            });
        }

        let config = match self.editable_config() {
            Ok(config) => config,
            Err(reason) => return ignored(reason),
        };

        tracing::debug!("Set {} = {}", edit.field(), edit.value_string());
        match edit {
            FieldEdit::Filename(name) => config.filename = Some(name),
            FieldEdit::EncodingTier(tier) => config.encoding_tier = tier,
            FieldEdit::MaxResolutionTier(tier) => config.max_resolution_tier = tier,
            FieldEdit::Mp4Support(mp4) => config.mp4_support = mp4,
            FieldEdit::NormalizeAudio(value) => config.normalize_audio = value,
            FieldEdit::Signed(value) => config.signed = value,
        }
        EditOutcome::Applied
    }

    fn check_tracks_editable(&self) -> Result<(), IgnoredEdit> {
        if self.state != ControllerState::Interactive {
            return Err(IgnoredEdit::NotInteractive { state: self.state });
        }
        if self.policy.disable_text_track_config {
            return Err(IgnoredEdit::TextTracksDisabled);
        }
        Ok(())
    }

    /// Append a text track.
    pub fn add_track(&mut self, track: impl Into<UploadTextTrack>) -> EditOutcome {
        let track = track.into();
        if let Err(reason) = self.check_tracks_editable() {
            return ignored(reason);
        }
        let config = match self.editable_config() {
            Ok(config) => config,
            Err(reason) => return ignored(reason),
        };

        if config.text_tracks.iter().any(|t| t.id() == track.id()) {
            let id = track.id().to_string();
            return ignored(IgnoredEdit::DuplicateTrackId { id });
        }
        if check_add(&config.text_tracks, &track).is_err() {
            let code = track.language_code().to_string();
            return ignored(IgnoredEdit::DuplicateAutogeneratedLanguage { code });
        }

        tracing::debug!("Added {} track '{}'", track.type_str(), track.name());
        config.text_tracks.push(track);
        EditOutcome::Applied
    }

    /// Remove the track with `id`.
    pub fn remove_track(&mut self, id: &str) -> EditOutcome {
        if let Err(reason) = self.check_tracks_editable() {
            return ignored(reason);
        }
        let config = match self.editable_config() {
            Ok(config) => config,
            Err(reason) => return ignored(reason),
        };

        let Some(index) = config.text_tracks.iter().position(|t| t.id() == id) else {
            let id = id.to_string();
            return ignored(IgnoredEdit::UnknownTrack { id });
        };
        let removed = config.text_tracks.remove(index);
        tracing::debug!("Removed track '{}'", removed.name());
        EditOutcome::Applied
    }

    /// Replace the track that has the same id as `track`, keeping its
    /// position.
    pub fn replace_track(&mut self, track: impl Into<UploadTextTrack>) -> EditOutcome {
        let track = track.into();
        if let Err(reason) = self.check_tracks_editable() {
            return ignored(reason);
        }
        let config = match self.editable_config() {
            Ok(config) => config,
            Err(reason) => return ignored(reason),
        };

        let Some(index) = config.text_tracks.iter().position(|t| t.id() == track.id()) else {
            let id = track.id().to_string();
            return ignored(IgnoredEdit::UnknownTrack { id });
        };

        let others: Vec<UploadTextTrack> = config
            .text_tracks
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, t)| t.clone())
            .collect();
        if check_add(&others, &track).is_err() {
            let code = track.language_code().to_string();
            return ignored(IgnoredEdit::DuplicateAutogeneratedLanguage { code });
        }

        config.text_tracks[index] = track;
        EditOutcome::Applied
    }

    /// The first required field that is still empty.
    ///
    /// A display name is required for file uploads only. URL uploads may go
    /// out without one.
    pub fn missing_required_field(&self) -> Option<ConfigField> {
        let config = self.config.as_ref()?;
        if self.source.requires_display_name() && config.trimmed_filename().is_none() {
            return Some(ConfigField::Filename);
        }
        None
    }

    /// Hand the current config to the sink and finish.
    pub fn confirm(&mut self) -> UploadResult<()> {
        if self.state != ControllerState::Interactive {
            return Err(UploadError::not_interactive(self.state));
        }
        if let Some(field) = self.missing_required_field() {
            tracing::warn!("Upload not started: '{}' is required", field);
            return Err(UploadError::missing_required_field(field));
        }
        self.finalize();
        Ok(())
    }

    /// Abandon the upload. Only possible while interactive.
    pub fn cancel(&mut self) -> EditOutcome {
        if self.state != ControllerState::Interactive {
            return ignored(IgnoredEdit::NotInteractive { state: self.state });
        }
        self.config = None;
        self.sink.cancel();
        self.transition(ControllerState::Cancelled);
        EditOutcome::Applied
    }
}

fn ignored(reason: IgnoredEdit) -> EditOutcome {
    tracing::debug!("Ignoring edit: {}", reason);
    EditOutcome::Ignored(reason)
}

impl<S: UploadSink + fmt::Debug> fmt::Debug for UploadController<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadController")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("policy", &self.policy)
            .field("source", &self.source)
            .field("sink", &self.sink)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::languages::LanguageCode;
    use crate::logging::init_test_tracing;
    use crate::models::{EncodingTier, MaxResolutionTier, Mp4Support};
    use crate::tracks::{vtt_file, CustomTrackType, SequentialTrackIds};

    #[derive(Debug, Default)]
    struct RecordingSink {
        finalized: Vec<UploadConfig>,
        cancelled: usize,
        states: Vec<ControllerState>,
    }

    impl UploadSink for RecordingSink {
        fn finalize(&mut self, config: UploadConfig) {
            self.finalized.push(config);
        }

        fn cancel(&mut self) {
            self.cancelled += 1;
        }

        fn state_changed(&mut self, from: ControllerState, to: ControllerState) {
            if self.states.is_empty() {
                self.states.push(from);
            }
            self.states.push(to);
        }
    }

    fn langs(codes: &[&str]) -> Vec<LanguageCode> {
        codes.iter().filter_map(|c| LanguageCode::new(c)).collect()
    }

    fn start(inputs: UploadInputs) -> UploadController<RecordingSink> {
        init_test_tracing();
        UploadController::start_with_editor(
            inputs,
            RecordingSink::default(),
            TrackEditor::with_ids(SequentialTrackIds::default()),
        )
    }

    fn file_source() -> UploadSource {
        UploadSource::file("clip.mp4", 1_048_576)
    }

    fn signing_secrets() -> Secrets {
        Secrets {
            enable_signed_urls: true,
            ..Secrets::default()
        }
    }

    #[test]
    fn starts_interactive_with_filename_from_file() {
        let controller = start(UploadInputs::new(PluginConfig::default(), file_source()));

        assert_eq!(controller.state(), ControllerState::Interactive);
        let config = controller.config().unwrap();
        assert_eq!(config.filename.as_deref(), Some("clip.mp4"));
        assert!(config.text_tracks.is_empty());
        assert!(controller.sink().finalized.is_empty());
        assert_eq!(
            controller.sink().states,
            vec![ControllerState::Resolving, ControllerState::Interactive]
        );
    }

    #[test]
    fn url_upload_starts_without_filename_and_can_confirm() {
        let mut controller = start(UploadInputs::new(
            PluginConfig::default(),
            UploadSource::url("https://example.com/v.mp4"),
        ));
        assert_eq!(controller.config().unwrap().filename, None);
        assert_eq!(controller.missing_required_field(), None);
        controller.confirm().unwrap();
        assert_eq!(controller.state(), ControllerState::Finalized);
    }

    #[test]
    fn auto_submits_exactly_once() {
        let plugin = PluginConfig {
            disable_upload_config: Some(true),
            max_resolution_tier: Some(MaxResolutionTier::Qhd1440p),
            ..PluginConfig::default()
        };
        let mut controller = start(UploadInputs::new(plugin, file_source()));

        assert_eq!(controller.state(), ControllerState::Finalized);
        assert!(controller.state().is_terminal());
        assert_eq!(
            controller.sink().states,
            vec![
                ControllerState::Resolving,
                ControllerState::AutoSubmitting,
                ControllerState::Finalized,
            ]
        );
        assert!(!controller.sink().states.contains(&ControllerState::Interactive));
        assert_eq!(controller.sink().finalized.len(), 1);
        assert_eq!(
            controller.sink().finalized[0].max_resolution_tier,
            MaxResolutionTier::Qhd1440p
        );
        assert!(controller.config().is_none());

        // Nothing after the terminal state reaches the sink.
        assert!(controller.confirm().is_err());
        assert!(!controller.cancel().is_applied());
        assert!(!controller.set_field(FieldEdit::NormalizeAudio(true)).is_applied());
        let sink = controller.into_sink();
        assert_eq!(sink.finalized.len(), 1);
        assert_eq!(sink.cancelled, 0);
    }

    #[test]
    fn schema_can_disable_dialog() {
        let schema = PluginConfig {
            disable_upload_config: Some(true),
            ..PluginConfig::default()
        };
        let controller = start(
            UploadInputs::new(PluginConfig::default(), file_source()).with_schema(Some(schema)),
        );
        assert_eq!(controller.state(), ControllerState::Finalized);
        assert_eq!(controller.sink().finalized.len(), 1);
    }

    #[test]
    fn seeds_default_languages_without_duplicates() {
        let plugin = PluginConfig {
            default_autogenerated_subtitle_langs: Some(langs(&["en", "fr", "en"])),
            ..PluginConfig::default()
        };
        let controller = start(UploadInputs::new(plugin, file_source()));
        let config = controller.config().unwrap();

        let codes: Vec<_> = config.text_tracks.iter().map(|t| t.language_code()).collect();
        assert_eq!(codes, vec!["en", "fr"]);
        assert_eq!(config.text_tracks[0].id(), "track-1");
        assert_eq!(config.text_tracks[0].name(), "English");
        assert!(!controller.available_languages().iter().any(|l| l.code == "en"));
    }

    #[test]
    fn baseline_does_not_seed_tracks() {
        let plugin = PluginConfig {
            encoding_tier: Some(EncodingTier::Baseline),
            default_autogenerated_subtitle_langs: Some(langs(&["en"])),
            ..PluginConfig::default()
        };
        let controller = start(UploadInputs::new(plugin, file_source()));
        assert!(controller.config().unwrap().text_tracks.is_empty());
    }

    #[test]
    fn resolution_edits_respect_ceiling() {
        let plugin = PluginConfig {
            max_resolution_tier: Some(MaxResolutionTier::Qhd1440p),
            ..PluginConfig::default()
        };
        let mut controller = start(UploadInputs::new(plugin, file_source()));

        let outcome = controller.set_field(FieldEdit::MaxResolutionTier(MaxResolutionTier::Uhd2160p));
        assert!(matches!(
            outcome,
            EditOutcome::Ignored(IgnoredEdit::IllegalField {
                field: ConfigField::MaxResolutionTier,
                ..
            })
        ));
        assert_eq!(
            controller.config().unwrap().max_resolution_tier,
            MaxResolutionTier::Qhd1440p
        );

        assert!(controller
            .set_field(FieldEdit::MaxResolutionTier(MaxResolutionTier::Fhd1080p))
            .is_applied());
        assert_eq!(
            controller.config().unwrap().max_resolution_tier,
            MaxResolutionTier::Fhd1080p
        );
    }

    #[test]
    fn baseline_locks_resolution_and_mp4() {
        let plugin = PluginConfig {
            max_resolution_tier: Some(MaxResolutionTier::Uhd2160p),
            mp4_support: Some(Mp4Support::Standard),
            ..PluginConfig::default()
        };
        let mut controller = start(UploadInputs::new(plugin, file_source()));

        assert!(controller
            .set_field(FieldEdit::Mp4Support(Mp4Support::Standard))
            .is_applied());
        assert!(controller
            .set_field(FieldEdit::EncodingTier(EncodingTier::Baseline))
            .is_applied());

        assert!(!controller
            .set_field(FieldEdit::MaxResolutionTier(MaxResolutionTier::Qhd1440p))
            .is_applied());
        assert!(!controller
            .set_field(FieldEdit::Mp4Support(Mp4Support::None))
            .is_applied());

        let options = controller.legal_options().unwrap();
        assert!(options.selectable_resolutions().is_empty());
        assert!(!options.mp4_support_visible);

        // Stored values survive, but the effective ones follow baseline.
        let config = controller.config().unwrap();
        assert_eq!(config.mp4_support, Mp4Support::Standard);
        assert_eq!(config.effective_mp4_support(), Mp4Support::None);
        assert_eq!(config.effective_max_resolution_tier(), MaxResolutionTier::Fhd1080p);
    }

    #[test]
    fn mp4_cannot_be_enabled_past_plugin() {
        let mut controller = start(UploadInputs::new(PluginConfig::default(), file_source()));
        assert!(!controller
            .set_field(FieldEdit::Mp4Support(Mp4Support::Standard))
            .is_applied());
        assert_eq!(controller.config().unwrap().mp4_support, Mp4Support::None);
    }

    #[test]
    fn signed_needs_signing_secrets() {
        let mut controller = start(UploadInputs::new(PluginConfig::default(), file_source()));
        assert!(!controller.signed_editable());
        assert!(!controller.set_field(FieldEdit::Signed(true)).is_applied());
        assert!(!controller.config().unwrap().signed);

        let mut controller = start(
            UploadInputs::new(PluginConfig::default(), file_source()).with_secrets(signing_secrets()),
        );
        assert!(controller.signed_editable());
        assert!(controller.set_field(FieldEdit::Signed(true)).is_applied());
        assert!(controller.config().unwrap().signed);
    }

    #[test]
    fn host_defaults_fill_unset_fields() {
        let defaults = BuiltInDefaults {
            normalize_audio: true,
            default_autogenerated_subtitle_langs: langs(&["es"]),
            ..BuiltInDefaults::default()
        };
        let controller = start(
            UploadInputs::new(PluginConfig::default(), file_source()).with_defaults(defaults),
        );
        let config = controller.config().unwrap();
        assert!(config.normalize_audio);
        assert_eq!(config.text_tracks[0].language_code(), "es");
    }

    #[test]
    fn default_signed_applies_without_secrets() {
        let plugin = PluginConfig {
            default_signed: Some(true),
            ..PluginConfig::default()
        };
        let controller = start(UploadInputs::new(plugin, file_source()));
        assert!(controller.config().unwrap().signed);
    }

    #[test]
    fn confirm_requires_filename_for_files() {
        let mut controller = start(UploadInputs::new(PluginConfig::default(), file_source()));
        controller.set_field(FieldEdit::Filename("   ".to_string()));

        let err = controller.confirm().unwrap_err();
        assert_eq!(err, UploadError::missing_required_field(ConfigField::Filename));
        assert_eq!(controller.state(), ControllerState::Interactive);
        assert!(controller.sink().finalized.is_empty());

        controller.set_field(FieldEdit::Filename("Launch video".to_string()));
        controller.confirm().unwrap();
        assert_eq!(controller.state(), ControllerState::Finalized);
        let sink = controller.into_sink();
        assert_eq!(sink.finalized.len(), 1);
        assert_eq!(sink.finalized[0].filename.as_deref(), Some("Launch video"));
    }

    #[test]
    fn confirm_twice_finalizes_once() {
        let mut controller = start(UploadInputs::new(PluginConfig::default(), file_source()));
        controller.confirm().unwrap();
        assert_eq!(
            controller.confirm().unwrap_err(),
            UploadError::not_interactive(ControllerState::Finalized)
        );
        assert_eq!(controller.sink().finalized.len(), 1);
        assert!(controller.config().is_none());
    }

    #[test]
    fn cancel_is_terminal() {
        let mut controller = start(UploadInputs::new(PluginConfig::default(), file_source()));
        assert!(!controller.state().is_terminal());
        assert!(controller.cancel().is_applied());
        assert_eq!(controller.state(), ControllerState::Cancelled);
        assert!(controller.state().is_terminal());
        assert!(controller.config().is_none());
        assert!(controller.legal_options().is_none());

        assert!(controller.confirm().is_err());
        assert!(!controller.cancel().is_applied());
        let sink = controller.into_sink();
        assert_eq!(sink.cancelled, 1);
        assert!(sink.finalized.is_empty());
    }

    #[test]
    fn track_edits() {
        let mut controller = start(UploadInputs::new(PluginConfig::default(), file_source()));

        let english = controller.track_editor().autogenerated("en").unwrap();
        let english_id = english.id.clone();
        assert!(controller.add_track(english.clone()).is_applied());

        // Same language again is ignored.
        let again = controller.track_editor().autogenerated("en").unwrap();
        assert!(matches!(
            controller.add_track(again),
            EditOutcome::Ignored(IgnoredEdit::DuplicateAutogeneratedLanguage { .. })
        ));
        // Same id again is ignored.
        assert!(matches!(
            controller.add_track(english),
            EditOutcome::Ignored(IgnoredEdit::DuplicateTrackId { .. })
        ));

        let captions = controller
            .track_editor()
            .custom("Captions", CustomTrackType::Captions, "en", vtt_file("en.vtt"))
            .unwrap();
        assert!(controller.add_track(captions).is_applied());
        assert_eq!(controller.config().unwrap().text_tracks.len(), 2);

        let renamed = renamed_track(&controller, &english_id, "Subs");
        assert!(controller.replace_track(renamed).is_applied());
        assert_eq!(controller.config().unwrap().text_tracks[0].name(), "Subs");

        assert!(controller.remove_track(&english_id).is_applied());
        assert!(matches!(
            controller.remove_track(&english_id),
            EditOutcome::Ignored(IgnoredEdit::UnknownTrack { .. })
        ));
        assert_eq!(controller.config().unwrap().text_tracks.len(), 1);
    }

    fn renamed_track(
        controller: &UploadController<RecordingSink>,
        id: &str,
        name: &str,
    ) -> UploadTextTrack {
        let track = controller
            .config()
            .unwrap()
            .autogenerated_tracks()
            .find(|t| t.id == id)
            .unwrap()
            .clone();
        track.with_name(name).into()
    }

    #[test]
    fn replace_cannot_create_duplicate_language() {
        let plugin = PluginConfig {
            default_autogenerated_subtitle_langs: Some(langs(&["en", "fr"])),
            ..PluginConfig::default()
        };
        let mut controller = start(UploadInputs::new(plugin, file_source()));

        let mut french = controller.config().unwrap().text_tracks[1]
            .as_autogenerated()
            .unwrap()
            .clone();
        french.language_code = LanguageCode::new("en").unwrap();
        assert!(matches!(
            controller.replace_track(french),
            EditOutcome::Ignored(IgnoredEdit::DuplicateAutogeneratedLanguage { .. })
        ));
    }

    #[test]
    fn text_track_config_can_be_disabled() {
        let plugin = PluginConfig {
            disable_text_track_config: Some(true),
            ..PluginConfig::default()
        };
        let mut controller = start(UploadInputs::new(plugin, file_source()));
        assert!(!controller.text_tracks_editable());

        let track = controller.track_editor().autogenerated("de").unwrap();
        assert_eq!(
            controller.add_track(track),
            EditOutcome::Ignored(IgnoredEdit::TextTracksDisabled)
        );
        assert!(controller.config().unwrap().text_tracks.is_empty());
    }
}
