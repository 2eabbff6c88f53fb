//! One upload configuration session driven from the command line.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use mux_upload_core::config::{ConfigError, ConfigManager};
use mux_upload_core::controller::{
    ControllerState, EditOutcome, FieldEdit, UploadController, UploadInputs, UploadSink,
};
use mux_upload_core::models::{UploadConfig, UploadSource};
use mux_upload_core::request::NewAssetSettings;

use crate::args::ResolveArgs;

/// What the session ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Outcome {
    Finalized(UploadConfig),
    Cancelled,
}

/// Sink that keeps the outcome for the caller to print.
#[derive(Debug, Default)]
struct OutcomeSink {
    outcome: Option<Outcome>,
}

impl UploadSink for OutcomeSink {
    fn finalize(&mut self, config: UploadConfig) {
        self.outcome = Some(Outcome::Finalized(config));
    }

    fn cancel(&mut self) {
        self.outcome = Some(Outcome::Cancelled);
    }
}

/// Settings from `path`. Only a missing file falls back to defaults; a file
/// that cannot be read or parsed is an error, since running on defaults
/// would drop the deployment's ceilings and signing policy.
pub(crate) fn load_settings(path: &Path) -> Result<ConfigManager> {
    let mut config = ConfigManager::new(path);
    match config.load() {
        Ok(()) | Err(ConfigError::NotFound(_)) => Ok(config),
        Err(e) => Err(e).with_context(|| format!("Failed to load settings from {}", path.display())),
    }
}

/// Request body for a finalized upload, as pretty-printed JSON.
pub(crate) fn render_request(
    upload: &UploadConfig,
    source: &UploadSource,
    passthrough: Option<&str>,
) -> Result<String> {
    let mut body = NewAssetSettings::for_upload(upload, source);
    if let Some(passthrough) = passthrough {
        body = body.with_passthrough(passthrough);
    }
    body.to_json_pretty().context("Failed to serialize request")
}

fn source_from_args(args: &ResolveArgs) -> Result<UploadSource> {
    if let Some(url) = &args.url {
        return Ok(UploadSource::url(url.clone()));
    }

    let path = args.file.as_deref().context("either --file or --url is required")?;
    let size = fs::metadata(path)
        .with_context(|| format!("Failed to read {}", path.display()))?
        .len();
    Ok(UploadSource::file(file_name(path), size))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn report(what: &str, outcome: EditOutcome) {
    if let EditOutcome::Ignored(reason) = outcome {
        tracing::warn!("Ignored {}: {}", what, reason);
    }
}

/// Resolve the configuration, apply the editor input from `args` and
/// finish the session. Returns the source together with the outcome.
pub(crate) fn run(config: &ConfigManager, args: &ResolveArgs) -> Result<(UploadSource, Outcome)> {
    let settings = config.settings();
    let schema = args
        .schema
        .as_deref()
        .map(|name| config.schema(name).cloned())
        .transpose()?;
    let source = source_from_args(args)?;

    let inputs = UploadInputs::new(settings.plugin.clone(), source.clone())
        .with_schema(schema)
        .with_secrets(settings.secrets.clone());
    let mut controller = UploadController::start(inputs, OutcomeSink::default());

    if controller.state() != ControllerState::Interactive {
        if args.has_edits() || args.cancel {
            tracing::warn!("Upload dialog is disabled, editor input was not applied");
        }
        return finish(controller, source);
    }

    if let Some(title) = &args.title {
        report("title", controller.set_field(FieldEdit::Filename(title.clone())));
    }
    for edit in &args.edits {
        let what = format!("--set {}", edit.field());
        report(&what, controller.set_field(edit.clone()));
    }
    for code in &args.languages {
        let track = controller
            .track_editor()
            .autogenerated(code)
            .with_context(|| format!("Cannot add subtitles for '{}'", code))?;
        report("--add-language", controller.add_track(track));
    }

    if args.cancel {
        controller.cancel();
    } else {
        controller.confirm()?;
    }
    finish(controller, source)
}

fn finish(
    controller: UploadController<OutcomeSink>,
    source: UploadSource,
) -> Result<(UploadSource, Outcome)> {
    let outcome = controller
        .into_sink()
        .outcome
        .context("Upload session ended without an outcome")?;
    Ok((source, outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{Args, Command};
    use clap::Parser;
    use mux_upload_core::config::PluginConfig;
    use mux_upload_core::models::MaxResolutionTier;
    use serde_json::{json, Value};

    fn resolve_args(extra: &[&str]) -> ResolveArgs {
        let mut argv = vec!["mux-upload", "resolve"];
        argv.extend_from_slice(extra);
        match Args::try_parse_from(argv).unwrap().cmd {
            Command::Resolve(args) => args,
            other => panic!("unexpected command {:?}", other),
        }
    }

    fn manager(dir: &tempfile::TempDir) -> ConfigManager {
        let mut manager = ConfigManager::new(dir.path().join("settings.toml"));
        manager.settings_mut().plugin.max_resolution_tier = Some(MaxResolutionTier::Qhd1440p);
        manager
    }

    #[test]
    fn applies_edits_and_finalizes() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager(&dir);
        let args = resolve_args(&[
            "--url",
            "https://example.com/v.mp4",
            "--set",
            "max_resolution_tier=2160p",
            "--add-language",
            "de",
        ]);

        let (source, outcome) = run(&manager, &args).unwrap();
        assert_eq!(source, UploadSource::url("https://example.com/v.mp4"));
        let Outcome::Finalized(config) = outcome else {
            panic!("expected finalized outcome");
        };
        // Above the plugin ceiling, so the edit was ignored.
        assert_eq!(config.max_resolution_tier, MaxResolutionTier::Qhd1440p);
        assert_eq!(config.text_tracks.len(), 1);
        assert_eq!(config.text_tracks[0].language_code(), "de");
    }

    #[test]
    fn file_source_uses_file_name_and_size() {
        let dir = tempfile::tempdir().unwrap();
        let video = dir.path().join("clip.mp4");
        fs::write(&video, [0u8; 16]).unwrap();
        let video_arg = video.to_string_lossy().into_owned();
        let args = resolve_args(&["--file", &video_arg]);

        let (source, outcome) = run(&manager(&dir), &args).unwrap();
        assert_eq!(source, UploadSource::file("clip.mp4", 16));
        let Outcome::Finalized(config) = outcome else {
            panic!("expected finalized outcome");
        };
        assert_eq!(config.filename.as_deref(), Some("clip.mp4"));
    }

    #[test]
    fn blank_title_blocks_file_upload() {
        let dir = tempfile::tempdir().unwrap();
        let video = dir.path().join("clip.mp4");
        fs::write(&video, b"x").unwrap();
        let video_arg = video.to_string_lossy().into_owned();
        let args = resolve_args(&["--file", &video_arg, "--title", " "]);

        let err = run(&manager(&dir), &args).unwrap_err();
        assert!(err.to_string().contains("filename"));
    }

    #[test]
    fn cancel_reports_cancelled() {
        let dir = tempfile::tempdir().unwrap();
        let args = resolve_args(&["--url", "https://example.com/v.mp4", "--cancel"]);
        let (_, outcome) = run(&manager(&dir), &args).unwrap();
        assert_eq!(outcome, Outcome::Cancelled);
    }

    #[test]
    fn disabled_dialog_submits_without_edits() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = manager(&dir);
        manager.settings_mut().schemas.insert(
            "quick".to_string(),
            PluginConfig {
                disable_upload_config: Some(true),
                ..PluginConfig::default()
            },
        );
        let args = resolve_args(&[
            "--url",
            "https://example.com/v.mp4",
            "--schema",
            "quick",
            "--cancel",
        ]);

        let (_, outcome) = run(&manager, &args).unwrap();
        assert!(matches!(outcome, Outcome::Finalized(_)));
    }

    #[test]
    fn unknown_schema_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = resolve_args(&["--url", "https://example.com/v.mp4", "--schema", "nope"]);
        assert!(run(&manager(&dir), &args).is_err());
    }

    #[test]
    fn unsupported_language_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = resolve_args(&["--url", "https://example.com/v.mp4", "--add-language", "xx"]);
        let err = run(&manager(&dir), &args).unwrap_err();
        assert!(err.to_string().contains("xx"));
    }

    #[test]
    fn missing_settings_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_settings(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.settings(), &Default::default());
    }

    #[test]
    fn invalid_settings_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(
            &path,
            "[plugin]\ndefault_signed = true\nmax_resolution_tier = \"8k\"\n",
        )
        .unwrap();

        let err = load_settings(&path).unwrap_err();
        assert!(err.to_string().contains("settings.toml"));
    }

    #[test]
    fn signed_policy_from_file_reaches_request() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "[plugin]\ndefault_signed = true\n").unwrap();
        let config = load_settings(&path).unwrap();

        let args = resolve_args(&["--url", "https://example.com/v.mp4", "--passthrough", "doc-7"]);
        let (source, outcome) = run(&config, &args).unwrap();
        let Outcome::Finalized(upload) = outcome else {
            panic!("expected finalized outcome");
        };

        let printed = render_request(&upload, &source, args.passthrough.as_deref()).unwrap();
        let body: Value = serde_json::from_str(&printed).unwrap();
        assert_eq!(
            body,
            json!({
                "input": [{"type": "video", "url": "https://example.com/v.mp4"}],
                "playback_policy": ["signed"],
                "encoding_tier": "smart",
                "max_resolution_tier": "1080p",
                "mp4_support": "none",
                "normalize_audio": false,
                "passthrough": "doc-7"
            })
        );
    }
}
