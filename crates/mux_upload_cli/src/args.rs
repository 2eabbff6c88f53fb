//! Command line arguments of `mux-upload`.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use mux_upload_core::controller::FieldEdit;

#[derive(Debug, Parser)]
#[command(name = "mux-upload")]
#[command(about = "Resolve Mux upload configurations from plugin settings")]
#[command(version)]
pub(crate) struct Args {
    /// Settings file. Defaults to `settings.toml` in the platform config
    /// directory.
    #[arg(short, long, global = true, env = "MUX_UPLOAD_CONFIG")]
    pub(crate) config: Option<PathBuf>,

    /// More log output (`-v` debug, `-vv` trace). `RUST_LOG` still wins.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub(crate) verbose: u8,

    #[command(subcommand)]
    pub(crate) cmd: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Runs one upload configuration and prints the asset request body.
    Resolve(ResolveArgs),

    /// Lists the languages available for autogenerated subtitles.
    Languages,

    /// Writes a settings file with default values.
    WriteConfig {
        /// Target file. Defaults to the `--config` path.
        path: Option<PathBuf>,
    },
}

#[derive(Debug, clap::Args)]
pub(crate) struct ResolveArgs {
    /// Named schema override from the `[schemas]` table.
    #[arg(long)]
    pub(crate) schema: Option<String>,

    /// Local video file to upload.
    #[arg(long, value_name = "PATH", conflicts_with = "url", required_unless_present = "url")]
    pub(crate) file: Option<PathBuf>,

    /// Remote video URL to upload.
    #[arg(long, value_name = "URL")]
    pub(crate) url: Option<String>,

    /// Display name of the asset.
    #[arg(long)]
    pub(crate) title: Option<String>,

    /// Edit a field, e.g. `--set max_resolution_tier=1440p`. Repeatable.
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    pub(crate) edits: Vec<FieldEdit>,

    /// Request autogenerated subtitles in this language. Repeatable.
    #[arg(long = "add-language", value_name = "CODE")]
    pub(crate) languages: Vec<String>,

    /// Attach arbitrary metadata to the asset.
    #[arg(long)]
    pub(crate) passthrough: Option<String>,

    /// Close the dialog without uploading.
    #[arg(long)]
    pub(crate) cancel: bool,
}

impl ResolveArgs {
    /// Whether any editor input was given.
    pub(crate) fn has_edits(&self) -> bool {
        self.title.is_some() || !self.edits.is_empty() || !self.languages.is_empty()
    }
}
