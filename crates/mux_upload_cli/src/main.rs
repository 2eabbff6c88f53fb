//! mux-upload - command-line front end for the upload configuration engine
//!
//! Stands in for the CMS upload dialog: loads the deployment settings, runs
//! one configuration session and prints the request body that would be sent
//! to Mux.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use directories::ProjectDirs;
use mux_upload_core::config::ConfigManager;
use mux_upload_core::languages::list_languages;
use mux_upload_core::logging::{init_tracing, LogLevel};

mod args;
mod session;

use args::{Args, Command, ResolveArgs};
use session::Outcome;

/// Default settings path: `<platform config dir>/settings.toml`, or
/// `.config/settings.toml` when no home directory is known.
fn default_config_path() -> PathBuf {
    ProjectDirs::from("io", "mux", "mux-upload")
        .map(|dirs| dirs.config_dir().join("settings.toml"))
        .unwrap_or_else(|| PathBuf::from(".config").join("settings.toml"))
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config.clone().unwrap_or_else(default_config_path);

    // Settings first, their log level seeds the subscriber.
    let config = session::load_settings(&config_path)?;

    init_tracing(LogLevel::from_verbosity(
        args.verbose,
        config.settings().logging.level,
    ));

    tracing::debug!("mux-upload core {}", mux_upload_core::version());
    if !config.path().exists() {
        tracing::warn!("No settings file at {}, using defaults", config.path().display());
    }

    match args.cmd {
        Command::Resolve(resolve) => run_resolve(&config, &resolve),
        Command::Languages => {
            print_languages();
            Ok(())
        }
        Command::WriteConfig { path } => write_config(path.as_deref().unwrap_or(&config_path)),
    }
}

fn run_resolve(config: &ConfigManager, args: &ResolveArgs) -> Result<()> {
    let (source, outcome) = session::run(config, args)?;
    match outcome {
        Outcome::Finalized(upload) => {
            println!(
                "{}",
                session::render_request(&upload, &source, args.passthrough.as_deref())?
            );
        }
        Outcome::Cancelled => println!("Upload of '{}' cancelled", source.display_name()),
    }
    Ok(())
}

fn print_languages() {
    for language in list_languages() {
        println!("{:<4} {:<12} {}", language.code, language.label, language.maturity);
    }
}

fn write_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    ConfigManager::new(path)
        .save()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote default settings to {}", path.display());
    Ok(())
}
