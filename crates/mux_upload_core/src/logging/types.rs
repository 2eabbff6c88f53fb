//! Log level as written in the `[logging]` table.

use serde::{Deserialize, Serialize};
use tracing::Level;

/// Minimum severity printed when `RUST_LOG` is unset.
///
/// The engine logs controller transitions at `info` and ignored edits at
/// `debug`, so `info` shows what an upload did without the noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Level picked by repeated `-v` flags. Zero keeps `configured`.
    pub fn from_verbosity(count: u8, configured: LogLevel) -> Self {
        match count {
            0 => configured,
            1 => configured.min(LogLevel::Debug),
            _ => LogLevel::Trace,
        }
    }

    pub fn to_tracing_level(&self) -> Level {
        match self {
            Self::Trace => Level::TRACE,
            Self::Debug => Level::DEBUG,
            Self::Info => Level::INFO,
            Self::Warn => Level::WARN,
            Self::Error => Level::ERROR,
        }
    }

    /// Directive for `EnvFilter`, same spelling as the settings file.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}
