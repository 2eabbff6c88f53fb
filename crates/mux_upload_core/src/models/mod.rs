//! Data models for the upload configuration engine.
//!
//! This module contains the plain data structures shared across the crate:
//! - Enums for encoding tier, resolution tier and mp4 support
//! - The working `UploadConfig` and the staged `UploadSource`
//! - Deployment `Secrets`

mod enums;
mod secrets;
mod upload;

// Re-export all public types
pub use enums::{EncodingTier, MaxResolutionTier, Mp4Support, ParseEnumError};
pub use secrets::Secrets;
pub use upload::{format_bytes, SourceFile, UploadConfig, UploadSource};
