//! Mux Upload Core - upload configuration engine for the Mux video input plugin
//!
//! This crate contains the logic that turns developer policy, schema overrides
//! and editor choices into one consistent upload configuration. It has zero UI
//! dependencies; the CMS dialog (or the `mux-upload` CLI) drives it.

pub mod config;
pub mod controller;
pub mod languages;
pub mod logging;
pub mod models;
pub mod request;
pub mod resolve;
pub mod tracks;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
