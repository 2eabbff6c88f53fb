//! Legal options derived from the current config.
//!
//! Recomputed after every edit and never stored next to the config.

use serde::Serialize;

use super::UploadCeiling;
use crate::models::{MaxResolutionTier, Secrets, UploadConfig};

/// One entry of the resolution picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolutionOption {
    pub value: MaxResolutionTier,
    pub label: &'static str,
    pub enabled: bool,
}

/// What the editing surface may currently offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegalOptions {
    /// Always `1080p, 1440p, 2160p`, in that order.
    pub resolution_options: Vec<ResolutionOption>,
    pub mp4_support_visible: bool,
    pub resolution_section_visible: bool,
}

impl LegalOptions {
    /// Values the editor may pick right now.
    pub fn selectable_resolutions(&self) -> Vec<MaxResolutionTier> {
        self.resolution_options
            .iter()
            .filter(|o| o.enabled)
            .map(|o| o.value)
            .collect()
    }
}

pub fn recompute_legal_options(config: &UploadConfig, ceiling: &UploadCeiling) -> LegalOptions {
    let smart = config.encoding_tier.is_smart();

    let resolution_options = MaxResolutionTier::all()
        .iter()
        .map(|&value| ResolutionOption {
            value,
            label: value.label(),
            enabled: smart && ceiling.allows_resolution(value),
        })
        .collect();

    LegalOptions {
        resolution_options,
        mp4_support_visible: smart && ceiling.mp4_support_allowed,
        // With a 1080p ceiling there is nothing to choose.
        resolution_section_visible: smart
            && ceiling.max_resolution_tier > MaxResolutionTier::Fhd1080p,
    }
}

/// Signed playback can only be toggled when the deployment has signing
/// enabled.
pub fn signed_visible(secrets: &Secrets) -> bool {
    secrets.enable_signed_urls
}
