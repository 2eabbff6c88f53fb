//! Error and outcome types for the upload controller.
//!
//! Only a failed `confirm()` is an error. Everything else the editor might
//! try that is not currently allowed is ignored, and the reason is reported
//! back as an [`IgnoredEdit`] so callers can log it.

use thiserror::Error;

use super::edit::ConfigField;
use super::ControllerState;

/// Errors returned by `UploadController::confirm`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// A field that must be filled in before uploading is empty.
    #[error("Cannot start upload: required field '{field}' is missing")]
    MissingRequiredField { field: ConfigField },

    /// The controller is not waiting for confirmation.
    #[error("Cannot confirm upload while {state}")]
    NotInteractive { state: ControllerState },
}

impl UploadError {
    pub fn missing_required_field(field: ConfigField) -> Self {
        Self::MissingRequiredField { field }
    }

    pub fn not_interactive(state: ControllerState) -> Self {
        Self::NotInteractive { state }
    }
}

/// Result type for controller operations.
pub type UploadResult<T> = Result<T, UploadError>;

/// Why an edit was not applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IgnoredEdit {
    /// The field is not editable with the current tier, ceiling or secrets.
    #[error("Field '{field}' cannot be set to '{value}' right now")]
    IllegalField { field: ConfigField, value: String },

    /// Edits are only accepted while the dialog is open.
    #[error("Edits are not accepted while {state}")]
    NotInteractive { state: ControllerState },

    /// The plugin hides the text track editor.
    #[error("Text track editing is disabled")]
    TextTracksDisabled,

    #[error("An autogenerated track for language '{code}' already exists")]
    DuplicateAutogeneratedLanguage { code: String },

    #[error("A track with id '{id}' already exists")]
    DuplicateTrackId { id: String },

    #[error("No track with id '{id}'")]
    UnknownTrack { id: String },
}

/// Result of an edit operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    Ignored(IgnoredEdit),
}

impl EditOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    pub fn ignored_reason(&self) -> Option<&IgnoredEdit> {
        match self {
            Self::Applied => None,
            Self::Ignored(reason) => Some(reason),
        }
    }
}
