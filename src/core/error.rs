//! Defines the custom error type for the `core` module.

use thiserror::Error;

/// The primary error type for the `core` module.
///
/// Covers failures of the two external collaborators: the native pickers and
/// the preview endpoint. A cancelled dialog is not an error and never shows up here.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The native picker invocation itself failed.
    #[error("File dialog failed: {0}")]
    Dialog(String),

    /// The preview request could not be sent or its body could not be read.
    #[error("Preview request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The preview endpoint answered with a non-success status.
    #[error("Preview endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The preview endpoint answered with a body that is not a list of previews.
    #[error("Malformed preview payload: {0}")]
    MalformedPayload(#[source] serde_json::Error),

    /// The configured preview base URL cannot be used to build a request.
    #[error("Invalid preview base URL: {0}")]
    InvalidUrl(String),
}

impl CoreError {
    /// `true` for failures raised while acquiring paths from a picker.
    pub fn is_dialog_failure(&self) -> bool {
        matches!(self, CoreError::Dialog(_))
    }

    /// `true` for failures raised while retrieving previews.
    pub fn is_preview_failure(&self) -> bool {
        !self.is_dialog_failure()
    }
}
