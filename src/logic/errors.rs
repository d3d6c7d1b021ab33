use anyhow::Error;
use std::path::PathBuf;

/// Errors raised by the picker core. All of them are recovered at the user
/// action that triggered them and shown as a message.
#[derive(thiserror::Error, Debug)]
pub enum PickerError {
    /// Storage enumeration failed; the listing stays on its previous state
    #[error("cannot read directory {}: {source}", .path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Confirm pressed with nothing selected
    #[error("nothing is selected")]
    SelectionRequired,
    /// Target directory not writable for a save/folder operation
    #[error("no write permission for {}", .path.display())]
    PermissionDenied { path: PathBuf },
    /// Empty or extension-mismatched name on save
    #[error("invalid file name: {reason}")]
    InvalidFileName { reason: String },
    /// No program available to handle the system picker request
    #[error("no picker available ({program})")]
    PickerUnavailable { program: String },
    /// The picker program ran but failed
    #[error("{program} failed: {reason}")]
    PickerFailed { program: String, reason: String },
    /// The chosen file could not be created
    #[error("cannot create {}: {source}", .path.display())]
    CreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Format an error for the toast line.
///
/// A `PickerError` anywhere in the chain wins (its message already names the
/// path); otherwise the deepest cause is shown.
pub fn format_error_message(error: &Error) -> String {
    for cause in error.chain() {
        if let Some(picker_err) = cause.downcast_ref::<PickerError>() {
            return picker_err.to_string();
        }
    }

    let mut source = error.source();
    let mut deepest = error.to_string();

    while let Some(err) = source {
        deepest = err.to_string();
        source = err.source();
    }

    deepest
}
