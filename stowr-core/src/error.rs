//! Error types surfaced by the copy screen.
use std::sync::Arc;
use thiserror::Error;

/// Errors that end a copy request.
///
/// Every variant is terminal for the action that produced it. The front-end
/// maps them onto user notices; no variant is retried automatically.
#[derive(Error, Debug, Clone)]
pub enum CopyError {
    /// A copy was requested with no file selected.
    #[error("no file selected")]
    NoSelection,

    /// A copy is already in flight.
    #[error("a copy is already in progress")]
    Busy,

    /// The file reference could not be used as a copy source.
    #[error("invalid file reference '{reference}': {reason}")]
    InvalidReference {
        reference: Arc<str>,
        reason: &'static str,
    },

    /// The copy surface failed during the primary or the mirror copy.
    #[error("copy failed: {0}")]
    Failed(Arc<str>),
}

impl CopyError {
    pub(crate) fn invalid(reference: impl AsRef<str>, reason: &'static str) -> Self {
        Self::InvalidReference {
            reference: Arc::from(reference.as_ref()),
            reason,
        }
    }

    pub(crate) fn failed(err: &anyhow::Error) -> Self {
        Self::Failed(Arc::from(format!("{err:#}")))
    }
}

/// Errors raised while choosing a file.
///
/// Cancellation is not an error; pickers report it as `Ok(None)`.
#[derive(Error, Debug)]
pub enum PickError {
    #[error("could not read directory {path}: {source}")]
    ReadDir {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("prompt failed: {0}")]
    Prompt(String),

    #[error(transparent)]
    Reference(#[from] CopyError),
}
