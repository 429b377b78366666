//! User-facing notices.
use std::fmt;

/// A modal-style message shown to the user. Notices are fire-and-forget: the
/// screen never waits on a response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    /// Choosing a file failed for a reason other than cancellation.
    SelectionFailed,
    /// A copy was requested with no file selected.
    NoSelection,
    CopySucceeded,
    /// The primary or the mirror copy failed.
    CopyFailed,
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Notice::CopySucceeded => "Success",
            _ => "Error",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Notice::SelectionFailed => "An error occurred while selecting the file.",
            Notice::NoSelection => "Please select a file first.",
            Notice::CopySucceeded => "The file was copied successfully.",
            Notice::CopyFailed => "An error occurred while copying the file.",
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Notice::CopySucceeded)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title(), self.message())
    }
}

/// Delivers notices to the user.
pub trait Notifier {
    fn notify(&self, notice: Notice);
}
