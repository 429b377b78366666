//! The file selection contract.
use crate::error::PickError;
use crate::file_ref::FileRef;

/// Presents a file chooser to the user.
///
/// Implementations must not filter by file type and must return the file's
/// original location, never a staged copy of it.
pub trait FilePicker {
    /// Returns the chosen file, or `Ok(None)` if the user cancelled.
    fn pick(&mut self) -> Result<Option<FileRef>, PickError>;
}
