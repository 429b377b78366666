use crate::error::CopyError;
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// A reference to a user-chosen file, held as a `file://` URI.
///
/// The same type addresses both sides of a copy: the picked source and the
/// destinations inside the app's storage locations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileRef {
    uri: Url,
}

impl FileRef {
    /// Parses a `file://` URI or a filesystem path.
    ///
    /// Relative paths are resolved against the current directory. Any other
    /// URI scheme is rejected.
    pub fn parse(input: &str) -> Result<Self, CopyError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(CopyError::invalid(input, "empty reference"));
        }

        if input.starts_with("file:") {
            let uri = Url::parse(input).map_err(|_| CopyError::invalid(input, "malformed URI"))?;
            // Round-trip through the path form to reject hosts and other
            // shapes that do not name a local file.
            uri.to_file_path()
                .map_err(|_| CopyError::invalid(input, "not a local file URI"))?;
            return Ok(Self { uri });
        }

        if let Some((scheme, _)) = input.split_once("://") {
            if !scheme.is_empty() && scheme.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(CopyError::invalid(input, "unsupported URI scheme"));
            }
        }

        Self::from_path(Path::new(input))
    }

    /// Builds a reference from a local path.
    pub fn from_path(path: &Path) -> Result<Self, CopyError> {
        let display = path.to_string_lossy();
        let absolute = std::path::absolute(path)
            .map_err(|_| CopyError::invalid(&display, "cannot resolve path"))?;
        let uri = Url::from_file_path(&absolute)
            .map_err(|_| CopyError::invalid(&display, "cannot express path as URI"))?;
        Ok(Self { uri })
    }

    /// The URI form of the reference.
    pub fn uri(&self) -> &Url {
        &self.uri
    }

    /// The local path the reference points at.
    pub fn to_path(&self) -> Result<PathBuf, CopyError> {
        self.uri
            .to_file_path()
            .map_err(|_| CopyError::invalid(self.uri.as_str(), "not a local file URI"))
    }

    /// The last path segment of the reference, percent-decoded.
    ///
    /// Returns `None` for references ending in `/`, which name a directory
    /// rather than a file.
    pub fn file_name(&self) -> Option<String> {
        if self.uri.path().ends_with('/') {
            return None;
        }
        let path = self.uri.to_file_path().ok()?;
        path.file_name().map(|name| name.to_string_lossy().into_owned())
    }
}

impl fmt::Display for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.uri.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn parses_file_uri_and_decodes_name() {
        let file = FileRef::parse("file:///tmp/quarterly%20report.pdf").unwrap();
        assert_eq!(file.file_name().as_deref(), Some("quarterly report.pdf"));
        assert_eq!(file.to_path().unwrap(), PathBuf::from("/tmp/quarterly report.pdf"));
        assert_eq!(file.to_string(), "file:///tmp/quarterly%20report.pdf");
    }

    #[cfg(unix)]
    #[test]
    fn plain_paths_become_file_uris() {
        let file = FileRef::parse("/var/data/notes.txt").unwrap();
        assert_eq!(file.uri().scheme(), "file");
        assert_eq!(file.file_name().as_deref(), Some("notes.txt"));
    }

    #[test]
    fn relative_paths_are_made_absolute() {
        let file = FileRef::parse("notes.txt").unwrap();
        assert!(file.to_path().unwrap().is_absolute());
        assert_eq!(file.file_name().as_deref(), Some("notes.txt"));
    }

    #[test]
    fn rejects_empty_and_foreign_schemes() {
        assert!(matches!(
            FileRef::parse("   "),
            Err(CopyError::InvalidReference { .. })
        ));
        assert!(matches!(
            FileRef::parse("content://media/external/42"),
            Err(CopyError::InvalidReference { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn directory_uri_has_no_file_name() {
        let dir = FileRef::parse("file:///tmp/somewhere/").unwrap();
        assert_eq!(dir.file_name(), None);
    }
}
