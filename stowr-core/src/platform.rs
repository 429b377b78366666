//! Provides platform-specific functionality.
//!
//! This module resolves the two storage areas the app copies into and the
//! capabilities that differ between platform families. Nothing outside this
//! module inspects the target OS; the rest of the library branches on the
//! [`Capabilities`] value resolved here once at startup.

use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

const APP_DIR: &str = "stowr";

/// The app's private storage areas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageLocations {
    /// Persistent storage for copied files.
    pub documents: PathBuf,
    /// Transient storage that the platform may purge at any time.
    pub cache: PathBuf,
}

impl StorageLocations {
    /// Uses explicit directories. Both are created if missing.
    pub fn new(documents: impl Into<PathBuf>, cache: impl Into<PathBuf>) -> Result<Self> {
        let locations = Self {
            documents: documents.into(),
            cache: cache.into(),
        };
        locations.ensure_exists()?;
        Ok(locations)
    }

    /// Resolves the locations from the user's data and cache directories.
    ///
    /// Documents live under `<data dir>/stowr/documents` and the cache under
    /// `<cache dir>/stowr`.
    pub fn resolve() -> Result<Self> {
        let data = dirs_next::data_dir()
            .ok_or_else(|| anyhow!("Could not determine the user data directory."))?;
        let cache = dirs_next::cache_dir()
            .ok_or_else(|| anyhow!("Could not determine the user cache directory."))?;
        Self::new(data.join(APP_DIR).join("documents"), cache.join(APP_DIR))
    }

    /// The documents directory as a URI prefix.
    pub fn documents_uri(&self) -> Result<Url> {
        directory_uri(&self.documents)
    }

    /// The cache directory as a URI prefix.
    pub fn cache_uri(&self) -> Result<Url> {
        directory_uri(&self.cache)
    }

    fn ensure_exists(&self) -> Result<()> {
        for dir in [&self.documents, &self.cache] {
            fs::create_dir_all(dir)
                .with_context(|| format!("Could not create {}", dir.display()))?;
        }
        Ok(())
    }
}

fn directory_uri(dir: &Path) -> Result<Url> {
    let absolute = std::path::absolute(dir)?;
    Url::from_directory_path(&absolute)
        .map_err(|_| anyhow!("Could not express {} as a URI", absolute.display()))
}

/// Behaviour that varies by platform family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// After a successful copy, stage a second copy of the file in the cache
    /// directory.
    pub mirror_to_cache: bool,
}

impl Capabilities {
    /// Detects the capabilities of the platform this binary was built for.
    ///
    /// Cache mirroring is enabled on the Apple platform family only.
    pub fn detect() -> Self {
        Self {
            mirror_to_cache: cfg!(target_vendor = "apple"),
        }
    }
}
