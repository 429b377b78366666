//! Contains the file-copy surface.
//!
//! A [`Copier`] copies one file to one destination and reports cumulative
//! progress through a callback after every chunk. The orchestrator only talks
//! to this trait, so front-ends and tests can substitute their own surface.
use crate::progress::Progress;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

const CHUNK_SIZE: usize = 64 * 1024; // 64 KiB

/// A copy-by-location operation with progress reporting.
pub trait Copier: Send + Sync {
    /// Copies `from` to `to`, calling `on_progress` with cumulative byte
    /// counts while the transfer runs. Returns the number of bytes written.
    fn copy(
        &self,
        from: &Path,
        to: &Path,
        on_progress: &mut dyn FnMut(Progress),
    ) -> Result<u64>;
}

/// Copies files on the local filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsCopier;

impl Copier for FsCopier {
    fn copy(
        &self,
        from: &Path,
        to: &Path,
        on_progress: &mut dyn FnMut(Progress),
    ) -> Result<u64> {
        let mut source =
            File::open(from).with_context(|| format!("Could not open {}", from.display()))?;
        let expected = source.metadata()?.len();

        // Creating the destination would truncate the source.
        if same_file(from, to) {
            debug!(path = %from.display(), "source and destination are the same file");
            on_progress(Progress::new(expected, expected));
            return Ok(expected);
        }

        let mut destination =
            File::create(to).with_context(|| format!("Could not create {}", to.display()))?;

        let mut buffer = vec![0u8; CHUNK_SIZE];
        let mut written: u64 = 0;
        loop {
            let n = source.read(&mut buffer)?;
            if n == 0 {
                break;
            }
            destination.write_all(&buffer[..n])?;
            written += n as u64;
            on_progress(Progress::new(written, expected));
        }

        destination.flush()?;
        destination.sync_all()?;
        Ok(written)
    }
}

/// Whether both paths name the same file, including through hard links.
#[cfg(unix)]
fn same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (std::fs::metadata(a), std::fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
