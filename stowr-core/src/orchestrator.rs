//! Contains the logic for copying a selected file into app storage.
//!
//! A copy runs on a worker thread and is observed as a stream of
//! [`CopyEvent`]s: zero or more progress ticks, then either `Failed` or
//! `Completed` once the file has landed in the documents directory. On
//! platforms with cache mirroring, `Completed` is followed by the outcome of
//! the mirror copy, `Mirrored` or `Failed`. The mirror reports no progress.
use crate::copy::Copier;
use crate::error::CopyError;
use crate::file_ref::FileRef;
use crate::platform::{Capabilities, StorageLocations};
use crate::progress::Progress;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

/// The concrete copies a request resolves to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CopyPlan {
    pub source: PathBuf,
    /// `<documents>/<file name>`.
    pub destination: PathBuf,
    /// `<cache>/<file name>`, when the platform mirrors into the cache.
    pub mirror: Option<PathBuf>,
}

/// The outcome of a successful copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CopyReport {
    pub destination: PathBuf,
    /// Set once the cache mirror has been written.
    pub mirror: Option<PathBuf>,
    pub bytes: u64,
}

#[derive(Clone, Debug)]
pub enum CopyEvent {
    Progress(Progress),
    /// The primary copy landed in the documents directory.
    Completed(CopyReport),
    /// The cache mirror landed at this path.
    Mirrored(PathBuf),
    /// The primary copy, or the mirror after it, failed.
    Failed(CopyError),
}

/// Copies selected files into the documents directory.
#[derive(Clone)]
pub struct CopyOrchestrator {
    copier: Arc<dyn Copier>,
    locations: StorageLocations,
    capabilities: Capabilities,
}

impl CopyOrchestrator {
    pub fn new(
        copier: Arc<dyn Copier>,
        locations: StorageLocations,
        capabilities: Capabilities,
    ) -> Self {
        Self {
            copier,
            locations,
            capabilities,
        }
    }

    pub fn locations(&self) -> &StorageLocations {
        &self.locations
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Resolves where `file` will be copied to, keeping its original name.
    pub fn plan(&self, file: &FileRef) -> Result<CopyPlan, CopyError> {
        let source = file.to_path()?;
        let name = file
            .file_name()
            .ok_or_else(|| CopyError::invalid(file.uri().as_str(), "reference has no file name"))?;

        Ok(CopyPlan {
            source,
            destination: self.locations.documents.join(&name),
            mirror: self
                .capabilities
                .mirror_to_cache
                .then(|| self.locations.cache.join(&name)),
        })
    }

    /// Starts copying `file` on a worker thread.
    pub fn start(&self, file: &FileRef) -> Result<CopyTask, CopyError> {
        let plan = self.plan(file)?;
        let copier = Arc::clone(&self.copier);
        let (tx, rx) = mpsc::channel();

        info!(
            source = %plan.source.display(),
            destination = %plan.destination.display(),
            "starting copy"
        );

        let worker = thread::Builder::new()
            .name("stowr-copy".into())
            .spawn(move || {
                // Sends fail only once the receiver is gone; nothing is left
                // to report to then.
                let fail = |stage: &str, e: anyhow::Error| {
                    let reason = format!("{e:#}");
                    warn!(error = %reason, "{stage} failed");
                    let _ = tx.send(CopyEvent::Failed(CopyError::failed(&e)));
                };

                let bytes = match copier.copy(&plan.source, &plan.destination, &mut |progress| {
                    let _ = tx.send(CopyEvent::Progress(progress));
                }) {
                    Ok(bytes) => bytes,
                    Err(e) => return fail("copy", e),
                };
                info!(bytes, "copy complete");
                let _ = tx.send(CopyEvent::Completed(CopyReport {
                    destination: plan.destination.clone(),
                    mirror: None,
                    bytes,
                }));

                if let Some(mirror) = plan.mirror {
                    debug!(mirror = %mirror.display(), "mirroring into cache");
                    match copier.copy(&plan.destination, &mirror, &mut |_| {}) {
                        Ok(_) => {
                            let _ = tx.send(CopyEvent::Mirrored(mirror));
                        }
                        Err(e) => fail("cache mirror", e),
                    }
                }
            })
            .map_err(|e| CopyError::failed(&anyhow::Error::from(e)))?;

        Ok(CopyTask {
            events: rx,
            worker: Some(worker),
        })
    }
}

/// A running copy. Iterating yields its events in order and ends once the
/// worker is done.
pub struct CopyTask {
    events: Receiver<CopyEvent>,
    worker: Option<JoinHandle<()>>,
}

impl Iterator for CopyTask {
    type Item = CopyEvent;

    fn next(&mut self) -> Option<CopyEvent> {
        if let Ok(event) = self.events.recv() {
            return Some(event);
        }
        // The worker hung up. If it panicked, report that as a failure once.
        let worker = self.worker.take()?;
        match worker.join() {
            Ok(()) => None,
            Err(_) => Some(CopyEvent::Failed(CopyError::Failed(Arc::from(
                "copy worker panicked",
            )))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::copy::FsCopier;
    use anyhow::Result;
    use std::fs;
    use std::path::Path;

    struct PanickingCopier;

    impl Copier for PanickingCopier {
        fn copy(&self, _: &Path, _: &Path, _: &mut dyn FnMut(Progress)) -> Result<u64> {
            panic!("surface exploded");
        }
    }

    fn locations(root: &Path) -> StorageLocations {
        StorageLocations::new(root.join("documents"), root.join("cache")).unwrap()
    }

    #[test]
    fn plan_keeps_the_original_file_name() {
        let root = tempfile::tempdir().unwrap();
        let orchestrator = CopyOrchestrator::new(
            Arc::new(FsCopier),
            locations(root.path()),
            Capabilities {
                mirror_to_cache: true,
            },
        );
        let file = FileRef::from_path(&root.path().join("inbox/notes.txt")).unwrap();

        let plan = orchestrator.plan(&file).unwrap();
        assert_eq!(plan.destination, root.path().join("documents/notes.txt"));
        assert_eq!(plan.mirror, Some(root.path().join("cache/notes.txt")));
    }

    #[test]
    fn plan_without_mirroring_has_no_cache_step() {
        let root = tempfile::tempdir().unwrap();
        let orchestrator = CopyOrchestrator::new(
            Arc::new(FsCopier),
            locations(root.path()),
            Capabilities::default(),
        );
        let file = FileRef::from_path(&root.path().join("notes.txt")).unwrap();
        assert_eq!(orchestrator.plan(&file).unwrap().mirror, None);
    }

    #[test]
    fn events_end_with_a_single_completion() {
        let root = tempfile::tempdir().unwrap();
        let source = root.path().join("photo.raw");
        fs::write(&source, vec![7u8; 200_000]).unwrap();

        let orchestrator = CopyOrchestrator::new(
            Arc::new(FsCopier),
            locations(root.path()),
            Capabilities::default(),
        );
        let events: Vec<_> = orchestrator
            .start(&FileRef::from_path(&source).unwrap())
            .unwrap()
            .collect();

        let (last, ticks) = events.split_last().unwrap();
        assert!(ticks.iter().all(|e| matches!(e, CopyEvent::Progress(_))));
        match last {
            CopyEvent::Completed(report) => {
                assert_eq!(report.bytes, 200_000);
                assert_eq!(fs::read(&report.destination).unwrap().len(), 200_000);
            }
            other => panic!("unexpected terminal event: {other:?}"),
        }
    }

    #[test]
    fn mirror_outcome_follows_the_completion() {
        let root = tempfile::tempdir().unwrap();
        let source = root.path().join("notes.txt");
        fs::write(&source, b"").unwrap();
        let locations = locations(root.path());
        // A directory in the way makes the mirror copy fail.
        fs::create_dir(locations.cache.join("notes.txt")).unwrap();

        let orchestrator = CopyOrchestrator::new(
            Arc::new(FsCopier),
            locations,
            Capabilities {
                mirror_to_cache: true,
            },
        );
        let events: Vec<_> = orchestrator
            .start(&FileRef::from_path(&source).unwrap())
            .unwrap()
            .collect();

        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], CopyEvent::Completed(r) if r.mirror.is_none()));
        assert!(matches!(events[1], CopyEvent::Failed(CopyError::Failed(_))));
        assert!(root.path().join("documents/notes.txt").is_file());
    }

    #[test]
    fn successful_mirror_is_reported_after_completion() {
        let root = tempfile::tempdir().unwrap();
        let source = root.path().join("notes.txt");
        fs::write(&source, b"hello").unwrap();

        let orchestrator = CopyOrchestrator::new(
            Arc::new(FsCopier),
            locations(root.path()),
            Capabilities {
                mirror_to_cache: true,
            },
        );
        let events: Vec<_> = orchestrator
            .start(&FileRef::from_path(&source).unwrap())
            .unwrap()
            .collect();

        let cache = root.path().join("cache/notes.txt");
        let (last, rest) = events.split_last().unwrap();
        assert!(matches!(rest.last(), Some(CopyEvent::Completed(_))));
        assert!(matches!(last, CopyEvent::Mirrored(path) if *path == cache));
        assert_eq!(fs::read(&cache).unwrap(), b"hello");
    }

    #[test]
    fn missing_source_fails_once() {
        let root = tempfile::tempdir().unwrap();
        let orchestrator = CopyOrchestrator::new(
            Arc::new(FsCopier),
            locations(root.path()),
            Capabilities::default(),
        );
        let file = FileRef::from_path(&root.path().join("gone.bin")).unwrap();
        let events: Vec<_> = orchestrator.start(&file).unwrap().collect();

        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], CopyEvent::Failed(CopyError::Failed(_))));
    }

    #[test]
    fn worker_panic_becomes_a_failure() {
        let root = tempfile::tempdir().unwrap();
        let orchestrator = CopyOrchestrator::new(
            Arc::new(PanickingCopier),
            locations(root.path()),
            Capabilities::default(),
        );
        let file = FileRef::from_path(&root.path().join("a.bin")).unwrap();
        let events: Vec<_> = orchestrator.start(&file).unwrap().collect();

        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], CopyEvent::Failed(_)));
    }
}
