//! The file copy screen: selection, copy and progress wired together.
use crate::notice::{Notice, Notifier};
use crate::orchestrator::{CopyEvent, CopyOrchestrator, CopyReport};
use crate::picker::FilePicker;
use crate::state::ScreenState;
use tracing::{debug, warn};

/// Drives a [`ScreenState`] from user actions.
///
/// Every failure ends the triggering action and is surfaced through the
/// [`Notifier`]; nothing is retried.
pub struct CopyScreen<N: Notifier> {
    state: ScreenState,
    orchestrator: CopyOrchestrator,
    notifier: N,
}

impl<N: Notifier> CopyScreen<N> {
    pub fn new(orchestrator: CopyOrchestrator, notifier: N) -> Self {
        Self {
            state: ScreenState::new(),
            orchestrator,
            notifier,
        }
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn orchestrator(&self) -> &CopyOrchestrator {
        &self.orchestrator
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Asks `picker` for a file and selects it.
    ///
    /// Cancelling leaves the screen untouched.
    pub fn pick(&mut self, picker: &mut dyn FilePicker) {
        match picker.pick() {
            Ok(Some(file)) => {
                debug!(file = %file, "file selected");
                self.state.select(file);
            }
            Ok(None) => debug!("file selection cancelled"),
            Err(e) => {
                warn!(error = %e, "file selection failed");
                self.notifier.notify(Notice::SelectionFailed);
            }
        }
    }

    pub fn clear(&mut self) {
        self.state.clear();
    }

    /// Copies the selected file, calling `on_progress` with the displayed
    /// percentage after every state change.
    ///
    /// Blocks until the copy and any cache mirror are done. A successful
    /// primary copy forces 100% and shows the success notice before the
    /// mirror runs; a mirror failure then shows the copy error as well.
    ///
    /// Returns the report when every step succeeded and `None` when the copy
    /// was refused or a step failed.
    pub fn copy(&mut self, mut on_progress: impl FnMut(u8)) -> Option<CopyReport> {
        // This call holds `&mut self` until the copy ends, so the only way
        // `begin_copy` fails here is a missing selection.
        let Ok(file) = self.state.begin_copy() else {
            self.notifier.notify(Notice::NoSelection);
            return None;
        };

        let task = match self.orchestrator.start(&file) {
            Ok(task) => task,
            Err(e) => {
                warn!(error = %e, "copy could not start");
                self.fail();
                return None;
            }
        };

        let mut report = None;
        for event in task {
            match event {
                CopyEvent::Progress(progress) => {
                    self.state.progress_update(progress.percent());
                    on_progress(self.state.progress());
                }
                CopyEvent::Completed(primary) => {
                    self.state.complete_success();
                    on_progress(self.state.progress());
                    self.notifier.notify(Notice::CopySucceeded);
                    report = Some(primary);
                }
                CopyEvent::Mirrored(path) => {
                    debug!(mirror = %path.display(), "cache mirror written");
                    if let Some(report) = report.as_mut() {
                        report.mirror = Some(path);
                    }
                }
                CopyEvent::Failed(_) => {
                    // Progress is left as is: 100 after a landed primary
                    // copy, the last tick otherwise.
                    self.fail();
                    return None;
                }
            }
        }

        if report.is_none() {
            // Channel closed before the primary copy finished.
            self.fail();
        }
        report
    }

    fn fail(&mut self) {
        self.state.complete_failure();
        self.notifier.notify(Notice::CopyFailed);
    }
}
