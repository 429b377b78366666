//! The screen's transient state and its transitions.
use crate::error::CopyError;
use crate::file_ref::FileRef;

/// Where the screen is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No file selected.
    Idle,
    /// A file is selected and no copy is running.
    Selected,
    /// A copy of the selected file is in flight.
    Copying,
}

/// The selected file and the last reported copy percentage.
///
/// State only changes through the transition methods. Nothing is persisted.
#[derive(Clone, Debug, Default)]
pub struct ScreenState {
    selected: Option<FileRef>,
    progress: u8,
    copying: bool,
}

impl ScreenState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&FileRef> {
        self.selected.as_ref()
    }

    /// The displayed percentage, in `0..=100`.
    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn phase(&self) -> Phase {
        match (&self.selected, self.copying) {
            (_, true) => Phase::Copying,
            (Some(_), false) => Phase::Selected,
            (None, false) => Phase::Idle,
        }
    }

    /// Selects a new file and resets progress. Ignored while copying.
    pub fn select(&mut self, file: FileRef) -> bool {
        if self.copying {
            return false;
        }
        self.selected = Some(file);
        self.progress = 0;
        true
    }

    /// Drops the selection and resets progress. Ignored while copying.
    pub fn clear(&mut self) -> bool {
        if self.copying {
            return false;
        }
        self.selected = None;
        self.progress = 0;
        true
    }

    /// Enters `Copying` and returns the file to copy.
    ///
    /// Fails with [`CopyError::NoSelection`] when nothing is selected and with
    /// [`CopyError::Busy`] when a copy is already running.
    pub fn begin_copy(&mut self) -> Result<FileRef, CopyError> {
        if self.copying {
            return Err(CopyError::Busy);
        }
        let file = self.selected.clone().ok_or(CopyError::NoSelection)?;
        self.copying = true;
        Ok(file)
    }

    /// Applies a progress tick. `None` (indeterminate) keeps the last value.
    pub fn progress_update(&mut self, percent: Option<u8>) {
        if !self.copying {
            return;
        }
        if let Some(percent) = percent {
            self.progress = percent.min(100);
        }
    }

    /// Ends the copy and shows it as complete.
    pub fn complete_success(&mut self) {
        if self.copying {
            self.copying = false;
            self.progress = 100;
        }
    }

    /// Ends the copy, leaving progress at its last reported value.
    pub fn complete_failure(&mut self) {
        self.copying = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> FileRef {
        FileRef::parse(name).unwrap()
    }

    #[test]
    fn select_resets_progress() {
        let mut state = ScreenState::new();
        assert_eq!(state.phase(), Phase::Idle);

        state.select(file("a.bin"));
        state.begin_copy().unwrap();
        state.progress_update(Some(40));
        state.complete_failure();
        assert_eq!(state.progress(), 40);

        assert!(state.select(file("b.bin")));
        assert_eq!(state.phase(), Phase::Selected);
        assert_eq!(state.progress(), 0);
        assert_eq!(state.selected().unwrap().file_name().as_deref(), Some("b.bin"));
    }

    #[test]
    fn clear_always_returns_to_idle() {
        let mut state = ScreenState::new();
        assert!(state.clear());
        assert_eq!(state.phase(), Phase::Idle);

        state.select(file("a.bin"));
        state.begin_copy().unwrap();
        state.complete_success();
        assert_eq!(state.progress(), 100);

        assert!(state.clear());
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.progress(), 0);
        assert!(state.selected().is_none());
    }

    #[test]
    fn begin_copy_requires_a_selection() {
        let mut state = ScreenState::new();
        assert!(matches!(state.begin_copy(), Err(CopyError::NoSelection)));
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.progress(), 0);
    }

    #[test]
    fn second_copy_is_refused_while_one_runs() {
        let mut state = ScreenState::new();
        state.select(file("a.bin"));
        state.begin_copy().unwrap();
        assert!(matches!(state.begin_copy(), Err(CopyError::Busy)));
        assert!(!state.select(file("b.bin")));
        assert!(!state.clear());
        assert_eq!(state.phase(), Phase::Copying);

        state.complete_success();
        assert!(state.begin_copy().is_ok());
    }

    #[test]
    fn indeterminate_ticks_keep_the_last_value() {
        let mut state = ScreenState::new();
        state.select(file("a.bin"));
        state.begin_copy().unwrap();
        state.progress_update(None);
        assert_eq!(state.progress(), 0);
        state.progress_update(Some(30));
        state.progress_update(None);
        assert_eq!(state.progress(), 30);
    }

    #[test]
    fn ticks_outside_a_copy_are_ignored() {
        let mut state = ScreenState::new();
        state.select(file("a.bin"));
        state.progress_update(Some(55));
        assert_eq!(state.progress(), 0);
        state.complete_success();
        assert_eq!(state.progress(), 0);
    }
}
