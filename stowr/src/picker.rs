//! Terminal implementations of the file selection contract.
use dialoguer::{Select, theme::ColorfulTheme};
use std::fs;
use std::path::{Path, PathBuf};
use stowr_core::error::PickError;
use stowr_core::file_ref::FileRef;
use stowr_core::picker::FilePicker;

/// An entry shown in the browser menu.
#[derive(Debug, PartialEq, Eq)]
struct Entry {
    path: PathBuf,
    label: String,
    is_dir: bool,
}

/// Lists `dir` with directories first, each group sorted by name.
///
/// Nothing is filtered: hidden files and every file type are shown.
fn list_dir(dir: &Path) -> Result<Vec<Entry>, PickError> {
    let read_dir = fs::read_dir(dir).map_err(|source| PickError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut entries: Vec<Entry> = read_dir
        .filter_map(Result::ok)
        .map(|entry| {
            let path = entry.path();
            let is_dir = path.is_dir();
            let name = entry.file_name().to_string_lossy().into_owned();
            let label = if is_dir { format!("{name}/") } else { name };
            Entry {
                path,
                label,
                is_dir,
            }
        })
        .collect();

    entries.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.label.cmp(&b.label)));
    Ok(entries)
}

/// Browses the filesystem with an interactive menu.
///
/// Starts in the home directory and reopens wherever the last file was
/// picked. Escape cancels.
pub struct BrowsePicker {
    dir: PathBuf,
}

impl BrowsePicker {
    pub fn new() -> Self {
        let dir = dirs_next::home_dir()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        Self { dir }
    }
}

impl Default for BrowsePicker {
    fn default() -> Self {
        Self::new()
    }
}

impl FilePicker for BrowsePicker {
    fn pick(&mut self) -> Result<Option<FileRef>, PickError> {
        let mut dir = self.dir.clone();
        loop {
            let entries = list_dir(&dir)?;
            let mut items = vec!["../".to_string()];
            items.extend(entries.iter().map(|e| e.label.clone()));

            let choice = Select::with_theme(&ColorfulTheme::default())
                .with_prompt(format!("Select a file in {}", dir.display()))
                .items(&items)
                .default(0)
                .max_length(15)
                .interact_opt()
                .map_err(|e| PickError::Prompt(e.to_string()))?;

            let Some(choice) = choice else {
                return Ok(None);
            };

            if choice == 0 {
                if let Some(parent) = dir.parent() {
                    dir = parent.to_path_buf();
                }
                continue;
            }

            let entry = &entries[choice - 1];
            if entry.is_dir {
                dir = entry.path.clone();
                continue;
            }

            let file = FileRef::from_path(&entry.path)?;
            self.dir = dir;
            return Ok(Some(file));
        }
    }
}

/// Picks a file named up front, for non-interactive use.
pub struct PathPicker {
    input: Option<String>,
}

impl PathPicker {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: Some(input.into()),
        }
    }
}

impl FilePicker for PathPicker {
    fn pick(&mut self) -> Result<Option<FileRef>, PickError> {
        match self.input.take() {
            Some(input) => Ok(Some(FileRef::parse(&input)?)),
            None => Ok(None),
        }
    }
}
