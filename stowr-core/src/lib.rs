//! The core, UI-agnostic library for the `stowr` file copy utility.
//!
//! `stowr-core` is designed to be used as a library by any front-end, whether it's
//! a command-line interface (like `stowr`) or a graphical user interface. It
//! models a single "copy screen": the user picks a file, the file is copied into
//! the app's documents directory, and the screen shows a percentage while the
//! copy runs.
//!
//! The library is structured into several key modules:
//! - [`file_ref`]: The `FileRef` URI type used for sources and destinations.
//! - [`platform`]: Storage locations and per-platform capabilities.
//! - [`copy`]: The progress-reporting copy surface.
//! - [`orchestrator`]: Runs a copy on a worker thread as a stream of events.
//! - [`state`] and [`screen`]: The screen state machine and its driver.
//!
//! The primary entry point is [`screen::CopyScreen`]. It reports progress via a
//! callback, allowing the calling application to display progress in any way it
//! chooses, and surfaces every outcome through a [`notice::Notifier`].
//!
//! ## Example: Copying a File with Progress Reporting
//!
//! ```rust,no_run
//! use stowr_core::copy::FsCopier;
//! use stowr_core::file_ref::FileRef;
//! use stowr_core::notice::{Notice, Notifier};
//! use stowr_core::orchestrator::CopyOrchestrator;
//! use stowr_core::picker::FilePicker;
//! use stowr_core::platform::{Capabilities, StorageLocations};
//! use stowr_core::screen::CopyScreen;
//! use stowr_core::error::PickError;
//! use std::sync::Arc;
//! use anyhow::Result;
//!
//! struct Print;
//! impl Notifier for Print {
//!     fn notify(&self, notice: Notice) {
//!         println!("{notice}");
//!     }
//! }
//!
//! struct Fixed(&'static str);
//! impl FilePicker for Fixed {
//!     fn pick(&mut self) -> Result<Option<FileRef>, PickError> {
//!         Ok(Some(FileRef::parse(self.0)?))
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     let orchestrator = CopyOrchestrator::new(
//!         Arc::new(FsCopier),
//!         StorageLocations::resolve()?,
//!         Capabilities::detect(),
//!     );
//!     let mut screen = CopyScreen::new(orchestrator, Print);
//!
//!     screen.pick(&mut Fixed("path/to/report.pdf"));
//!     screen.copy(|percent| println!("{percent}%"));
//!
//!     Ok(())
//! }
//! ```

pub mod copy;
pub mod error;
pub mod file_ref;
pub mod notice;
pub mod orchestrator;
pub mod picker;
pub mod platform;
pub mod progress;
pub mod screen;
pub mod state;
