use console::style;
use indicatif::ProgressBar;
use std::cell::RefCell;
use stowr_core::notice::{Notice, Notifier};

/// Prints notices to the terminal.
///
/// While a progress bar is attached, notices are printed with the bar
/// suspended so they do not tear its line.
#[derive(Default)]
pub struct ConsoleNotifier {
    bar: RefCell<Option<ProgressBar>>,
}

impl ConsoleNotifier {
    pub fn attach(&self, bar: &ProgressBar) {
        *self.bar.borrow_mut() = Some(bar.clone());
    }

    pub fn detach(&self) {
        self.bar.borrow_mut().take();
    }
}

fn render(notice: Notice) -> String {
    let title = format!("{}:", notice.title());
    let title = if notice.is_error() {
        style(title).red().bold()
    } else {
        style(title).green().bold()
    };
    format!("{} {}", title, notice.message())
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        let line = render(notice);
        match self.bar.borrow().as_ref() {
            Some(bar) => bar.suspend(|| println!("{line}")),
            None => println!("{line}"),
        }
    }
}
