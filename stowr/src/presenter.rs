//! Renders the screen state: the selected file, a percentage label and a bar.
use console::style;
use std::io::{self, Write};
use stowr_core::progress::filled_width;
use stowr_core::state::ScreenState;

pub const BAR_WIDTH: usize = 40;

/// The bar body for `percent`, without styling.
pub fn bar(percent: u8, width: usize) -> String {
    let filled = filled_width(percent, width);
    format!("{}{}", "■".repeat(filled), " ".repeat(width - filled))
}

/// The line describing the current selection, without styling.
pub fn selection_line(state: &ScreenState) -> String {
    match state.selected() {
        Some(file) => format!("Selected file: {file}"),
        None => "No file selected".to_string(),
    }
}

pub fn draw(out: &mut impl Write, state: &ScreenState) -> io::Result<()> {
    let selection = selection_line(state);
    let selection = if state.selected().is_some() {
        style(selection).cyan()
    } else {
        style(selection).dim()
    };
    let percent = state.progress();

    writeln!(out)?;
    writeln!(out, "{}", style("Select a file to copy:").bold())?;
    writeln!(out, "  {selection}")?;
    writeln!(out, "  {:>width$}", format!("{percent}%"), width = BAR_WIDTH / 2 + 2)?;
    writeln!(out, "  [{}]", style(bar(percent, BAR_WIDTH)).green())?;
    writeln!(out)
}
