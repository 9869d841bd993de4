//! Output formatting utilities

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use exceptional_core::DayOffStatus;
use indicatif::ProgressBar;

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Spinner shown while a server call is in flight
///
/// Call `finish_and_clear` before printing the outcome.
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Table cell for a request status, colored to match
pub fn status_cell(status: DayOffStatus) -> Cell {
    let color = match status {
        DayOffStatus::Pending => Color::Yellow,
        DayOffStatus::Approved => Color::Green,
        DayOffStatus::Refused => Color::Red,
    };
    Cell::new(status.to_string()).fg(color)
}
