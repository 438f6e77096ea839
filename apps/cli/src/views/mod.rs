//! Terminal renditions of the dashboard, feed and submission views.

pub mod dashboard;
pub mod feed;
pub mod submission;

use wealthjournal_core::dashboard::PnlDirection;

pub use dashboard::render_dashboard;
pub use feed::render_feed;

fn direction_marker(direction: PnlDirection) -> &'static str {
    match direction {
        PnlDirection::Up => "▲",
        PnlDirection::Down => "▼",
    }
}

fn status_box(completed: bool) -> &'static str {
    if completed {
        "[x]"
    } else {
        "[ ]"
    }
}

/// `[####......]` for a percentage in `[0, 100]`.
fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar_bounds() {
        assert_eq!(progress_bar(0.0, 4), "[....]");
        assert_eq!(progress_bar(50.0, 4), "[##..]");
        assert_eq!(progress_bar(250.0, 4), "[####]");
    }
}
