use std::fmt::Write as _;

use wealthjournal_core::feed::FeedItem;
use wealthjournal_core::journal::split_data_url;
use wealthjournal_core::utils::format_utils::format_currency;

use super::{direction_marker, status_box};

pub fn render_feed(items: &[FeedItem]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Your Journal");

    if items.is_empty() {
        let _ = writeln!(out, "\nNo journal entries yet.");
        return out;
    }

    for item in items {
        out.push('\n');
        out.push_str(&render_item(item));
    }
    out
}

fn render_item(item: &FeedItem) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "── {} ─ {}", item.date_label, item.id);
    let _ = writeln!(out, "{}", item.title);
    let _ = writeln!(
        out,
        "Total Assets {}   Monthly P&L {} {}",
        format_currency(item.total_assets),
        direction_marker(item.direction),
        item.pnl_label
    );

    if !item.media.is_empty() {
        let described: Vec<String> = item
            .media
            .iter()
            .enumerate()
            .map(|(idx, image)| describe_image(idx, image))
            .collect();
        let _ = writeln!(out, "Images: {}", described.join(", "));
    }

    out.push('\n');
    for line in item.content.lines() {
        let _ = writeln!(out, "  {}", line);
    }

    if !item.action_recap.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "Action Plan Recap");
        for action in &item.action_recap {
            let _ = writeln!(
                out,
                "  {} {} - {} ({})",
                status_box(action.completed),
                action.asset,
                action.action,
                action.date
            );
        }
    }
    out
}

/// `#1 image/png, 12 KB`
fn describe_image(idx: usize, image: &str) -> String {
    let (mime, payload) = split_data_url(image);
    // base64 carries 3 bytes per 4 characters
    let kilobytes = (payload.len() * 3 / 4).div_ceil(1024);
    format!("#{} {}, {} KB", idx + 1, mime.unwrap_or("image"), kilobytes)
}
