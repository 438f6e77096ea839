use std::path::Path;

use wealthjournal_core::journal::{EntryDraft, ImageUpload, JournalEntry};
use wealthjournal_core::Error;

/// Shown while the analyzer call is in flight.
pub const BUSY_INDICATOR: &str = "Analyzing your portfolio...";

/// Builds an upload from a picked file, declaring the media type when the
/// extension is a known image type.
pub fn upload_from_file(path: &Path, bytes: Vec<u8>) -> ImageUpload {
    let mut upload = ImageUpload::new(bytes);
    if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
        upload = upload.with_file_name(name);
    }
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => upload.with_mime_type("image/png"),
        Some("jpg") | Some("jpeg") => upload.with_mime_type("image/jpeg"),
        Some("gif") => upload.with_mime_type("image/gif"),
        Some("webp") => upload.with_mime_type("image/webp"),
        _ => upload,
    }
}

/// One-line summary of what is about to be submitted.
pub fn render_draft(draft: &EntryDraft) -> String {
    let names: Vec<&str> = draft.images.iter().map(|image| image.display_name()).collect();
    let note = if draft.text.trim().is_empty() {
        "no notes".to_string()
    } else {
        format!("{} characters of notes", draft.text.chars().count())
    };
    if names.is_empty() {
        format!("New Entry: {}", note)
    } else {
        format!("New Entry: {}, {} image(s) [{}]", note, names.len(), names.join(", "))
    }
}

pub fn render_saved(entry: &JournalEntry) -> String {
    format!("Saved \"{}\" ({})", entry.title, entry.id)
}

/// Inline message for a failed submission.
pub fn render_error(err: &Error) -> String {
    if err.is_user_facing() {
        err.to_string()
    } else {
        format!("Something went wrong: {}", err)
    }
}
