//! Encoding of staged images into transportable data URLs.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::journal::journal_errors::JournalError;
use crate::journal::journal_model::ImageUpload;

const DATA_URL_MARKER: &str = "base64,";

/// Guesses an image media type from the payload's leading bytes.
pub fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else {
        None
    }
}

/// Resolves the media type of an upload, preferring the declared one.
pub fn resolve_mime(upload: &ImageUpload) -> Result<String, JournalError> {
    if upload.bytes.is_empty() {
        return Err(JournalError::UnsupportedImage(
            upload.display_name().to_string(),
        ));
    }
    match upload.mime_type.as_deref().map(str::trim) {
        Some(declared) if declared.starts_with("image/") => Ok(declared.to_ascii_lowercase()),
        Some(_) => Err(JournalError::UnsupportedImage(
            upload.display_name().to_string(),
        )),
        None => sniff_image_mime(&upload.bytes)
            .map(str::to_string)
            .ok_or_else(|| JournalError::UnsupportedImage(upload.display_name().to_string())),
    }
}

/// Encodes one upload as `data:<mime>;base64,<payload>`.
pub fn encode_image(upload: &ImageUpload) -> Result<String, JournalError> {
    let mime = resolve_mime(upload)?;
    Ok(format!(
        "data:{};{}{}",
        mime,
        DATA_URL_MARKER,
        BASE64.encode(&upload.bytes)
    ))
}

/// Encodes uploads preserving their order, so the first stays the primary image.
pub fn encode_images(uploads: &[ImageUpload]) -> Result<Vec<String>, JournalError> {
    uploads.iter().map(encode_image).collect()
}

/// Splits a data URL into its media type and raw base64 payload.
///
/// Strings without a `base64,` marker are returned unchanged as payload.
pub fn split_data_url(image: &str) -> (Option<&str>, &str) {
    match image.split_once(DATA_URL_MARKER) {
        Some((prefix, payload)) => {
            let mime = prefix
                .strip_prefix("data:")
                .map(|rest| rest.trim_end_matches(';'))
                .filter(|mime| !mime.is_empty());
            (mime, payload)
        }
        None => (None, image),
    }
}
