use thiserror::Error;

use crate::errors::AnalyzerError;

/// Errors raised by the journal store and the ingestion pipeline.
#[derive(Error, Debug)]
pub enum JournalError {
    /// Neither a note nor an image was provided.
    #[error("Please add some notes or upload portfolio screenshots.")]
    EmptyInput,

    /// The analyzer credential or configuration is absent.
    #[error("System Error: {0}")]
    Configuration(String),

    /// The analyzer call failed, timed out, or returned an unusable payload.
    #[error("Failed to analyze portfolio. Please try again. {0}")]
    Analysis(#[source] AnalyzerError),

    /// The persisted collection could not be decoded.
    #[error("Stored journal data is corrupt: {0}")]
    StorageCorruption(String),

    /// A submission is already in flight.
    #[error("An analysis is already in progress. Please wait for it to finish.")]
    Busy,

    #[error("Unsupported image '{0}'. Please attach a PNG, JPEG, GIF or WebP screenshot.")]
    UnsupportedImage(String),

    #[error("No staged image at position {0}")]
    ImageIndexOutOfRange(usize),

    #[error("Journal entry already exists: {0}")]
    DuplicateEntry(String),

    #[error("Journal entry not found: {0}")]
    EntryNotFound(String),
}

impl JournalError {
    /// Errors the submission view renders as inline text.
    pub fn is_user_facing(&self) -> bool {
        !matches!(
            self,
            JournalError::StorageCorruption(_) | JournalError::DuplicateEntry(_)
        )
    }

    /// Stable code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            JournalError::EmptyInput => "EMPTY_INPUT",
            JournalError::Configuration(_) => "CONFIGURATION",
            JournalError::Analysis(_) => "ANALYSIS_FAILED",
            JournalError::StorageCorruption(_) => "STORAGE_CORRUPTION",
            JournalError::Busy => "BUSY",
            JournalError::UnsupportedImage(_) => "UNSUPPORTED_IMAGE",
            JournalError::ImageIndexOutOfRange(_) => "IMAGE_INDEX_OUT_OF_RANGE",
            JournalError::DuplicateEntry(_) => "DUPLICATE_ENTRY",
            JournalError::EntryNotFound(_) => "ENTRY_NOT_FOUND",
        }
    }
}

impl From<AnalyzerError> for JournalError {
    fn from(err: AnalyzerError) -> Self {
        JournalError::Analysis(err)
    }
}
