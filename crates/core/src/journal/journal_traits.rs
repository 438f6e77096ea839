use async_trait::async_trait;

use crate::errors::{AnalyzerError, Result};
use crate::journal::journal_model::{EntryAnalysis, EntryDraft, ImageUpload, JournalEntry};

/// Result sum type of the analyzer contract: a full payload or a failure cause.
pub type AnalysisOutcome = std::result::Result<EntryAnalysis, AnalyzerError>;

/// Input handed to the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalysisRequest {
    /// The user's note, verbatim.
    pub text: String,
    /// Images as data URLs, in submission order.
    pub images: Vec<String>,
}

/// External structured-extraction service.
///
/// Implementations turn free text and screenshots into an [`EntryAnalysis`].
/// A single call resolves once, with no partial results.
#[async_trait]
pub trait PortfolioAnalyzerTrait: Send + Sync {
    async fn analyze(&self, request: AnalysisRequest) -> AnalysisOutcome;
}

/// Owner of the journal entry collection.
#[async_trait]
pub trait EntryStoreTrait: Send + Sync {
    /// Snapshot of all entries in insertion order.
    fn all(&self) -> Vec<JournalEntry>;

    fn get(&self, entry_id: &str) -> Option<JournalEntry>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends one entry, persisting the full collection before returning.
    async fn append(&self, entry: JournalEntry) -> Result<()>;

    /// Removes one entry, persisting the full collection before returning.
    async fn remove(&self, entry_id: &str) -> Result<JournalEntry>;
}

/// Submission workflow: draft buffer, validation, analysis and storage.
#[async_trait]
pub trait IngestionServiceTrait: Send + Sync {
    /// True while an analysis is in flight.
    fn is_busy(&self) -> bool;

    fn draft(&self) -> EntryDraft;

    fn set_text(&self, text: &str) -> Result<()>;

    /// Stages images for the next submission. Returns the staged image count.
    fn stage_images(&self, images: Vec<ImageUpload>) -> Result<usize>;

    fn remove_staged_image(&self, index: usize) -> Result<ImageUpload>;

    fn clear_draft(&self);

    async fn submit(&self, text: &str, images: Vec<ImageUpload>) -> Result<JournalEntry>;

    /// Submits the current draft; the draft is cleared on success.
    async fn submit_draft(&self) -> Result<JournalEntry>;
}
