//! Journal module - domain models, entry store, analyzer contract and
//! the ingestion pipeline.

mod entry_store;
mod fake_analyzer;
mod image_encoding;
mod ingestion_service;
mod journal_errors;
mod journal_model;
mod journal_traits;
mod seed;

pub use entry_store::{decode_entries, EntryStore, LoadOutcome};
pub use fake_analyzer::{sample_analysis, FakePortfolioAnalyzer};
pub use image_encoding::{encode_image, encode_images, sniff_image_mime, split_data_url};
pub use ingestion_service::{IngestionConfig, IngestionService};
pub use journal_errors::JournalError;
pub use journal_model::{
    ActionItem, ActionStatus, AssetAllocation, EntryAnalysis, EntryDraft, ImageUpload,
    JournalEntry, PortfolioStats,
};
pub use journal_traits::{
    AnalysisOutcome, AnalysisRequest, EntryStoreTrait, IngestionServiceTrait,
    PortfolioAnalyzerTrait,
};
pub use seed::seed_entry;
