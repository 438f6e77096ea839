use async_trait::async_trait;
use chrono::Utc;
use log::{debug, error, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::constants::DEFAULT_ANALYSIS_TIMEOUT_SECS;
use crate::errors::{AnalyzerError, Result};
use crate::journal::image_encoding::{encode_images, resolve_mime};
use crate::journal::journal_errors::JournalError;
use crate::journal::journal_model::{EntryAnalysis, EntryDraft, ImageUpload, JournalEntry};
use crate::journal::journal_traits::{
    AnalysisRequest, EntryStoreTrait, IngestionServiceTrait, PortfolioAnalyzerTrait,
};

/// Configuration for the ingestion pipeline.
#[derive(Debug, Clone)]
pub struct IngestionConfig {
    /// Upper bound for one analyzer call.
    pub analysis_timeout: Duration,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            analysis_timeout: Duration::from_secs(DEFAULT_ANALYSIS_TIMEOUT_SECS),
        }
    }
}

/// Marks the pipeline busy for its lifetime.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Turns notes and screenshots into stored journal entries.
pub struct IngestionService {
    entry_store: Arc<dyn EntryStoreTrait>,
    /// `None` when the analyzer credential is not configured.
    analyzer: Option<Arc<dyn PortfolioAnalyzerTrait>>,
    /// Why the analyzer could not be built, reported on submit.
    analyzer_unavailable: Option<String>,
    config: IngestionConfig,
    draft: Mutex<EntryDraft>,
    busy: AtomicBool,
}

impl IngestionService {
    pub fn new(
        entry_store: Arc<dyn EntryStoreTrait>,
        analyzer: Option<Arc<dyn PortfolioAnalyzerTrait>>,
        config: IngestionConfig,
    ) -> Self {
        Self {
            entry_store,
            analyzer,
            analyzer_unavailable: None,
            config,
            draft: Mutex::new(EntryDraft::default()),
            busy: AtomicBool::new(false),
        }
    }

    /// Records a construction failure so `submit` can report it instead of
    /// the generic missing-credential message.
    pub fn with_analyzer_unavailable(mut self, reason: impl Into<String>) -> Self {
        self.analyzer_unavailable = Some(reason.into());
        self
    }

    fn lock_draft(&self) -> MutexGuard<'_, EntryDraft> {
        self.draft.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.is_busy() {
            return Err(JournalError::Busy.into());
        }
        Ok(())
    }

    async fn run_analysis(
        &self,
        analyzer: &dyn PortfolioAnalyzerTrait,
        request: AnalysisRequest,
    ) -> std::result::Result<EntryAnalysis, AnalyzerError> {
        let timeout = self.config.analysis_timeout;
        let analysis = tokio::time::timeout(timeout, analyzer.analyze(request))
            .await
            .map_err(|_| AnalyzerError::Timeout(timeout))??;
        analysis
            .validate()
            .map_err(AnalyzerError::MalformedResponse)?;
        Ok(analysis)
    }
}

#[async_trait]
impl IngestionServiceTrait for IngestionService {
    fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    fn draft(&self) -> EntryDraft {
        self.lock_draft().clone()
    }

    fn set_text(&self, text: &str) -> Result<()> {
        self.ensure_idle()?;
        self.lock_draft().text = text.to_string();
        Ok(())
    }

    fn stage_images(&self, images: Vec<ImageUpload>) -> Result<usize> {
        self.ensure_idle()?;
        // Validate the whole batch before staging any of it.
        for image in &images {
            resolve_mime(image)?;
        }
        let mut draft = self.lock_draft();
        draft.images.extend(images);
        Ok(draft.images.len())
    }

    fn remove_staged_image(&self, index: usize) -> Result<ImageUpload> {
        self.ensure_idle()?;
        let mut draft = self.lock_draft();
        if index >= draft.images.len() {
            return Err(JournalError::ImageIndexOutOfRange(index).into());
        }
        Ok(draft.images.remove(index))
    }

    fn clear_draft(&self) {
        *self.lock_draft() = EntryDraft::default();
    }

    async fn submit(&self, text: &str, images: Vec<ImageUpload>) -> Result<JournalEntry> {
        if text.trim().is_empty() && images.is_empty() {
            return Err(JournalError::EmptyInput.into());
        }

        let analyzer = self.analyzer.clone().ok_or_else(|| {
            JournalError::Configuration(self.analyzer_unavailable.clone().unwrap_or_else(|| {
                "API Key is missing. Please check configuration.".to_string()
            }))
        })?;

        let _busy = BusyGuard::acquire(&self.busy).ok_or(JournalError::Busy)?;

        let encoded = encode_images(&images)?;
        info!(
            "Analyzing journal submission ({} chars, {} images)",
            text.chars().count(),
            encoded.len()
        );

        let started = Instant::now();
        let request = AnalysisRequest {
            text: text.to_string(),
            images: encoded.clone(),
        };
        let analysis = match self.run_analysis(analyzer.as_ref(), request).await {
            Ok(analysis) => analysis,
            Err(err) => {
                error!("Portfolio analysis failed: {}", err);
                return Err(JournalError::Analysis(err).into());
            }
        };
        debug!("Analysis completed in {:?}", started.elapsed());

        let entry = JournalEntry::from_analysis(analysis, text, encoded, Utc::now());
        self.entry_store.append(entry.clone()).await?;
        self.clear_draft();

        info!("Recorded journal entry {} ('{}')", entry.id, entry.title);
        Ok(entry)
    }

    async fn submit_draft(&self) -> Result<JournalEntry> {
        let draft = self.draft();
        self.submit(&draft.text, draft.images).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_STORAGE_KEY, SEED_ENTRY_ID};
    use crate::dashboard::latest;
    use crate::errors::Error;
    use crate::journal::fake_analyzer::{sample_analysis, FakePortfolioAnalyzer};
    use crate::journal::EntryStore;
    use crate::storage::InMemoryStorage;
    use tokio::sync::Notify;

    const PNG_BYTES: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    async fn seeded_store() -> Arc<EntryStore> {
        let store = EntryStore::new(Arc::new(InMemoryStorage::new()), DEFAULT_STORAGE_KEY);
        store.load().await.unwrap();
        Arc::new(store)
    }

    fn service_with(
        store: Arc<EntryStore>,
        analyzer: Arc<FakePortfolioAnalyzer>,
    ) -> IngestionService {
        IngestionService::new(
            store,
            Some(analyzer as Arc<dyn PortfolioAnalyzerTrait>),
            IngestionConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_submit_records_entry_from_analysis() {
        let store = seeded_store().await;
        let analyzer = Arc::new(FakePortfolioAnalyzer::with_analysis(sample_analysis(
            "T", 100.0, 5.0,
        )));
        let service = service_with(store.clone(), analyzer.clone());

        let entry = service.submit("Added 5M to stocks", vec![]).await.unwrap();

        assert_eq!(entry.raw_input.as_deref(), Some("Added 5M to stocks"));
        assert!(entry.images().is_empty());
        assert_eq!(entry.image_url, None);
        assert_eq!(entry.stats.total_assets, 100.0);
        assert_eq!(entry.title, "T");
        assert_eq!(entry.content, "## T");

        let entries = store.all();
        assert_eq!(entries.len(), 2);
        assert_eq!(latest(&entries).map(|e| e.id.as_str()), Some(entry.id.as_str()));
        assert_eq!(analyzer.call_count(), 1);
        assert!(!service.is_busy());
    }

    #[tokio::test]
    async fn test_submit_passes_encoded_images_in_order() {
        let store = seeded_store().await;
        let analyzer = Arc::new(FakePortfolioAnalyzer::with_analysis(sample_analysis(
            "T", 1.0, 0.0,
        )));
        let service = service_with(store, analyzer.clone());
        let images = vec![
            ImageUpload::new(vec![0xFF, 0xD8, 0xFF, 0x00]).with_file_name("a.jpg"),
            ImageUpload::new(PNG_BYTES.to_vec()).with_file_name("b.png"),
        ];

        let entry = service.submit("", images).await.unwrap();

        let request = &analyzer.requests()[0];
        assert_eq!(request.text, "");
        assert_eq!(request.images, entry.images());
        assert!(entry.images()[0].starts_with("data:image/jpeg;base64,"));
        assert!(entry.images()[1].starts_with("data:image/png;base64,"));
        assert_eq!(entry.image_url.as_deref(), Some(entry.images()[0].as_str()));
    }

    #[tokio::test]
    async fn test_empty_submission_is_rejected_without_analysis() {
        let store = seeded_store().await;
        let analyzer = Arc::new(FakePortfolioAnalyzer::with_analysis(sample_analysis(
            "T", 1.0, 0.0,
        )));
        let service = service_with(store.clone(), analyzer.clone());

        let err = service.submit("", vec![]).await.unwrap_err();
        assert!(matches!(err, Error::Journal(JournalError::EmptyInput)));

        let err = service.submit("   \n", vec![]).await.unwrap_err();
        assert!(matches!(err, Error::Journal(JournalError::EmptyInput)));

        assert_eq!(analyzer.call_count(), 0);
        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].id, SEED_ENTRY_ID);
    }

    #[tokio::test]
    async fn test_missing_analyzer_is_configuration_error() {
        let store = seeded_store().await;
        let service = IngestionService::new(store.clone(), None, IngestionConfig::default());

        let err = service.submit("note", vec![]).await.unwrap_err();

        assert!(matches!(err, Error::Journal(JournalError::Configuration(_))));
        assert!(err.is_user_facing());
        assert_eq!(store.len(), 1);
        assert!(!service.is_busy());
    }

    #[tokio::test]
    async fn test_unavailable_analyzer_reports_reason_on_submit() {
        let store = seeded_store().await;
        let service = IngestionService::new(store.clone(), None, IngestionConfig::default())
            .with_analyzer_unavailable("Invalid API key format");

        let err = service.submit("note", vec![]).await.unwrap_err();

        match err {
            Error::Journal(JournalError::Configuration(message)) => {
                assert_eq!(message, "Invalid API key format")
            }
            other => panic!("expected configuration error, got {:?}", other),
        }
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_analyzer_failure_leaves_store_unchanged() {
        let store = seeded_store().await;
        let analyzer = Arc::new(FakePortfolioAnalyzer::with_failure(AnalyzerError::Request(
            "connection reset".to_string(),
        )));
        let service = service_with(store.clone(), analyzer);
        service.set_text("Added 5M to stocks").unwrap();
        let before = store.len();

        let err = service.submit_draft().await.unwrap_err();

        match err {
            Error::Journal(JournalError::Analysis(AnalyzerError::Request(msg))) => {
                assert_eq!(msg, "connection reset")
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(store.len(), before);
        assert!(!service.is_busy());
        // The draft survives so the user can resubmit.
        assert_eq!(service.draft().text, "Added 5M to stocks");
    }

    #[tokio::test]
    async fn test_invalid_analysis_is_rejected() {
        let store = seeded_store().await;
        let analyzer = Arc::new(FakePortfolioAnalyzer::with_analysis(sample_analysis(
            "Negative", -10.0, 0.0,
        )));
        let service = service_with(store.clone(), analyzer);

        let err = service.submit("note", vec![]).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Journal(JournalError::Analysis(AnalyzerError::MalformedResponse(_)))
        ));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_analysis_timeout_is_reported() {
        let store = seeded_store().await;
        let gate = Arc::new(Notify::new());
        let analyzer = Arc::new(
            FakePortfolioAnalyzer::with_analysis(sample_analysis("Slow", 1.0, 0.0)).gated(gate),
        );
        let service = IngestionService::new(
            store.clone(),
            Some(analyzer as Arc<dyn PortfolioAnalyzerTrait>),
            IngestionConfig {
                analysis_timeout: Duration::from_millis(20),
            },
        );

        let err = service.submit("note", vec![]).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Journal(JournalError::Analysis(AnalyzerError::Timeout(_)))
        ));
        assert!(!service.is_busy());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_while_busy_is_rejected() {
        let store = seeded_store().await;
        let gate = Arc::new(Notify::new());
        let analyzer = Arc::new(
            FakePortfolioAnalyzer::with_analysis(sample_analysis("Once", 1.0, 0.0))
                .gated(gate.clone()),
        );
        let service = Arc::new(service_with(store.clone(), analyzer.clone()));

        let first = {
            let service = service.clone();
            tokio::spawn(async move { service.submit("first", vec![]).await })
        };
        while analyzer.call_count() == 0 {
            tokio::task::yield_now().await;
        }
        assert!(service.is_busy());

        let second = service.submit("second", vec![]).await.unwrap_err();
        assert!(matches!(second, Error::Journal(JournalError::Busy)));
        assert!(matches!(
            service.stage_images(vec![ImageUpload::new(PNG_BYTES.to_vec())]),
            Err(Error::Journal(JournalError::Busy))
        ));

        gate.notify_one();
        first.await.unwrap().unwrap();

        assert_eq!(analyzer.call_count(), 1);
        assert_eq!(store.len(), 2);
        assert!(!service.is_busy());
    }

    #[tokio::test]
    async fn test_draft_staging_and_clear_on_success() {
        let store = seeded_store().await;
        let analyzer = Arc::new(FakePortfolioAnalyzer::with_analysis(sample_analysis(
            "Draft", 1.0, 0.0,
        )));
        let service = service_with(store, analyzer.clone());

        service.set_text("monthly update").unwrap();
        let staged = service
            .stage_images(vec![
                ImageUpload::new(PNG_BYTES.to_vec()).with_file_name("one.png"),
                ImageUpload::new(PNG_BYTES.to_vec()).with_file_name("two.png"),
            ])
            .unwrap();
        assert_eq!(staged, 2);

        let removed = service.remove_staged_image(0).unwrap();
        assert_eq!(removed.file_name.as_deref(), Some("one.png"));
        assert!(matches!(
            service.remove_staged_image(5),
            Err(Error::Journal(JournalError::ImageIndexOutOfRange(5)))
        ));

        let entry = service.submit_draft().await.unwrap();

        assert_eq!(entry.images().len(), 1);
        assert_eq!(analyzer.requests()[0].text, "monthly update");
        assert_eq!(service.draft(), EntryDraft::default());
    }

    #[tokio::test]
    async fn test_stage_images_rejects_unsupported_batch() {
        let store = seeded_store().await;
        let analyzer = Arc::new(FakePortfolioAnalyzer::with_analysis(sample_analysis(
            "T", 1.0, 0.0,
        )));
        let service = service_with(store, analyzer);

        let result = service.stage_images(vec![
            ImageUpload::new(PNG_BYTES.to_vec()),
            ImageUpload::new(b"%PDF".to_vec()).with_file_name("report.pdf"),
        ]);

        assert!(matches!(
            result,
            Err(Error::Journal(JournalError::UnsupportedImage(_)))
        ));
        assert!(service.draft().images.is_empty());
    }
}
