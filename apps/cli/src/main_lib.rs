use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use wealthjournal_ai::{AiError, AnalyzerConfig, GeminiAnalyzer};
use wealthjournal_core::{
    constants::EVENT_CHANNEL_CAPACITY,
    dashboard::DashboardService,
    events::BroadcastEventSink,
    feed::FeedService,
    journal::{
        EntryStore, EntryStoreTrait, IngestionConfig, IngestionService, LoadOutcome,
        PortfolioAnalyzerTrait,
    },
};
use wealthjournal_storage_sqlite::{db, SqliteKeyValueStorage};

use crate::config::Config;

pub struct AppState {
    pub entry_store: Arc<dyn EntryStoreTrait>,
    pub ingestion_service: Arc<IngestionService>,
    pub dashboard_service: Arc<DashboardService>,
    pub feed_service: Arc<FeedService>,
    /// Views subscribe here to re-derive after a mutation.
    pub event_sink: Arc<BroadcastEventSink>,
}

/// Installs the tracing subscriber. Logs go to stderr so rendered views
/// on stdout stay clean.
pub fn init_tracing() {
    let log_format = std::env::var("WJ_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());
    let storage = Arc::new(SqliteKeyValueStorage::new(pool.clone(), writer));

    let event_sink = Arc::new(BroadcastEventSink::new(EVENT_CHANNEL_CAPACITY));

    let entry_store = EntryStore::new(storage, config.storage_key.clone())
        .with_event_sink(event_sink.clone());
    match entry_store.load().await? {
        LoadOutcome::Restored { entry_count } => {
            tracing::info!("Loaded {} journal entries", entry_count)
        }
        LoadOutcome::Seeded => tracing::info!("No journal found, started from the seed entry"),
        LoadOutcome::RecoveredFromCorruption => {
            tracing::warn!("Stored journal was unreadable and has been reset to the seed entry")
        }
    }
    let entry_store: Arc<dyn EntryStoreTrait> = Arc::new(entry_store);

    // Read-only views work without a usable credential; submit reports it.
    let (analyzer, unavailable) = build_analyzer(&config.analyzer);
    let mut ingestion_service = IngestionService::new(
        entry_store.clone(),
        analyzer,
        IngestionConfig {
            analysis_timeout: config.analyzer.timeout,
        },
    );
    if let Some(reason) = unavailable {
        ingestion_service = ingestion_service.with_analyzer_unavailable(reason);
    }
    let ingestion_service = Arc::new(ingestion_service);
    let dashboard_service = Arc::new(DashboardService::new(entry_store.clone(), config.goal));
    let feed_service = Arc::new(FeedService::new(entry_store.clone()));

    Ok(AppState {
        entry_store,
        ingestion_service,
        dashboard_service,
        feed_service,
        event_sink,
    })
}

/// Returns the analyzer, or the reason it could not be built.
fn build_analyzer(
    config: &AnalyzerConfig,
) -> (Option<Arc<dyn PortfolioAnalyzerTrait>>, Option<String>) {
    match GeminiAnalyzer::new(config.clone()) {
        Ok(gemini) => {
            tracing::info!("Analyzer model: {}", config.model);
            let gemini: Arc<dyn PortfolioAnalyzerTrait> = Arc::new(gemini);
            (Some(gemini), None)
        }
        Err(AiError::MissingApiKey(_)) => {
            tracing::debug!("No analyzer credential configured");
            (None, None)
        }
        Err(err) => {
            tracing::warn!("Analyzer unavailable: {}", err);
            (None, Some(err.to_string()))
        }
    }
}
