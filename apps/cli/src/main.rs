mod cli;
mod config;
mod main_lib;
mod views;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands, OutputFormat};
use config::Config;
use main_lib::{build_state, init_tracing, AppState};
use views::submission::{
    render_draft, render_error, render_saved, upload_from_file, BUSY_INDICATOR,
};
use views::{render_dashboard, render_feed};
use wealthjournal_core::dashboard::DashboardServiceTrait;
use wealthjournal_core::feed::FeedServiceTrait;
use wealthjournal_core::journal::{ImageUpload, IngestionServiceTrait};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();
    let config = Config::from_env();
    let state = build_state(&config).await?;

    match cli.command {
        Commands::Dashboard => show_dashboard(&state, cli.format),
        Commands::Feed { limit } => show_feed(&state, limit, cli.format),
        Commands::Submit { text, images } => submit(&state, text, images, cli.format).await,
        Commands::Delete { id } => delete(&state, &id).await,
    }
}

fn show_dashboard(state: &AppState, format: OutputFormat) -> anyhow::Result<ExitCode> {
    let summary = state.dashboard_service.summary();
    match format {
        OutputFormat::Text => print!("{}", render_dashboard(&summary)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }
    Ok(ExitCode::SUCCESS)
}

fn show_feed(
    state: &AppState,
    limit: Option<usize>,
    format: OutputFormat,
) -> anyhow::Result<ExitCode> {
    let items = state.feed_service.items(limit);
    match format {
        OutputFormat::Text => print!("{}", render_feed(&items)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&items)?),
    }
    Ok(ExitCode::SUCCESS)
}

async fn submit(
    state: &AppState,
    text: Option<String>,
    images: Vec<PathBuf>,
    format: OutputFormat,
) -> anyhow::Result<ExitCode> {
    let uploads = match read_uploads(&images).await {
        Ok(uploads) => uploads,
        Err(err) => {
            eprintln!("{:#}", err);
            return Ok(ExitCode::FAILURE);
        }
    };

    let service = &state.ingestion_service;
    if let Err(err) = stage_draft(service.as_ref(), text.as_deref(), uploads) {
        eprintln!("{}", render_error(&err));
        return Ok(ExitCode::FAILURE);
    }
    eprintln!("{}", render_draft(&service.draft()));

    let mut events = state.event_sink.subscribe();
    eprint!("{}", BUSY_INDICATOR);
    let submission = service.submit_draft();
    tokio::pin!(submission);
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.tick().await;
    let outcome = loop {
        tokio::select! {
            result = &mut submission => break result,
            _ = ticker.tick() => eprint!("."),
        }
    };
    eprintln!();

    let entry = match outcome {
        Ok(entry) => entry,
        Err(err) => {
            eprintln!("{}", render_error(&err));
            return Ok(ExitCode::FAILURE);
        }
    };
    eprintln!("{}", render_saved(&entry));

    // Re-derive the dashboard once the store reports the change.
    let mut changed = false;
    while let Ok(event) = events.try_recv() {
        tracing::debug!("Journal changed: {:?}", event);
        changed = true;
    }
    if changed {
        show_dashboard(state, format)?;
    }
    Ok(ExitCode::SUCCESS)
}

async fn read_uploads(paths: &[PathBuf]) -> anyhow::Result<Vec<ImageUpload>> {
    let mut uploads = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read image {}", path.display()))?;
        uploads.push(upload_from_file(path, bytes));
    }
    Ok(uploads)
}

fn stage_draft(
    service: &dyn IngestionServiceTrait,
    text: Option<&str>,
    uploads: Vec<ImageUpload>,
) -> wealthjournal_core::Result<()> {
    if let Some(text) = text {
        service.set_text(text)?;
    }
    service.stage_images(uploads)?;
    Ok(())
}

async fn delete(state: &AppState, id: &str) -> anyhow::Result<ExitCode> {
    match state.entry_store.remove(id).await {
        Ok(entry) => {
            eprintln!("Deleted \"{}\" ({})", entry.title, entry.id);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{}", render_error(&err));
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Arc;
    use wealthjournal_core::constants::DEFAULT_STORAGE_KEY;
    use wealthjournal_core::journal::{EntryStore, IngestionConfig, IngestionService};
    use wealthjournal_core::storage::InMemoryStorage;

    fn idle_service() -> IngestionService {
        let store = EntryStore::new(Arc::new(InMemoryStorage::new()), DEFAULT_STORAGE_KEY);
        IngestionService::new(Arc::new(store), None, IngestionConfig::default())
    }

    #[test]
    fn test_stage_draft_rejects_non_image_inline() {
        let service = idle_service();
        let pdf = upload_from_file(Path::new("statement.pdf"), b"%PDF-1.7".to_vec());

        let err = stage_draft(&service, Some("Added 5M"), vec![pdf]).unwrap_err();

        assert!(err.is_user_facing());
        assert!(render_error(&err).starts_with("Unsupported image"));
        assert!(service.draft().images.is_empty());
    }

    #[test]
    fn test_stage_draft_keeps_text_and_images() {
        let service = idle_service();
        let png = upload_from_file(
            Path::new("portfolio.png"),
            vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0],
        );

        stage_draft(&service, Some("Added 5M"), vec![png]).unwrap();

        let draft = service.draft();
        assert_eq!(draft.text, "Added 5M");
        assert_eq!(draft.images.len(), 1);
    }

    #[tokio::test]
    async fn test_read_uploads_names_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.png");

        let err = read_uploads(&[missing.clone()]).await.unwrap_err();

        assert!(format!("{:#}", err).contains(&missing.display().to_string()));
    }
}
