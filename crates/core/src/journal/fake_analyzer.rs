//! Deterministic analyzer for tests and offline demos.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::Notify;

use crate::errors::AnalyzerError;
use crate::journal::journal_model::{EntryAnalysis, PortfolioStats};
use crate::journal::journal_traits::{AnalysisOutcome, AnalysisRequest, PortfolioAnalyzerTrait};

/// Analyzer returning a scripted outcome and recording every request.
pub struct FakePortfolioAnalyzer {
    outcome: Mutex<AnalysisOutcome>,
    requests: Mutex<Vec<AnalysisRequest>>,
    calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
}

impl FakePortfolioAnalyzer {
    /// Always succeeds with `analysis`.
    pub fn with_analysis(analysis: EntryAnalysis) -> Self {
        Self::with_outcome(Ok(analysis))
    }

    /// Always fails with `error`.
    pub fn with_failure(error: AnalyzerError) -> Self {
        Self::with_outcome(Err(error))
    }

    pub fn with_outcome(outcome: AnalysisOutcome) -> Self {
        Self {
            outcome: Mutex::new(outcome),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    /// Holds every call until `gate` is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Replaces the scripted outcome for subsequent calls.
    pub fn set_outcome(&self, outcome: AnalysisOutcome) {
        *self.outcome.lock().unwrap_or_else(PoisonError::into_inner) = outcome;
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<AnalysisRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl PortfolioAnalyzerTrait for FakePortfolioAnalyzer {
    async fn analyze(&self, request: AnalysisRequest) -> AnalysisOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        self.outcome
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// A minimal analysis with the given headline figures.
pub fn sample_analysis(title: &str, total_assets: f64, total_pnl: f64) -> EntryAnalysis {
    EntryAnalysis {
        title: title.to_string(),
        content: format!("## {}", title),
        stats: PortfolioStats {
            total_assets,
            total_pnl,
            pnl_percentage: 0.0,
            asset_breakdown: Vec::new(),
        },
        action_plan: Vec::new(),
    }
}
