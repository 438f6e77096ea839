//! Journal domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named slice of total assets.
///
/// `percentage` and `color` are display hints supplied by the analyzer and
/// are not reconciled against `value`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetAllocation {
    pub name: String,
    pub value: f64,
    pub percentage: f64,
    pub color: String,
}

/// Completion state of a planned action.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    #[default]
    Pending,
    Completed,
}

impl ActionStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, ActionStatus::Completed)
    }
}

/// A discrete planned portfolio action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    /// Free-form timeframe label such as "Nov 1–5".
    pub date: String,
    pub asset: String,
    pub action: String,
    pub status: ActionStatus,
}

/// Portfolio snapshot extracted from the user's notes and screenshots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioStats {
    pub total_assets: f64,
    #[serde(rename = "totalPnL")]
    pub total_pnl: f64,
    /// Informational only; never re-derived from the totals.
    #[serde(default)]
    pub pnl_percentage: f64,
    pub asset_breakdown: Vec<AssetAllocation>,
}

/// Structured payload returned by a successful analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntryAnalysis {
    pub title: String,
    pub content: String,
    pub stats: PortfolioStats,
    pub action_plan: Vec<ActionItem>,
}

impl EntryAnalysis {
    /// Rejects payloads that parsed but cannot describe a portfolio.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title is empty".to_string());
        }
        let stats = &self.stats;
        if !stats.total_assets.is_finite() || stats.total_assets < 0.0 {
            return Err(format!(
                "totalAssets must be a non-negative amount, got {}",
                stats.total_assets
            ));
        }
        if !stats.total_pnl.is_finite() || !stats.pnl_percentage.is_finite() {
            return Err("profit and loss figures must be finite".to_string());
        }
        Ok(())
    }
}

/// One user-submitted, analyzer-annotated journal record.
///
/// Entries are immutable once stored. The serialized form matches the
/// collection blob written by earlier versions of the journal, so
/// `rawInput`, `imageUrl` and `imageUrls` may be absent on read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    pub date: DateTime<Utc>,
    pub title: String,
    pub content: String,
    pub stats: PortfolioStats,
    pub action_plan: Vec<ActionItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_input: Option<String>,
    /// First image, kept for single-image consumers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<Vec<String>>,
}

impl JournalEntry {
    /// Builds a complete entry from an analysis plus the locally retained input.
    pub fn from_analysis(
        analysis: EntryAnalysis,
        raw_input: &str,
        images: Vec<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            title: analysis.title,
            content: analysis.content,
            stats: analysis.stats,
            action_plan: analysis.action_plan,
            raw_input: Some(raw_input.to_string()),
            image_url: images.first().cloned(),
            image_urls: Some(images),
        }
    }

    /// Images attached at submission time, in submission order.
    pub fn images(&self) -> &[String] {
        self.image_urls.as_deref().unwrap_or_default()
    }

    /// Images to display, falling back to the legacy single-image field.
    pub fn media(&self) -> Vec<String> {
        match self.image_urls.as_deref() {
            Some(urls) if !urls.is_empty() => urls.to_vec(),
            _ => self.image_url.iter().cloned().collect(),
        }
    }
}

/// A raw image as picked or pasted by the user, before encoding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    /// Declared media type, if the source provided one.
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            file_name: None,
            mime_type: None,
            bytes,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Name used in log lines and error messages.
    pub fn display_name(&self) -> &str {
        self.file_name.as_deref().unwrap_or("pasted image")
    }
}

/// Transient input buffer of the submission view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntryDraft {
    pub text: String,
    pub images: Vec<ImageUpload>,
}

impl EntryDraft {
    /// True when there is neither a note nor a staged image.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.images.is_empty()
    }
}
