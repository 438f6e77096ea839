use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dashboard::PnlDirection;

/// One action-plan line as shown under a feed item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecap {
    pub asset: String,
    pub action: String,
    pub date: String,
    pub completed: bool,
}

/// A rendered journal entry in the feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub id: String,
    pub date: DateTime<Utc>,
    /// `October 2025`
    pub date_label: String,
    pub title: String,
    pub total_assets: f64,
    pub total_pnl: f64,
    /// Signed amount, e.g. `+Rp3.309.662`.
    pub pnl_label: String,
    pub direction: PnlDirection,
    pub media: Vec<String>,
    /// Markdown body.
    pub content: String,
    pub action_recap: Vec<ActionRecap>,
}
