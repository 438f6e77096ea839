//! Dashboard view models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_GOAL_TARGET, DEFAULT_GOAL_YEAR};
use crate::journal::{ActionItem, AssetAllocation};
use crate::utils::format_utils::format_compact_amount;

/// One point of the growth curve.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Short month label, e.g. `Oct`.
    pub label: String,
    pub date: DateTime<Utc>,
    pub total_assets: f64,
}

/// Wealth goal the dashboard measures progress against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalTarget {
    pub target_amount: f64,
    pub target_year: i32,
}

impl Default for GoalTarget {
    fn default() -> Self {
        Self {
            target_amount: DEFAULT_GOAL_TARGET,
            target_year: DEFAULT_GOAL_YEAR,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub current: f64,
    pub target: f64,
    pub target_year: i32,
    /// Share of the target reached, clamped to `[0, 100]`.
    pub percent: f64,
}

impl GoalProgress {
    pub fn new(current: f64, goal: GoalTarget) -> Self {
        let percent = if goal.target_amount > 0.0 {
            (current / goal.target_amount * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self {
            current,
            target: goal.target_amount,
            target_year: goal.target_year,
            percent,
        }
    }

    /// `88M / 1B`
    pub fn label(&self) -> String {
        format!(
            "{} / {}",
            format_compact_amount(self.current),
            format_compact_amount(self.target)
        )
    }
}

/// Direction of a profit-and-loss figure. Zero counts as `Up`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PnlDirection {
    Up,
    Down,
}

impl PnlDirection {
    pub fn of(pnl: f64) -> Self {
        if pnl >= 0.0 {
            PnlDirection::Up
        } else {
            PnlDirection::Down
        }
    }
}

/// Everything the dashboard view renders, derived from one store snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Month label of the latest entry, or `N/A` for an empty journal.
    pub last_update: String,
    pub latest_entry_id: Option<String>,
    pub total_assets: f64,
    pub total_pnl: f64,
    pub pnl_percentage: f64,
    pub direction: PnlDirection,
    pub goal: GoalProgress,
    pub trend: Vec<TrendPoint>,
    pub allocation: Vec<AssetAllocation>,
    pub action_plan: Vec<ActionItem>,
}

impl DashboardSummary {
    pub fn has_data(&self) -> bool {
        self.latest_entry_id.is_some()
    }
}
