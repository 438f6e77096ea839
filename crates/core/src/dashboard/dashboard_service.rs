use std::sync::Arc;

use crate::constants::NO_DATA_LABEL;
use crate::dashboard::dashboard_model::{
    DashboardSummary, GoalProgress, GoalTarget, PnlDirection, TrendPoint,
};
use crate::journal::{AssetAllocation, EntryStoreTrait, JournalEntry};
use crate::utils::time_utils::{month_year_label, short_month_label};

/// The entry with the greatest `date`.
///
/// When several entries share the greatest date the one inserted last wins.
pub fn latest(entries: &[JournalEntry]) -> Option<&JournalEntry> {
    entries.iter().max_by_key(|entry| entry.date)
}

/// One growth point per entry, ascending by date.
///
/// Equal dates keep their insertion order.
pub fn trend_series(entries: &[JournalEntry]) -> Vec<TrendPoint> {
    let mut ordered: Vec<&JournalEntry> = entries.iter().collect();
    ordered.sort_by_key(|entry| entry.date);
    ordered
        .into_iter()
        .map(|entry| TrendPoint {
            label: short_month_label(entry.date),
            date: entry.date,
            total_assets: entry.stats.total_assets,
        })
        .collect()
}

/// Allocation of the latest entry, empty for an empty journal.
pub fn allocation_breakdown(entries: &[JournalEntry]) -> Vec<AssetAllocation> {
    latest(entries)
        .map(|entry| entry.stats.asset_breakdown.clone())
        .unwrap_or_default()
}

pub fn build_summary(entries: &[JournalEntry], goal: GoalTarget) -> DashboardSummary {
    let trend = trend_series(entries);
    let allocation = allocation_breakdown(entries);

    match latest(entries) {
        Some(entry) => DashboardSummary {
            last_update: month_year_label(entry.date),
            latest_entry_id: Some(entry.id.clone()),
            total_assets: entry.stats.total_assets,
            total_pnl: entry.stats.total_pnl,
            pnl_percentage: entry.stats.pnl_percentage,
            direction: PnlDirection::of(entry.stats.total_pnl),
            goal: GoalProgress::new(entry.stats.total_assets, goal),
            trend,
            allocation,
            action_plan: entry.action_plan.clone(),
        },
        None => DashboardSummary {
            last_update: NO_DATA_LABEL.to_string(),
            latest_entry_id: None,
            total_assets: 0.0,
            total_pnl: 0.0,
            pnl_percentage: 0.0,
            direction: PnlDirection::Up,
            goal: GoalProgress::new(0.0, goal),
            trend,
            allocation,
            action_plan: Vec::new(),
        },
    }
}

/// Read-only dashboard projection over the entry store.
pub trait DashboardServiceTrait: Send + Sync {
    fn summary(&self) -> DashboardSummary;
}

pub struct DashboardService {
    entry_store: Arc<dyn EntryStoreTrait>,
    goal: GoalTarget,
}

impl DashboardService {
    pub fn new(entry_store: Arc<dyn EntryStoreTrait>, goal: GoalTarget) -> Self {
        Self { entry_store, goal }
    }
}

impl DashboardServiceTrait for DashboardService {
    fn summary(&self) -> DashboardSummary {
        build_summary(&self.entry_store.all(), self.goal)
    }
}
