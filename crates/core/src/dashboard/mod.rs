//! Dashboard module - pure projections over the entry collection and the
//! read-only summary service built on them.

mod dashboard_model;
mod dashboard_service;

pub use dashboard_model::{DashboardSummary, GoalProgress, GoalTarget, PnlDirection, TrendPoint};
pub use dashboard_service::{
    allocation_breakdown, build_summary, latest, trend_series, DashboardService,
    DashboardServiceTrait,
};
