use std::fmt::Write as _;

use wealthjournal_core::dashboard::{DashboardSummary, TrendPoint};
use wealthjournal_core::utils::format_utils::{
    format_compact_amount, format_compact_millions, format_currency, format_percentage,
    format_signed_currency, format_signed_percentage,
};

use super::{direction_marker, progress_bar, status_box};

const BAR_WIDTH: usize = 24;

pub fn render_dashboard(summary: &DashboardSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Portfolio Overview");
    let _ = writeln!(
        out,
        "Welcome back, Investor. Your journey to {} continues.",
        goal_headline(summary.goal.target)
    );
    let _ = writeln!(out, "Last update: {}", summary.last_update);
    out.push('\n');

    if !summary.has_data() {
        let _ = writeln!(
            out,
            "No journal entries yet. Run `wealthjournal submit` to record your first snapshot."
        );
        return out;
    }

    let _ = writeln!(out, "Total Net Assets   {}", format_currency(summary.total_assets));
    let _ = writeln!(
        out,
        "Unrealized P&L     {} {} ({})",
        direction_marker(summary.direction),
        format_signed_currency(summary.total_pnl),
        format_signed_percentage(summary.pnl_percentage)
    );
    let _ = writeln!(
        out,
        "Progress to Goal   {} {:.1}%  (Current: {}, Target: {} by {})",
        progress_bar(summary.goal.percent, 20),
        summary.goal.percent,
        format_compact_amount(summary.goal.current),
        format_compact_amount(summary.goal.target),
        summary.goal.target_year
    );

    out.push('\n');
    let _ = writeln!(out, "Cumulative Net Asset Growth");
    out.push_str(&render_trend(&summary.trend));

    out.push('\n');
    let _ = writeln!(out, "Asset Allocation");
    if summary.allocation.is_empty() {
        let _ = writeln!(out, "  (no allocation recorded)");
    }
    for slice in &summary.allocation {
        let _ = writeln!(
            out,
            "  {:<20} {:>16} {:>7}",
            slice.name,
            format_currency(slice.value),
            format_percentage(slice.percentage)
        );
    }

    out.push('\n');
    let _ = writeln!(out, "Strategy & Action Plan");
    if summary.action_plan.is_empty() {
        let _ = writeln!(out, "  (no planned actions)");
    }
    for item in &summary.action_plan {
        let _ = writeln!(
            out,
            "  {} {:<12} {:<8} {}",
            status_box(item.status.is_completed()),
            item.date,
            item.asset,
            item.action
        );
    }

    out
}

/// One bar per entry, scaled to the largest total.
fn render_trend(trend: &[TrendPoint]) -> String {
    let peak = trend
        .iter()
        .map(|point| point.total_assets)
        .fold(0.0_f64, f64::max);

    let mut out = String::new();
    for point in trend {
        let share = if peak > 0.0 {
            point.total_assets / peak * 100.0
        } else {
            0.0
        };
        let filled = ((share / 100.0) * BAR_WIDTH as f64).round() as usize;
        let _ = writeln!(
            out,
            "  {:<4} {:>6} {}",
            point.label,
            format_compact_millions(point.total_assets),
            "█".repeat(filled.min(BAR_WIDTH))
        );
    }
    out
}

fn goal_headline(target: f64) -> String {
    if target >= 1_000_000_000.0 && target % 1_000_000_000.0 == 0.0 {
        let billions = target / 1_000_000_000.0;
        format!("Rp{:.0} Billion", billions)
    } else {
        format_currency(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wealthjournal_core::dashboard::{build_summary, GoalTarget, PnlDirection};
    use wealthjournal_core::journal::seed_entry;

    #[test]
    fn test_render_seed_dashboard() {
        let summary = build_summary(&[seed_entry()], GoalTarget::default());
        let text = render_dashboard(&summary);

        assert!(text.contains("Your journey to Rp1 Billion continues."));
        assert!(text.contains("Last update: October 2025"));
        assert!(text.contains("Total Net Assets   Rp87.688.133"));
        assert!(text.contains("▲ +Rp3.309.662 (+4.74%)"));
        assert!(text.contains("8.8%"));
        assert!(text.contains("Current: 88M, Target: 1B by 2029"));
        assert!(text.contains("Oct     88M"));
        assert!(text.contains("Stocks (Ajaib)"));
        assert!(text.contains("83.3%"));
        assert!(text.contains("[ ]"));
        assert!(text.contains("PBSA"));
    }

    #[test]
    fn test_render_empty_dashboard() {
        let summary = build_summary(&[], GoalTarget::default());
        let text = render_dashboard(&summary);
        assert!(text.contains("Last update: N/A"));
        assert!(text.contains("No journal entries yet"));
        assert!(!text.contains("Total Net Assets"));
    }

    #[test]
    fn test_loss_is_marked_down() {
        let mut entry = seed_entry();
        entry.stats.total_pnl = -1_000.0;
        let summary = build_summary(&[entry], GoalTarget::default());
        assert_eq!(summary.direction, PnlDirection::Down);
        assert!(render_dashboard(&summary).contains("▼ -Rp1.000"));
    }

    #[test]
    fn test_goal_headline() {
        assert_eq!(goal_headline(1_000_000_000.0), "Rp1 Billion");
        assert_eq!(goal_headline(2_000_000_000.0), "Rp2 Billion");
        assert_eq!(goal_headline(500_000_000.0), "Rp500.000.000");
    }
}
