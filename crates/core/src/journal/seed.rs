//! Demo entry used to populate a fresh journal.

use chrono::DateTime;

use crate::constants::SEED_ENTRY_ID;
use crate::journal::journal_model::{
    ActionItem, ActionStatus, AssetAllocation, JournalEntry, PortfolioStats,
};

/// 2025-10-01T00:00:00Z
const SEED_TIMESTAMP: i64 = 1_759_276_800;

const SEED_CONTENT: &str = r#"## 📘 Investment Growth Journal — October 2025

**Goal**: Rp1 Billion Assets by 2029
**Profile**: Aggressive | High Risk | Growth-Focused | Crypto-Heavy

---

### 💼 Portfolio Summary

**Total Assets**: Rp87,688,133

* 📈 **Stocks (Ajaib)**: Rp73,075,632 (83.3%)
* 💵 **US Stock (Reku – SLV ETF)**: Rp14,612,501 (16.7%)
* ₿ **Crypto**: Rp0
* 💸 **Unrealized P&L (stocks)**: +Rp3,309,662 (+4.74%)

---

### 🧠 Reflection – October 2025

October marked a **steady rebound**. The portfolio gained ~4.7%, led by **PBSA and CUAN**, while ARCI slightly lagged. The addition of the **iShares Silver Trust (SLV)** in Reku diversified exposure into precious metals."#;

fn allocation(name: &str, value: f64, percentage: f64, color: &str) -> AssetAllocation {
    AssetAllocation {
        name: name.to_string(),
        value,
        percentage,
        color: color.to_string(),
    }
}

fn pending(date: &str, asset: &str, action: &str) -> ActionItem {
    ActionItem {
        date: date.to_string(),
        asset: asset.to_string(),
        action: action.to_string(),
        status: ActionStatus::Pending,
    }
}

/// The October 2025 snapshot shown until the user records their own entries.
pub fn seed_entry() -> JournalEntry {
    JournalEntry {
        id: SEED_ENTRY_ID.to_string(),
        date: DateTime::from_timestamp(SEED_TIMESTAMP, 0).unwrap_or_default(),
        title: "Investment Growth Journal — October 2025".to_string(),
        content: SEED_CONTENT.to_string(),
        stats: PortfolioStats {
            total_assets: 87_688_133.0,
            total_pnl: 3_309_662.0,
            pnl_percentage: 4.74,
            asset_breakdown: vec![
                allocation("Stocks (Ajaib)", 73_075_632.0, 83.3, "#10b981"),
                allocation("US Stocks", 14_612_501.0, 16.7, "#3b82f6"),
                allocation("Crypto", 0.0, 0.0, "#f59e0b"),
            ],
        },
        action_plan: vec![
            pending("Nov 1–5", "PBSA", "Monitor; take partial profit if >+20% more"),
            pending("Nov 10", "ARCI", "Consider average-down if gold prices strengthen"),
            pending("Nov 25", "BTC", "Potential re-entry if <Rp1.2B/BTC"),
        ],
        raw_input: None,
        image_url: None,
        image_urls: None,
    }
}
