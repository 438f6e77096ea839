//! Property-based integration tests for the journal projections and store.
//!
//! These tests verify that universal properties hold across all valid inputs,
//! using the `proptest` crate for random test case generation.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use wealthjournal_core::dashboard::{build_summary, latest, trend_series, GoalTarget};
use wealthjournal_core::feed::build_feed;
use wealthjournal_core::journal::{
    decode_entries, ActionItem, ActionStatus, AssetAllocation, EntryStore, EntryStoreTrait,
    JournalEntry, PortfolioStats,
};
use wealthjournal_core::storage::{InMemoryStorage, KeyValueStorageTrait};

const STORAGE_KEY: &str = "wealth_architect_entries";

// =============================================================================
// Generators
// =============================================================================

/// Generates a timestamp within a few years of 2025, with coarse steps so
/// that equal dates occur often.
fn arb_date() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..40).prop_map(|step| {
        Utc.timestamp_opt(1_735_689_600 + step * 86_400 * 15, 0)
            .single()
            .unwrap_or_default()
    })
}

fn arb_allocation() -> impl Strategy<Value = AssetAllocation> {
    ("[A-Za-z ]{1,12}", 0u32..100_000_000, 0u32..=100).prop_map(|(name, value, pct)| {
        AssetAllocation {
            name,
            value: f64::from(value),
            percentage: f64::from(pct),
            color: "#10b981".to_string(),
        }
    })
}

fn arb_action() -> impl Strategy<Value = ActionItem> {
    ("[A-Z]{3,4}", "[a-z ]{1,20}", any::<bool>()).prop_map(|(asset, action, done)| ActionItem {
        date: "Nov 1-5".to_string(),
        asset,
        action,
        status: if done {
            ActionStatus::Completed
        } else {
            ActionStatus::Pending
        },
    })
}

/// Generates an entry as the ingestion pipeline would produce it.
fn arb_entry() -> impl Strategy<Value = JournalEntry> {
    (
        "[a-f0-9]{12}",                                   // id
        arb_date(),                                       // date
        "[A-Za-z ]{1,30}",                                // title
        0u32..2_000_000_000,                              // total assets
        -50_000_000i32..50_000_000,                       // total pnl
        prop::collection::vec(arb_allocation(), 0..4),    // breakdown
        prop::collection::vec(arb_action(), 0..4),        // action plan
        prop::collection::vec("[A-Za-z0-9+/]{4,16}", 0..3), // image payloads
    )
        .prop_map(
            |(id, date, title, assets, pnl, breakdown, plan, payloads)| {
                let images: Vec<String> = payloads
                    .into_iter()
                    .map(|p| format!("data:image/png;base64,{}", p))
                    .collect();
                JournalEntry {
                    id,
                    date,
                    content: format!("## {}", title),
                    title,
                    stats: PortfolioStats {
                        total_assets: f64::from(assets),
                        total_pnl: f64::from(pnl),
                        pnl_percentage: 0.0,
                        asset_breakdown: breakdown,
                    },
                    action_plan: plan,
                    raw_input: Some("notes".to_string()),
                    image_url: images.first().cloned(),
                    image_urls: Some(images),
                }
            },
        )
}

/// Generates entries with unique ids.
fn arb_entries(max: usize) -> impl Strategy<Value = Vec<JournalEntry>> {
    prop::collection::vec(arb_entry(), 0..max).prop_map(|entries| {
        let mut seen = HashSet::new();
        entries
            .into_iter()
            .filter(|e| seen.insert(e.id.clone()))
            .collect()
    })
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// latest() returns an entry carrying the maximum date, or none when empty.
    #[test]
    fn prop_latest_has_max_date(entries in arb_entries(12)) {
        match latest(&entries) {
            None => prop_assert!(entries.is_empty()),
            Some(found) => {
                let max = entries.iter().map(|e| e.date).max().unwrap();
                prop_assert_eq!(found.date, max);
            }
        }
    }

    /// The trend series has one point per entry, sorted, with stable ties.
    #[test]
    fn prop_trend_series_is_sorted_and_stable(entries in arb_entries(12)) {
        let trend = trend_series(&entries);
        prop_assert_eq!(trend.len(), entries.len());
        for pair in trend.windows(2) {
            prop_assert!(pair[0].date <= pair[1].date);
        }

        // Same-date entries must appear in insertion order.
        let mut expected: Vec<(DateTime<Utc>, usize)> =
            entries.iter().enumerate().map(|(i, e)| (e.date, i)).collect();
        expected.sort();
        let expected_totals: Vec<f64> = expected
            .iter()
            .map(|(_, i)| entries[*i].stats.total_assets)
            .collect();
        let actual_totals: Vec<f64> = trend.iter().map(|p| p.total_assets).collect();
        prop_assert_eq!(actual_totals, expected_totals);
    }

    /// The feed is the exact reverse-by-date view with stable ties.
    #[test]
    fn prop_feed_is_descending_and_complete(entries in arb_entries(12)) {
        let feed = build_feed(&entries);
        prop_assert_eq!(feed.len(), entries.len());
        for pair in feed.windows(2) {
            prop_assert!(pair[0].date >= pair[1].date);
            if pair[0].date == pair[1].date {
                let first = entries.iter().position(|e| e.id == pair[0].id);
                let second = entries.iter().position(|e| e.id == pair[1].id);
                prop_assert!(first < second);
            }
        }
    }

    /// Projections are pure: same input, same output, input untouched.
    #[test]
    fn prop_summary_is_idempotent(entries in arb_entries(8)) {
        let before = entries.clone();
        let first = build_summary(&entries, GoalTarget::default());
        let second = build_summary(&entries, GoalTarget::default());
        prop_assert_eq!(first, second);
        prop_assert_eq!(entries, before);
    }

    /// append() keeps every previous entry untouched and adds exactly one.
    #[test]
    fn prop_append_is_append_only(entries in arb_entries(10)) {
        let rt = runtime();
        rt.block_on(async {
            let store = EntryStore::new(Arc::new(InMemoryStorage::new()), STORAGE_KEY);
            store.load().await.unwrap();

            for entry in &entries {
                let before = store.all();
                store.append(entry.clone()).await.unwrap();
                let after = store.all();

                assert_eq!(after.len(), before.len() + 1);
                assert_eq!(&after[..before.len()], &before[..]);
                assert_eq!(after.last(), Some(entry));
            }
        });
    }

    /// Persisting and reloading yields an equal collection.
    #[test]
    fn prop_persistence_round_trip(entries in arb_entries(10)) {
        let rt = runtime();
        rt.block_on(async {
            let storage = Arc::new(InMemoryStorage::new());
            let store = EntryStore::new(storage.clone(), STORAGE_KEY);
            store.load().await.unwrap();
            for entry in &entries {
                store.append(entry.clone()).await.unwrap();
            }

            let reloaded = EntryStore::new(storage.clone(), STORAGE_KEY);
            reloaded.load().await.unwrap();
            assert_eq!(reloaded.all(), store.all());

            let blob = storage.read(STORAGE_KEY).unwrap().unwrap();
            assert_eq!(decode_entries(&blob).unwrap(), store.all());
        });
    }
}
