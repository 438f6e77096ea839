use std::sync::Arc;

use crate::dashboard::PnlDirection;
use crate::feed::feed_model::{ActionRecap, FeedItem};
use crate::journal::{EntryStoreTrait, JournalEntry};
use crate::utils::format_utils::format_signed_currency;
use crate::utils::time_utils::month_year_label;

/// Entries newest first. Equal dates keep their insertion order.
pub fn build_feed(entries: &[JournalEntry]) -> Vec<FeedItem> {
    let mut ordered: Vec<&JournalEntry> = entries.iter().collect();
    ordered.sort_by(|a, b| b.date.cmp(&a.date));
    ordered.into_iter().map(feed_item).collect()
}

fn feed_item(entry: &JournalEntry) -> FeedItem {
    FeedItem {
        id: entry.id.clone(),
        date: entry.date,
        date_label: month_year_label(entry.date),
        title: entry.title.clone(),
        total_assets: entry.stats.total_assets,
        total_pnl: entry.stats.total_pnl,
        pnl_label: format_signed_currency(entry.stats.total_pnl),
        direction: PnlDirection::of(entry.stats.total_pnl),
        media: entry.media(),
        content: entry.content.clone(),
        action_recap: entry
            .action_plan
            .iter()
            .map(|item| ActionRecap {
                asset: item.asset.clone(),
                action: item.action.clone(),
                date: item.date.clone(),
                completed: item.status.is_completed(),
            })
            .collect(),
    }
}

pub trait FeedServiceTrait: Send + Sync {
    /// Feed items newest first, truncated to `limit` when given.
    fn items(&self, limit: Option<usize>) -> Vec<FeedItem>;
}

pub struct FeedService {
    entry_store: Arc<dyn EntryStoreTrait>,
}

impl FeedService {
    pub fn new(entry_store: Arc<dyn EntryStoreTrait>) -> Self {
        Self { entry_store }
    }
}

impl FeedServiceTrait for FeedService {
    fn items(&self, limit: Option<usize>) -> Vec<FeedItem> {
        let mut items = build_feed(&self.entry_store.all());
        if let Some(limit) = limit {
            items.truncate(limit);
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::{
        sample_analysis, seed_entry, ActionItem, ActionStatus, EntryStore, JournalEntry,
    };
    use crate::storage::InMemoryStorage;
    use chrono::{Duration, TimeZone, Utc};

    fn entry_at(title: &str, total_pnl: f64, days: i64) -> JournalEntry {
        let base = Utc.timestamp_opt(1_759_276_800, 0).single().unwrap();
        JournalEntry::from_analysis(
            sample_analysis(title, 100.0, total_pnl),
            title,
            Vec::new(),
            base + Duration::days(days),
        )
    }

    #[test]
    fn test_feed_is_newest_first_with_stable_ties() {
        let entries = vec![
            entry_at("oldest", 1.0, 0),
            entry_at("tie-1", 1.0, 20),
            entry_at("tie-2", 1.0, 20),
            entry_at("middle", 1.0, 10),
        ];
        let titles: Vec<String> = build_feed(&entries).into_iter().map(|i| i.title).collect();
        assert_eq!(titles, vec!["tie-1", "tie-2", "middle", "oldest"]);
    }

    #[test]
    fn test_feed_item_header_and_direction() {
        let gain = feed_item(&entry_at("gain", 3_309_662.0, 0));
        assert_eq!(gain.date_label, "October 2025");
        assert_eq!(gain.pnl_label, "+Rp3.309.662");
        assert_eq!(gain.direction, PnlDirection::Up);

        let flat = feed_item(&entry_at("flat", 0.0, 0));
        assert_eq!(flat.pnl_label, "Rp0");
        assert_eq!(flat.direction, PnlDirection::Up);

        let loss = feed_item(&entry_at("loss", -1_000.0, 0));
        assert_eq!(loss.pnl_label, "-Rp1.000");
        assert_eq!(loss.direction, PnlDirection::Down);
    }

    #[test]
    fn test_feed_media_falls_back_to_legacy_image() {
        let mut legacy = entry_at("legacy", 1.0, 0);
        legacy.image_urls = None;
        legacy.image_url = Some("data:image/png;base64,AAAA".to_string());
        assert_eq!(feed_item(&legacy).media, vec!["data:image/png;base64,AAAA"]);

        let mut multi = entry_at("multi", 1.0, 0);
        multi.image_urls = Some(vec!["a".to_string(), "b".to_string()]);
        multi.image_url = Some("a".to_string());
        assert_eq!(feed_item(&multi).media, vec!["a", "b"]);

        assert!(feed_item(&seed_entry()).media.is_empty());
    }

    #[test]
    fn test_action_recap_preserves_order_and_status() {
        let mut entry = entry_at("plan", 1.0, 0);
        entry.action_plan = vec![
            ActionItem {
                date: "Nov 1-5".to_string(),
                asset: "PBSA".to_string(),
                action: "Buy".to_string(),
                status: ActionStatus::Completed,
            },
            ActionItem {
                date: "Nov 10".to_string(),
                asset: "BTC".to_string(),
                action: "Hold".to_string(),
                status: ActionStatus::Pending,
            },
        ];
        let recap = feed_item(&entry).action_recap;
        assert_eq!(recap[0].asset, "PBSA");
        assert!(recap[0].completed);
        assert_eq!(recap[1].asset, "BTC");
        assert!(!recap[1].completed);
    }

    #[tokio::test]
    async fn test_feed_service_applies_limit() {
        let store = Arc::new(EntryStore::new(
            Arc::new(InMemoryStorage::new()),
            "entries",
        ));
        store.load().await.unwrap();
        store.append(entry_at("newer", 5.0, 30)).await.unwrap();

        let service = FeedService::new(store);
        assert_eq!(service.items(None).len(), 2);
        let limited = service.items(Some(1));
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].title, "newer");
    }
}
