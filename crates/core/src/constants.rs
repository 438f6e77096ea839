/// Name of the storage slot holding the serialized entry collection
pub const DEFAULT_STORAGE_KEY: &str = "wealth_architect_entries";

/// Identifier of the demo entry used when no journal has been persisted yet
pub const SEED_ENTRY_ID: &str = "initial-oct-2025";

/// Upper bound for a single analyzer call
pub const DEFAULT_ANALYSIS_TIMEOUT_SECS: u64 = 60;

/// Wealth goal shown on the dashboard (Rp1 Billion)
pub const DEFAULT_GOAL_TARGET: f64 = 1_000_000_000.0;

/// Year by which the wealth goal should be reached
pub const DEFAULT_GOAL_YEAR: i32 = 2029;

/// Label used when there is no entry to derive a date from
pub const NO_DATA_LABEL: &str = "N/A";

/// Buffered domain events per subscriber before the oldest are dropped
pub const EVENT_CHANNEL_CAPACITY: usize = 64;
