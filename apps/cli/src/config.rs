use std::str::FromStr;

use wealthjournal_ai::AnalyzerConfig;
use wealthjournal_core::constants::{DEFAULT_GOAL_TARGET, DEFAULT_GOAL_YEAR, DEFAULT_STORAGE_KEY};
use wealthjournal_core::dashboard::GoalTarget;

const DEFAULT_DB_PATH: &str = "./db/journal.db";

pub struct Config {
    pub db_path: String,
    pub storage_key: String,
    pub goal: GoalTarget,
    pub analyzer: AnalyzerConfig,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup("WJ_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
        let storage_key = lookup("WJ_STORAGE_KEY")
            .filter(|key| !key.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());
        let goal = GoalTarget {
            target_amount: parse_or(&lookup, "WJ_GOAL_TARGET", DEFAULT_GOAL_TARGET),
            target_year: parse_or(&lookup, "WJ_GOAL_YEAR", DEFAULT_GOAL_YEAR),
        };

        Self {
            db_path,
            storage_key,
            goal,
            analyzer: AnalyzerConfig::from_lookup(&lookup),
        }
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Display + Copy,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {}={:?}, using {}", name, raw, default);
            default
        }),
        None => default,
    }
}
