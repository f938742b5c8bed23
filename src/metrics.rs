//! In-process metrics registry.
//!
//! Counters and timers are recorded with explicit calls at each traced
//! operation instead of being injected by a framework. Recording is
//! advisory: a failed lock drops the sample rather than surfacing an
//! error into the request path.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

pub const TRANSACTIONS_CREATED: &str = "transactions.created";
pub const TRANSACTIONS_CREATED_BY_TYPE: &str = "transactions.created.by.type";
pub const TRANSACTIONS_FETCHED: &str = "transactions.fetched";
pub const TRANSACTIONS_QUERIES_BY_ACCOUNT: &str = "transactions.queries.by.account";
pub const TRANSACTIONS_VALIDATIONS: &str = "transactions.validations";
pub const TRANSACTIONS_CREATION_ERRORS: &str = "transactions.creation.errors";

pub const CREATION_TIME: &str = "transactions.creation.time";
pub const SAVE_TIME: &str = "transactions.save.time";
pub const FETCH_TIME: &str = "transactions.fetch.time";
pub const FETCH_BY_ACCOUNT_TIME: &str = "transactions.fetch.by.account.time";

#[derive(Debug, Default, Clone, Copy)]
pub struct TimerStats {
    pub count: u64,
    pub total: Duration,
}

#[derive(Debug, Default)]
pub struct Metrics {
    counters: Mutex<BTreeMap<String, u64>>,
    timers: Mutex<BTreeMap<String, TimerStats>>,
}

/// Full counter key for a single-tag counter, micrometer style:
/// `name{key="value"}`.
pub fn tagged(name: &str, tag_key: &str, tag_value: &str) -> String {
    format!("{}{{{}=\"{}\"}}", name, tag_key, tag_value)
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&self, name: &str) {
        self.bump(name.to_string());
    }

    pub fn increment_with(&self, name: &str, tag_key: &str, tag_value: &str) {
        self.bump(tagged(name, tag_key, tag_value));
    }

    fn bump(&self, key: String) {
        if let Ok(mut counters) = self.counters.lock() {
            *counters.entry(key).or_insert(0) += 1;
        }
    }

    pub fn record(&self, name: &str, elapsed: Duration) {
        if let Ok(mut timers) = self.timers.lock() {
            let stats = timers.entry(name.to_string()).or_default();
            stats.count += 1;
            stats.total += elapsed;
        }
    }

    pub fn counter_value(&self, key: &str) -> u64 {
        self.counters
            .lock()
            .ok()
            .and_then(|counters| counters.get(key).copied())
            .unwrap_or(0)
    }

    pub fn timer_stats(&self, name: &str) -> TimerStats {
        self.timers
            .lock()
            .ok()
            .and_then(|timers| timers.get(name).copied())
            .unwrap_or_default()
    }

    /// Plain-text dump served by the `/metrics` endpoint.
    pub fn render(&self) -> String {
        let mut out = String::new();

        if let Ok(counters) = self.counters.lock() {
            for (key, value) in counters.iter() {
                out.push_str(&format!("{} {}\n", key, value));
            }
        }

        if let Ok(timers) = self.timers.lock() {
            for (name, stats) in timers.iter() {
                out.push_str(&format!("{}.count {}\n", name, stats.count));
                out.push_str(&format!("{}.total.ms {}\n", name, stats.total.as_millis()));
            }
        }

        out
    }
}
