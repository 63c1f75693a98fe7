// In-memory response cache keyed by request path and query.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;

struct Entry {
    fetched_at: Instant,
    body: Value,
}

/// Raw JSON bodies reused while younger than `stale_time`.
///
/// Entries are stored undecoded so that one cache serves every payload type.
pub struct ResponseCache {
    stale_time: Duration,
    entries: Mutex<HashMap<String, Entry>>,
}

impl ResponseCache {
    pub fn new(stale_time: Duration) -> Self {
        Self {
            stale_time,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Fresh body for `key`, if any. Expired entries are evicted.
    pub fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match entries.get(key) {
            Some(entry) if entry.fetched_at.elapsed() < self.stale_time => Some(entry.body.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store `body` under `key`, sweeping out every expired entry first.
    pub fn insert(&self, key: String, body: Value) {
        if self.stale_time.is_zero() {
            return;
        }
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.retain(|_, entry| entry.fetched_at.elapsed() < self.stale_time);
        entries.insert(
            key,
            Entry {
                fetched_at: Instant::now(),
                body,
            },
        );
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
