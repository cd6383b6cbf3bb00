//! In-memory aggregation of logged messages
//!
//! Counts identical messages and tracks when they were first and last seen,
//! so the end-of-run summary can collapse repeats into a single line.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Local};

/// Occurrence statistics for one distinct message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    /// How many times the message was recorded
    pub count: u64,
    /// Timestamp of the first recording
    pub first_seen: DateTime<Local>,
    /// Timestamp of the most recent recording
    pub last_seen: DateTime<Local>,
}

/// Thread-safe cache mapping message text to occurrence statistics
///
/// Keys are compared by exact string equality on the fully formatted message,
/// so two messages differing by a single interpolated value stay separate
/// entries. First-seen order is preserved for deterministic output.
pub struct SummaryCache {
    inner: Mutex<CacheInner>,
}

#[derive(Default)]
struct CacheInner {
    /// Occurrence stats keyed by message text
    entries: HashMap<String, Occurrence>,
    /// Message texts in first-seen order
    order: Vec<String>,
}

impl SummaryCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(CacheInner::default()),
        }
    }

    /// Record one occurrence of `message`
    ///
    /// Never panics; a poisoned lock drops the record instead.
    pub fn record(&self, message: &str) {
        self.record_at(message, Local::now());
    }

    fn record_at(&self, message: &str, now: DateTime<Local>) {
        if let Ok(mut guard) = self.inner.lock() {
            let inner = &mut *guard;
            match inner.entries.entry(message.to_string()) {
                Entry::Occupied(mut occupied) => {
                    let entry = occupied.get_mut();
                    entry.count += 1;
                    entry.last_seen = now;
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(Occurrence {
                        count: 1,
                        first_seen: now,
                        last_seen: now,
                    });
                    inner.order.push(message.to_string());
                }
            }
        }
    }

    /// Take every entry in first-seen order, leaving the cache empty
    ///
    /// The read-and-clear is atomic with respect to concurrent `record` calls:
    /// a record lands either in this snapshot or in the fresh cache, never in
    /// both and never nowhere.
    pub fn drain(&self) -> Vec<(String, Occurrence)> {
        self.inner
            .lock()
            .map(|mut inner| {
                let taken = std::mem::take(&mut *inner);
                let mut entries = taken.entries;
                taken
                    .order
                    .into_iter()
                    .filter_map(|message| {
                        let entry = entries.remove(&message)?;
                        Some((message, entry))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get the number of distinct messages currently cached
    pub fn len(&self) -> usize {
        self.inner.lock().map(|inner| inner.entries.len()).unwrap_or(0)
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SummaryCache {
    fn default() -> Self {
        Self::new()
    }
}
