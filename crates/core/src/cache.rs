//! In-memory memoization of aggregate mess stats.
//!
//! Entries have no expiry. They leave the cache only through
//! [`StatsCache::invalidate`] or [`StatsCache::clear_all`]; writes to
//! attendance or settings do not evict anything by themselves.
//!
//! A value computed from storage is stored with [`StatsCache::put_if_current`]
//! against a [`CacheTicket`] taken before the reads started. An invalidation
//! in between makes the ticket stale and the write is dropped, so a slow
//! computation cannot resurrect figures from before a configuration change.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::billing::MessStats;
use crate::types::MessPeriod;

/// Snapshot of a key's generation, taken before computing its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTicket {
    epoch: u64,
    generation: u64,
}

#[derive(Default)]
struct Entries {
    values: HashMap<MessPeriod, Arc<MessStats>>,
    /// Bumped per key by `invalidate`.
    generations: HashMap<MessPeriod, u64>,
    /// Bumped by `clear_all`.
    epoch: u64,
}

impl Entries {
    fn ticket(&self, period: MessPeriod) -> CacheTicket {
        CacheTicket {
            epoch: self.epoch,
            generation: self.generations.get(&period).copied().unwrap_or(0),
        }
    }
}

/// Thread-safe stats cache keyed by [`MessPeriod`].
///
/// Values are stored behind `Arc` and replaced whole, so a reader sees
/// either the previous entry or the new one, never a partial write.
#[derive(Default)]
pub struct StatsCache {
    entries: RwLock<Entries>,
}

impl StatsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, period: MessPeriod) -> Option<Arc<MessStats>> {
        self.entries.read().await.values.get(&period).cloned()
    }

    /// Take a ticket for `period` before reading the data its value is
    /// computed from.
    pub async fn ticket(&self, period: MessPeriod) -> CacheTicket {
        self.entries.read().await.ticket(period)
    }

    /// Store unconditionally.
    pub async fn put(&self, period: MessPeriod, stats: MessStats) -> Arc<MessStats> {
        let stats = Arc::new(stats);
        self.entries
            .write()
            .await
            .values
            .insert(period, Arc::clone(&stats));
        stats
    }

    /// Store only if `period` has not been invalidated (and the cache not
    /// cleared) since `ticket` was taken. Returns `true` if stored.
    pub async fn put_if_current(
        &self,
        period: MessPeriod,
        ticket: CacheTicket,
        stats: MessStats,
    ) -> bool {
        let mut entries = self.entries.write().await;
        if entries.ticket(period) != ticket {
            return false;
        }
        entries.values.insert(period, Arc::new(stats));
        true
    }

    /// Drop the entry for `period`. Returns `true` if one existed.
    pub async fn invalidate(&self, period: MessPeriod) -> bool {
        let mut entries = self.entries.write().await;
        *entries.generations.entry(period).or_insert(0) += 1;
        entries.values.remove(&period).is_some()
    }

    pub async fn clear_all(&self) {
        let mut entries = self.entries.write().await;
        entries.values.clear();
        entries.generations.clear();
        entries.epoch += 1;
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.values.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.values.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
