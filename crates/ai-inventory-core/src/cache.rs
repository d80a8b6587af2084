//! In-process record cache with TTL
//!
//! Holds the last successfully fetched record list together with the time of
//! that fetch. The pair is replaced as a whole under one write lock, so readers
//! never see records from one fetch with the timestamp of another.
//!
//! An entry with no records counts as unpopulated: it is never served as fresh
//! or as the last good list, so the next call refetches.

use crate::models::UseCaseRecord;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default staleness window (1 hour)
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// One successful fetch
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub records: Arc<Vec<UseCaseRecord>>,
    /// Wall-clock time of the fetch, for reporting
    pub fetched_at: DateTime<Utc>,
    /// Monotonic time of the fetch, for staleness checks
    loaded: Instant,
}

impl CacheEntry {
    fn new(records: Vec<UseCaseRecord>) -> Self {
        Self {
            records: Arc::new(records),
            fetched_at: Utc::now(),
            loaded: Instant::now(),
        }
    }

    /// Stale once more than `ttl` has elapsed since the fetch; a zero `ttl`
    /// is always stale
    pub fn is_stale_at(&self, now: Instant, ttl: Duration) -> bool {
        ttl.is_zero() || now.saturating_duration_since(self.loaded) > ttl
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub struct RecordCache {
    ttl: Duration,
    entry: RwLock<Option<CacheEntry>>,
}

impl RecordCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: RwLock::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Records of the current entry if it is still fresh
    pub fn fresh(&self) -> Option<Arc<Vec<UseCaseRecord>>> {
        let now = Instant::now();
        self.entry
            .read()
            .as_ref()
            .filter(|entry| !entry.is_empty() && !entry.is_stale_at(now, self.ttl))
            .map(|entry| Arc::clone(&entry.records))
    }

    /// Records of the last successful fetch, fresh or not
    pub fn last_good(&self) -> Option<Arc<Vec<UseCaseRecord>>> {
        self.entry
            .read()
            .as_ref()
            .filter(|entry| !entry.is_empty())
            .map(|entry| Arc::clone(&entry.records))
    }

    /// Replace records and timestamp together
    pub fn store(&self, records: Vec<UseCaseRecord>) -> Arc<Vec<UseCaseRecord>> {
        let entry = CacheEntry::new(records);
        let records = Arc::clone(&entry.records);
        *self.entry.write() = Some(entry);
        records
    }

    /// Snapshot of the current entry
    pub fn entry(&self) -> Option<CacheEntry> {
        self.entry.read().clone()
    }

    pub fn clear(&self) {
        *self.entry.write() = None;
    }
}

impl Default for RecordCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: usize) -> Vec<UseCaseRecord> {
        (1..=n)
            .map(|i| UseCaseRecord {
                id: i.to_string(),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_empty_cache() {
        let cache = RecordCache::default();
        assert_eq!(cache.ttl(), DEFAULT_CACHE_TTL);
        assert!(cache.fresh().is_none());
        assert!(cache.last_good().is_none());
        assert!(cache.entry().is_none());
    }

    #[test]
    fn test_store_then_fresh() {
        let cache = RecordCache::new(Duration::from_secs(60));
        let stored = cache.store(records(3));

        let fresh = cache.fresh().unwrap();
        assert!(Arc::ptr_eq(&stored, &fresh));
        assert_eq!(fresh.len(), 3);
    }

    #[test]
    fn test_staleness_boundary() {
        let entry = CacheEntry::new(records(1));
        let ttl = Duration::from_secs(3600);

        assert!(!entry.is_stale_at(entry.loaded, ttl));
        assert!(!entry.is_stale_at(entry.loaded + Duration::from_secs(3599), ttl));
        assert!(!entry.is_stale_at(entry.loaded + ttl, ttl));
        assert!(entry.is_stale_at(entry.loaded + ttl + Duration::from_nanos(1), ttl));
        assert!(entry.is_stale_at(entry.loaded + Duration::from_secs(7200), ttl));

        assert!(entry.is_stale_at(entry.loaded, Duration::ZERO));
    }

    #[test]
    fn test_empty_entry_is_not_served() {
        let cache = RecordCache::new(Duration::from_secs(60));
        cache.store(Vec::new());

        assert!(cache.fresh().is_none());
        assert!(cache.last_good().is_none());
        assert!(cache.entry().unwrap().is_empty());

        cache.store(records(1));
        assert_eq!(cache.fresh().unwrap().len(), 1);
    }

    #[test]
    fn test_zero_ttl_is_never_fresh_but_keeps_last_good() {
        let cache = RecordCache::new(Duration::ZERO);
        cache.store(records(2));

        assert!(cache.fresh().is_none());
        assert_eq!(cache.last_good().unwrap().len(), 2);
    }

    #[test]
    fn test_store_replaces_whole_entry() {
        let cache = RecordCache::new(Duration::from_secs(60));
        cache.store(records(2));
        let first = cache.entry().unwrap();

        cache.store(records(5));
        let second = cache.entry().unwrap();

        assert_eq!(second.records.len(), 5);
        assert!(second.fetched_at >= first.fetched_at);
        assert!(!Arc::ptr_eq(&first.records, &second.records));
    }

    #[test]
    fn test_clear() {
        let cache = RecordCache::default();
        cache.store(records(1));
        cache.clear();
        assert!(cache.last_good().is_none());
    }
}
