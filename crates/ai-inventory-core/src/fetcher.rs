//! Data fetcher: cached access to the inventory
//!
//! `fetch_data` serves the cache while it is fresh and refreshes it lazily
//! otherwise. It never fails: when the source is unconfigured or a refresh
//! fails, callers get the last good list, or the sample dataset if no fetch
//! has ever succeeded. The sample dataset is never cached, and neither is an
//! empty refresh: both leave the next call to retry.

use crate::cache::{CacheEntry, RecordCache};
use crate::models::{Metadata, UseCaseRecord};
use crate::search::SearchFilters;
use crate::source::{sample_records, RecordSource};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Where the records of a fetch came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    /// Fresh cache hit
    Cache,
    /// Just fetched from the source
    Remote,
    /// Stale cache served because the refresh was skipped or failed
    StaleCache,
    /// Built-in sample dataset
    Sample,
}

impl DataOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataOrigin::Cache => "cache",
            DataOrigin::Remote => "remote",
            DataOrigin::StaleCache => "stale_cache",
            DataOrigin::Sample => "sample",
        }
    }
}

/// Records plus their origin
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub records: Arc<Vec<UseCaseRecord>>,
    pub origin: DataOrigin,
}

pub struct DataFetcher {
    source: Arc<dyn RecordSource>,
    cache: RecordCache,
}

impl DataFetcher {
    pub fn new(source: Arc<dyn RecordSource>, cache_ttl: Duration) -> Self {
        info!(
            source = %source.describe(),
            ttl_secs = cache_ttl.as_secs(),
            configured = source.is_configured(),
            "Data fetcher initialized"
        );
        if !source.is_configured() {
            warn!("No access token found. Using sample data until one is configured");
        }

        Self {
            source,
            cache: RecordCache::new(cache_ttl),
        }
    }

    /// Current record list (see module docs for the fallback order)
    pub async fn fetch_data(&self) -> Arc<Vec<UseCaseRecord>> {
        self.fetch_with_origin().await.records
    }

    /// Like [`fetch_data`](Self::fetch_data), also reporting where the records came from
    pub async fn fetch_with_origin(&self) -> FetchOutcome {
        if let Some(records) = self.cache.fresh() {
            debug!(records = records.len(), "Serving cached inventory");
            return FetchOutcome {
                records,
                origin: DataOrigin::Cache,
            };
        }

        if !self.source.is_configured() {
            debug!("Source not configured, skipping refresh");
            return self.fallback();
        }

        match self.source.fetch_records().await {
            Ok(records) => {
                if records.is_empty() {
                    warn!(source = %self.source.describe(), "Source returned no records");
                }
                info!(records = records.len(), source = %self.source.describe(), "Refreshed inventory");
                FetchOutcome {
                    records: self.cache.store(records),
                    origin: DataOrigin::Remote,
                }
            }
            Err(e) => {
                warn!(
                    class = %e.class(),
                    error = %e,
                    hint = e.suggestion().unwrap_or(""),
                    "Error fetching inventory, falling back"
                );
                self.fallback()
            }
        }
    }

    fn fallback(&self) -> FetchOutcome {
        match self.cache.last_good() {
            Some(records) => {
                debug!(records = records.len(), "Serving last good inventory");
                FetchOutcome {
                    records,
                    origin: DataOrigin::StaleCache,
                }
            }
            None => FetchOutcome {
                records: Arc::new(sample_records()),
                origin: DataOrigin::Sample,
            },
        }
    }

    /// Distinct agencies, topics and statuses over the current list
    pub async fn get_metadata(&self) -> Metadata {
        let records = self.fetch_data().await;
        let metadata = Metadata::from_records(&records);
        info!(
            agencies = metadata.agencies.len(),
            topics = metadata.topics.len(),
            statuses = metadata.statuses.len(),
            "Computed filter metadata"
        );
        metadata
    }

    /// Filter the current list; empty filters return it unchanged
    pub async fn search_use_cases(&self, filters: &SearchFilters) -> Vec<UseCaseRecord> {
        let records = self.fetch_data().await;
        let results = filters.apply(&records);
        info!(?filters, results = results.len(), "Searched use cases");
        results
    }

    /// Snapshot of the cache entry, if any fetch has succeeded
    pub fn cache_entry(&self) -> Option<CacheEntry> {
        self.cache.entry()
    }

    /// Drop the cache so the next call refetches
    pub fn invalidate(&self) {
        self.cache.clear();
    }
}
