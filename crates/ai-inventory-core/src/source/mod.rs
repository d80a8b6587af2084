//! Dataset sources
//!
//! The inventory can come from two places:
//! 1. **GitHub** ([`GitHubSource`]): the published spreadsheet, fetched with a bearer token
//! 2. **Static** ([`StaticSource`]): a fixed record list, used offline and in tests
//!
//! When neither yields data the fetcher serves [`sample_records`].

pub mod github;
pub mod sample;
pub mod workbook;

pub use github::{GitHubConfig, GitHubSource, TokenSource};
pub use sample::sample_records;

use crate::error::SourceResult;
use crate::models::UseCaseRecord;
use async_trait::async_trait;

/// Something that can produce the full record list
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Whether the source has what it needs to attempt a fetch (e.g. a credential)
    ///
    /// Checked on every fetch, so a credential that appears later is picked up.
    fn is_configured(&self) -> bool;

    /// Fetch and normalize the whole dataset
    async fn fetch_records(&self) -> SourceResult<Vec<UseCaseRecord>>;

    /// Short human-readable description for logs
    fn describe(&self) -> String;
}

/// Source that always yields the same records
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<UseCaseRecord>,
}

impl StaticSource {
    pub fn new(records: Vec<UseCaseRecord>) -> Self {
        Self { records }
    }

    /// Static source over the built-in sample dataset
    pub fn sample() -> Self {
        Self::new(sample_records())
    }
}

#[async_trait]
impl RecordSource for StaticSource {
    fn is_configured(&self) -> bool {
        true
    }

    async fn fetch_records(&self) -> SourceResult<Vec<UseCaseRecord>> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("static ({} records)", self.records.len())
    }
}
