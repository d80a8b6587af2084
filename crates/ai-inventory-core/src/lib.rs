//! ai-inventory-core - Core library for ai-inventory
//!
//! Fetches the federal AI use-case inventory, normalizes it into records,
//! caches it, and answers search and metadata queries over it.

pub mod cache;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod search;
pub mod source;

pub use cache::{RecordCache, DEFAULT_CACHE_TTL};
pub use error::{FailureClass, SourceError, SourceResult};
pub use fetcher::{DataFetcher, DataOrigin, FetchOutcome};
pub use models::{Metadata, UseCaseRecord};
pub use search::{AgencyFilter, SearchFilters};
pub use source::{GitHubConfig, GitHubSource, RecordSource, StaticSource, TokenSource};
