//! Web router using Axum
//!
//! Two API styles share the `/api/use-cases` path with different parameters
//! and response shapes, so a process mounts exactly one of them.

use crate::api;
use ai_inventory_core::DataFetcher;
use axum::{routing::get, Router};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Which use-case API contract to serve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiStyle {
    /// `search`/`per_page` params, `{items, total_items, total_pages, current_page, per_page}`,
    /// health check and permissive CORS
    #[default]
    Search,
    /// `searchQuery`/`perPage` params, `{items, total, page, perPage}`
    Generic,
}

impl FromStr for ApiStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "search" => Ok(ApiStyle::Search),
            "generic" => Ok(ApiStyle::Generic),
            other => Err(format!(
                "unknown API style '{}' (expected 'search' or 'generic')",
                other
            )),
        }
    }
}

impl fmt::Display for ApiStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiStyle::Search => f.write_str("search"),
            ApiStyle::Generic => f.write_str("generic"),
        }
    }
}

/// Create the router for the given API style
pub fn create_router(fetcher: Arc<DataFetcher>, style: ApiStyle) -> Router {
    match style {
        ApiStyle::Search => search_router(fetcher),
        ApiStyle::Generic => generic_router(fetcher),
    }
}

/// Search-service style API
pub fn search_router(fetcher: Arc<DataFetcher>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/use-cases", get(api::search::use_cases))
        .route("/api/metadata", get(api::metadata))
        .route("/api/health", get(api::search::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(fetcher)
}

/// Generic filter style API
pub fn generic_router(fetcher: Arc<DataFetcher>) -> Router {
    Router::new()
        .route("/api/use-cases", get(api::generic::use_cases))
        .route("/api/metadata", get(api::metadata))
        .layer(TraceLayer::new_for_http())
        .with_state(fetcher)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_style_parse() {
        assert_eq!("search".parse::<ApiStyle>().unwrap(), ApiStyle::Search);
        assert_eq!("Generic".parse::<ApiStyle>().unwrap(), ApiStyle::Generic);
        assert!("both".parse::<ApiStyle>().is_err());
        assert_eq!(ApiStyle::default().to_string(), "search");
    }
}
