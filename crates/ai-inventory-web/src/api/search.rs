//! Search-service style endpoints
//!
//! `GET /api/use-cases?search=&agency=&topic=&status=&page=1&per_page=25`
//! delegates filtering to [`DataFetcher::search_use_cases`] (field-scoped query,
//! label-aware agency matching).

use crate::error::ApiResult;
use crate::pagination::{parse_int, Pagination};
use crate::params::QueryPairs;
use ai_inventory_core::{DataFetcher, SearchFilters, UseCaseRecord};
use axum::extract::State;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const DEFAULT_PER_PAGE: i64 = 25;

#[derive(Debug, Default)]
pub struct SearchParams {
    pub search: Option<String>,
    pub agency: Option<String>,
    pub topic: Option<String>,
    pub status: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
}

impl SearchParams {
    pub fn from_query(query: &QueryPairs) -> Self {
        Self {
            search: query.first("search"),
            agency: query.first("agency"),
            topic: query.first("topic"),
            status: query.first("status"),
            page: query.first("page"),
            per_page: query.first("per_page"),
        }
    }

    fn filters(&self) -> SearchFilters {
        SearchFilters {
            query: self.search.clone(),
            agency: self.agency.clone(),
            topic: self.topic.clone(),
            status: self.status.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchPage {
    pub items: Vec<UseCaseRecord>,
    pub total_items: usize,
    pub total_pages: usize,
    pub current_page: i64,
    pub per_page: i64,
}

pub async fn use_cases(
    State(fetcher): State<Arc<DataFetcher>>,
    query: QueryPairs,
) -> ApiResult<Json<SearchPage>> {
    let params = SearchParams::from_query(&query);
    let page = parse_int("page", params.page.as_deref(), 1)?;
    let per_page = parse_int("per_page", params.per_page.as_deref(), DEFAULT_PER_PAGE)?;
    let pagination = Pagination::positive(page, per_page, "per_page")?;

    let filtered = fetcher.search_use_cases(&params.filters()).await;

    Ok(Json(SearchPage {
        items: pagination.slice(&filtered).to_vec(),
        total_items: filtered.len(),
        total_pages: pagination.total_pages(filtered.len()),
        current_page: pagination.page,
        per_page: pagination.per_page,
    }))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    /// ISO-8601 time of the check
    pub timestamp: String,
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
    })
}
