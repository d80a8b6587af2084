//! Request handlers

pub mod generic;
pub mod search;

use ai_inventory_core::{DataFetcher, Metadata};
use axum::extract::State;
use axum::Json;
use std::sync::Arc;

/// `GET /api/metadata`, shared by both API styles
pub async fn metadata(State(fetcher): State<Arc<DataFetcher>>) -> Json<Metadata> {
    Json(fetcher.get_metadata().await)
}
