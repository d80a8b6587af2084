//! ai-inventory-web - HTTP API for the AI use-case inventory

pub mod api;
pub mod error;
pub mod pagination;
pub mod params;
pub mod router;

pub use error::ApiError;
pub use router::{create_router, generic_router, search_router, ApiStyle};

use ai_inventory_core::DataFetcher;
use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Run the web server until it fails
pub async fn run(fetcher: Arc<DataFetcher>, addr: SocketAddr, style: ApiStyle) -> Result<()> {
    let router = create_router(fetcher, style);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(%addr, %style, "Web server listening on http://{}", addr);

    axum::serve(listener, router)
        .await
        .context("Web server terminated")?;

    Ok(())
}
