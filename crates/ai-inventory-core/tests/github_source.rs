//! GitHubSource against a local mock of the contents API

use ai_inventory_core::{
    DataFetcher, DataOrigin, FailureClass, GitHubConfig, GitHubSource, RecordSource, SourceError,
    TokenSource,
};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

const TOKEN: &str = "test-token";
const WORKBOOK: &[u8] = include_bytes!("fixtures/inventory.xls");
const REPO: &str = "agency/inventory";

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", TOKEN))
        .unwrap_or(false)
}

/// Serve the mock API on an ephemeral port
async fn spawn_mock() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = Router::new()
        .route(
            "/repos/agency/inventory/contents/data/inventory.xls",
            get(move |headers: HeaderMap| async move {
                if !authorized(&headers) {
                    return Err(StatusCode::UNAUTHORIZED);
                }
                Ok(Json(serde_json::json!({
                    "name": "inventory.xls",
                    "download_url": format!("http://{}/raw/inventory.xls", addr),
                })))
            }),
        )
        .route(
            "/raw/inventory.xls",
            get(|headers: HeaderMap| async move {
                if !authorized(&headers) {
                    return Err(StatusCode::UNAUTHORIZED);
                }
                Ok(WORKBOOK.to_vec())
            }),
        )
        .route(
            "/repos/agency/inventory/contents/data/corrupt.xls",
            get(move || async move {
                Json(serde_json::json!({
                    "download_url": format!("http://{}/raw/corrupt.xls", addr),
                }))
            }),
        )
        .route(
            "/raw/corrupt.xls",
            get(|| async { b"not really a workbook".to_vec() }),
        )
        .route(
            "/repos/agency/inventory/contents/data/no-link.xls",
            get(|| async { Json(serde_json::json!({ "download_url": null })) }),
        )
        .route(
            "/repos/agency/inventory/contents/data/limited.xls",
            get(|| async { StatusCode::FORBIDDEN }),
        );

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

fn source(addr: SocketAddr, file_path: &str, token: Option<&str>) -> GitHubSource {
    GitHubSource::new(GitHubConfig {
        repo: REPO.to_string(),
        file_path: file_path.to_string(),
        api_base: format!("http://{}", addr),
        token: TokenSource::Static(token.map(str::to_string)),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

#[tokio::test]
async fn test_fetch_downloads_and_parses_workbook() {
    let addr = spawn_mock().await;
    let source = source(addr, "data/inventory.xls", Some(TOKEN));

    let records = source.fetch_records().await.unwrap();
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Benefits Claims Triage",
            "Wildfire Smoke Forecasting",
            "Port Cargo Screening"
        ]
    );
}

#[tokio::test]
async fn test_fetcher_serves_remote_workbook() {
    let addr = spawn_mock().await;
    let fetcher = DataFetcher::new(
        Arc::new(source(addr, "data/inventory.xls", Some(TOKEN))),
        Duration::from_secs(3600),
    );

    let outcome = fetcher.fetch_with_origin().await;
    assert_eq!(outcome.origin, DataOrigin::Remote);
    assert_eq!(outcome.records.len(), 3);

    let again = fetcher.fetch_with_origin().await;
    assert_eq!(again.origin, DataOrigin::Cache);

    let metadata = fetcher.get_metadata().await;
    assert!(metadata
        .agencies
        .contains(&"Department of Commerce (DOC)".to_string()));
}

#[tokio::test]
async fn test_corrupt_download_is_parse_failure() {
    let addr = spawn_mock().await;
    let source = source(addr, "data/corrupt.xls", Some(TOKEN));

    let err = source.fetch_records().await.unwrap_err();
    assert_eq!(err.class(), FailureClass::Parse, "unexpected error: {}", err);

    let fetcher = DataFetcher::new(Arc::new(source), Duration::from_secs(3600));
    assert_eq!(fetcher.fetch_with_origin().await.origin, DataOrigin::Sample);
}

#[tokio::test]
async fn test_bad_token_is_auth_failure() {
    let addr = spawn_mock().await;
    let source = source(addr, "data/inventory.xls", Some("wrong"));

    let err = source.fetch_records().await.unwrap_err();
    assert!(matches!(err, SourceError::Unauthorized { .. }));
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let addr = spawn_mock().await;
    let source = source(addr, "data/missing.xls", Some(TOKEN));

    let err = source.fetch_records().await.unwrap_err();
    assert_eq!(err.class(), FailureClass::NotFound);
}

#[tokio::test]
async fn test_forbidden_is_rate_limit() {
    let addr = spawn_mock().await;
    let source = source(addr, "data/limited.xls", Some(TOKEN));

    let err = source.fetch_records().await.unwrap_err();
    assert!(matches!(err, SourceError::RateLimited { status: 403, .. }));
}

#[tokio::test]
async fn test_null_download_url() {
    let addr = spawn_mock().await;
    let source = source(addr, "data/no-link.xls", Some(TOKEN));

    let err = source.fetch_records().await.unwrap_err();
    assert!(matches!(err, SourceError::MissingDownloadUrl { .. }));
}

#[tokio::test]
async fn test_no_token_is_unconfigured() {
    let addr = spawn_mock().await;
    let source = source(addr, "data/inventory.xls", None);

    assert!(!source.is_configured());
    let err = source.fetch_records().await.unwrap_err();
    assert!(matches!(err, SourceError::MissingCredential));
}

#[tokio::test]
async fn test_unreachable_host_falls_back_to_sample() {
    // Bind then drop a listener to get a port nothing is serving on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = source(addr, "data/inventory.xls", Some(TOKEN));
    let err = source.fetch_records().await.unwrap_err();
    assert_eq!(err.class(), FailureClass::Network);

    let fetcher = DataFetcher::new(Arc::new(source), Duration::from_secs(3600));
    let outcome = fetcher.fetch_with_origin().await;
    assert_eq!(outcome.origin, DataOrigin::Sample);
    assert_eq!(outcome.records.len(), 6);

    let metadata = fetcher.get_metadata().await;
    assert!(metadata
        .agencies
        .contains(&"Department of the Treasury (TREAS)".to_string()));
}
