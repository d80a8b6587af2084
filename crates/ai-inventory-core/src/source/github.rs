//! GitHub-hosted inventory source
//!
//! Resolves the spreadsheet through the repository contents API, downloads it
//! from the returned `download_url` and parses it.
//! Default location: `ombegov/2024-Federal-AI-Use-Case-Inventory`, file
//! `data/2024_consolidated_ai_inventory_raw_v2.xls`.

use super::workbook;
use super::RecordSource;
use crate::error::{SourceError, SourceResult};
use crate::models::UseCaseRecord;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_REPO: &str = "ombegov/2024-Federal-AI-Use-Case-Inventory";
pub const DEFAULT_FILE_PATH: &str = "data/2024_consolidated_ai_inventory_raw_v2.xls";
pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_TOKEN_ENV: &str = "GITHUB_TOKEN";

const GITHUB_JSON: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("ai-inventory/", env!("CARGO_PKG_VERSION"));

/// Where the bearer token comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// Fixed token (or explicitly none)
    Static(Option<String>),
    /// Read from the named environment variable on every fetch
    Env(String),
}

impl TokenSource {
    /// Current token, ignoring blank values
    pub fn resolve(&self) -> Option<String> {
        let token = match self {
            TokenSource::Static(token) => token.clone(),
            TokenSource::Env(var) => std::env::var(var).ok(),
        };
        token.filter(|t| !t.trim().is_empty())
    }
}

impl Default for TokenSource {
    fn default() -> Self {
        TokenSource::Env(DEFAULT_TOKEN_ENV.to_string())
    }
}

/// Location of the inventory and how to reach it
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// `owner/name`
    pub repo: String,
    /// Path of the spreadsheet inside the repository
    pub file_path: String,
    /// API root, without trailing slash
    pub api_base: String,
    pub token: TokenSource,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            repo: DEFAULT_REPO.to_string(),
            file_path: DEFAULT_FILE_PATH.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            token: TokenSource::default(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl GitHubConfig {
    /// Contents API URL of the spreadsheet
    pub fn contents_url(&self) -> String {
        format!(
            "{}/repos/{}/contents/{}",
            self.api_base.trim_end_matches('/'),
            self.repo.trim_matches('/'),
            self.file_path.trim_start_matches('/')
        )
    }

    /// Lowercased file extension, used to pick the workbook reader
    pub fn extension(&self) -> String {
        Path::new(&self.file_path)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("xls")
            .to_ascii_lowercase()
    }
}

/// Subset of the contents API reply we use
#[derive(Debug, Deserialize)]
struct ContentsReply {
    #[serde(default)]
    download_url: Option<String>,
}

pub struct GitHubSource {
    config: GitHubConfig,
    client: reqwest::Client,
}

impl GitHubSource {
    pub fn new(config: GitHubConfig) -> SourceResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|source| SourceError::Client { source })?;

        Ok(Self { config, client })
    }

    async fn get(&self, url: &str, token: &str, accept: &str) -> SourceResult<reqwest::Response> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .header(ACCEPT, accept)
            .send()
            .await
            .map_err(|source| SourceError::Network {
                url: url.to_string(),
                source,
            })?;

        check_status(url, response.status())?;
        Ok(response)
    }

    /// Resolve the direct download URL of the spreadsheet
    async fn resolve_download_url(&self, token: &str) -> SourceResult<String> {
        let url = self.config.contents_url();
        let reply: ContentsReply = self
            .get(&url, token, GITHUB_JSON)
            .await?
            .json()
            .await
            .map_err(|source| SourceError::InvalidReply {
                url: url.clone(),
                source,
            })?;

        reply
            .download_url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| SourceError::MissingDownloadUrl {
                path: self.config.file_path.clone(),
            })
    }
}

/// Map a non-success status to its failure variant
fn check_status(url: &str, status: StatusCode) -> SourceResult<()> {
    if status.is_success() {
        return Ok(());
    }

    let url = url.to_string();
    Err(match status {
        StatusCode::UNAUTHORIZED => SourceError::Unauthorized { url },
        StatusCode::NOT_FOUND => SourceError::NotFound { url },
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => SourceError::RateLimited {
            url,
            status: status.as_u16(),
        },
        other => SourceError::Http {
            url,
            status: other.as_u16(),
        },
    })
}

#[async_trait]
impl RecordSource for GitHubSource {
    fn is_configured(&self) -> bool {
        self.config.token.resolve().is_some()
    }

    async fn fetch_records(&self) -> SourceResult<Vec<UseCaseRecord>> {
        let token = self
            .config
            .token
            .resolve()
            .ok_or(SourceError::MissingCredential)?;

        info!(
            repo = %self.config.repo,
            path = %self.config.file_path,
            "Fetching inventory from GitHub"
        );
        let download_url = self.resolve_download_url(&token).await?;

        info!(url = %download_url, "Downloading inventory workbook");
        let bytes = self
            .get(&download_url, &token, "*/*")
            .await?
            .bytes()
            .await
            .map_err(|source| SourceError::Network {
                url: download_url.clone(),
                source,
            })?;

        let extension = self.config.extension();
        let records =
            tokio::task::spawn_blocking(move || workbook::parse_workbook_bytes(&bytes, &extension))
                .await
                .map_err(|e| SourceError::Workbook {
                    message: format!("parser task failed: {}", e),
                })??;

        info!(records = records.len(), "Parsed inventory workbook");
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("github:{}/{}", self.config.repo, self.config.file_path)
    }
}
