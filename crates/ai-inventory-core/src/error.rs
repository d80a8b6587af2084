//! Error types for ai-inventory-core
//!
//! Every failure of the remote dataset source is a [`SourceError`]. The fetcher
//! never hands these to callers: it logs the failure class and degrades to the
//! last good cache or the sample dataset.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while fetching or parsing the remote dataset
#[derive(Error, Debug)]
pub enum SourceError {
    // ===================
    // Remote access
    // ===================
    #[error("No access token configured")]
    MissingCredential,

    #[error("Failed to build HTTP client")]
    Client {
        #[source]
        source: reqwest::Error,
    },

    #[error("Network error while requesting {url}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Bad credentials for {url}")]
    Unauthorized { url: String },

    #[error("Repository or file not found: {url}")]
    NotFound { url: String },

    #[error("Rate limit exceeded or insufficient permissions for {url} (HTTP {status})")]
    RateLimited { url: String, status: u16 },

    #[error("Unexpected HTTP {status} from {url}")]
    Http { url: String, status: u16 },

    #[error("Contents reply for {path} has no download URL")]
    MissingDownloadUrl { path: String },

    #[error("Invalid contents reply from {url}")]
    InvalidReply {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // ===================
    // Parse
    // ===================
    #[error("Failed to stage workbook at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read workbook: {message}")]
    Workbook { message: String },

    #[error("Workbook has no worksheets")]
    EmptyWorkbook,

    #[error("Workbook is missing required column '{column}'")]
    MissingColumn { column: String },
}

/// Coarse failure class, logged alongside each fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    Unconfigured,
    Network,
    Auth,
    NotFound,
    RateLimit,
    Http,
    Parse,
}

impl FailureClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureClass::Unconfigured => "unconfigured",
            FailureClass::Network => "network",
            FailureClass::Auth => "auth",
            FailureClass::NotFound => "not_found",
            FailureClass::RateLimit => "rate_limit",
            FailureClass::Http => "http",
            FailureClass::Parse => "parse",
        }
    }
}

impl std::fmt::Display for FailureClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SourceError {
    pub fn class(&self) -> FailureClass {
        match self {
            SourceError::MissingCredential => FailureClass::Unconfigured,
            SourceError::Client { .. } | SourceError::Network { .. } => FailureClass::Network,
            SourceError::Unauthorized { .. } => FailureClass::Auth,
            SourceError::NotFound { .. } => FailureClass::NotFound,
            SourceError::RateLimited { .. } => FailureClass::RateLimit,
            SourceError::Http { .. }
            | SourceError::MissingDownloadUrl { .. }
            | SourceError::InvalidReply { .. } => FailureClass::Http,
            SourceError::Io { .. }
            | SourceError::Workbook { .. }
            | SourceError::EmptyWorkbook
            | SourceError::MissingColumn { .. } => FailureClass::Parse,
        }
    }

    /// Actionable hint for operators reading the logs
    pub fn suggestion(&self) -> Option<&'static str> {
        match self.class() {
            FailureClass::Unconfigured => Some("Set GITHUB_TOKEN to fetch the live inventory"),
            FailureClass::Auth => Some("GitHub authentication failed. Please check your token"),
            FailureClass::NotFound => {
                Some("Repository or file not found. Please check the repository and file path")
            }
            FailureClass::RateLimit => Some("Rate limit exceeded or insufficient permissions"),
            FailureClass::Network | FailureClass::Http | FailureClass::Parse => None,
        }
    }
}

pub type SourceResult<T> = Result<T, SourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_classes() {
        let url = "https://api.github.com/x".to_string();
        assert_eq!(
            SourceError::Unauthorized { url: url.clone() }.class(),
            FailureClass::Auth
        );
        assert_eq!(
            SourceError::RateLimited { url: url.clone(), status: 403 }.class(),
            FailureClass::RateLimit
        );
        assert_eq!(
            SourceError::MissingColumn { column: "Agency".into() }.class(),
            FailureClass::Parse
        );
        assert_eq!(SourceError::MissingCredential.class().as_str(), "unconfigured");
    }

    #[test]
    fn test_suggestions() {
        let err = SourceError::NotFound { url: "u".into() };
        assert!(err.suggestion().unwrap().contains("not found"));
        assert!(SourceError::EmptyWorkbook.suggestion().is_none());
    }
}
