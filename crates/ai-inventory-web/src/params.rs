//! Raw query-string access
//!
//! Query parameters are read as ordered key/value pairs and a repeated key
//! resolves to its first value, so `?search=a&search=b` searches for `a`.

use crate::error::ApiError;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;

/// Extractor over the request's query pairs, in request order
#[derive(Debug, Clone, Default)]
pub struct QueryPairs(pub Vec<(String, String)>);

impl QueryPairs {
    /// First value given for `key`, if any (an empty value counts as given)
    pub fn first(&self, key: &str) -> Option<String> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }
}

impl<S> FromRequestParts<S> for QueryPairs
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::InvalidQuery {
                message: e.body_text(),
            })?;
        Ok(QueryPairs(pairs))
    }
}
