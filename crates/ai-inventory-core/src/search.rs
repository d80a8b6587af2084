//! Record filtering
//!
//! Filters apply in a fixed order (query, agency, topic, status), each one
//! narrowing the previous result. An empty filter value is a no-op, so
//! [`SearchFilters::default`] keeps every record in its original order.

use crate::models::{is_present_status, UseCaseRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Search criteria; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Case-insensitive substring of name, purpose or outputs
    #[serde(default)]
    pub query: Option<String>,
    /// Agency name, abbreviation, or `"<name> (<abbrev>)"` label
    #[serde(default)]
    pub agency: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl SearchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn agency(mut self, agency: impl Into<String>) -> Self {
        self.agency = Some(agency.into());
        self
    }

    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// True when no filter would narrow the result
    pub fn is_empty(&self) -> bool {
        [&self.query, &self.agency, &self.topic, &self.status]
            .into_iter()
            .all(|f| active(f).is_none())
    }

    /// Apply every active filter, preserving record order
    pub fn apply(&self, records: &[UseCaseRecord]) -> Vec<UseCaseRecord> {
        let mut matched: Vec<&UseCaseRecord> = records.iter().collect();

        if let Some(query) = active(&self.query) {
            let query = query.to_lowercase();
            matched.retain(|r| matches_query(r, &query));
            debug!(query = %query, remaining = matched.len(), "Applied query filter");
        }

        if let Some(agency) = active(&self.agency) {
            let filter = AgencyFilter::parse(agency);
            matched.retain(|r| filter.matches(r));
            debug!(?filter, remaining = matched.len(), "Applied agency filter");
        }

        if let Some(topic) = active(&self.topic) {
            let topic = topic.to_lowercase();
            matched.retain(|r| r.topic.to_lowercase() == topic);
            debug!(topic = %topic, remaining = matched.len(), "Applied topic filter");
        }

        if let Some(status) = active(&self.status) {
            let status = status.to_lowercase();
            matched.retain(|r| is_present_status(&r.status) && r.status.to_lowercase() == status);
            debug!(status = %status, remaining = matched.len(), "Applied status filter");
        }

        matched.into_iter().cloned().collect()
    }
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn matches_query(record: &UseCaseRecord, query: &str) -> bool {
    [&record.name, &record.purpose, &record.outputs]
        .iter()
        .any(|field| field.to_lowercase().contains(query))
}

/// Parsed agency filter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgencyFilter {
    /// `"Department of Defense (DOD)"`: matches the name or the abbreviation
    Labeled { name: String, abbrev: String },
    /// Bare value: matches either the name or the abbreviation
    Plain(String),
}

impl AgencyFilter {
    /// Parse a filter value; comparison parts are lowercased
    ///
    /// The name is the text before the first `(`. The abbreviation is the text
    /// after it, up to any further `(`, with closing parentheses removed.
    pub fn parse(value: &str) -> Self {
        let value = value.to_lowercase();
        match value.split_once('(') {
            Some((name, rest)) => {
                let abbrev = rest.split('(').next().unwrap_or_default();
                AgencyFilter::Labeled {
                    name: name.trim().to_string(),
                    abbrev: abbrev.replace(')', "").trim().to_string(),
                }
            }
            None => AgencyFilter::Plain(value),
        }
    }

    pub fn matches(&self, record: &UseCaseRecord) -> bool {
        let agency = record.agency.to_lowercase();
        let abbrev = record.agency_abbrev.to_lowercase();
        match self {
            AgencyFilter::Labeled { name, abbrev: wanted } => agency == *name || abbrev == *wanted,
            AgencyFilter::Plain(value) => agency == *value || abbrev == *value,
        }
    }
}
