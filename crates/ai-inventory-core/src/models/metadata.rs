//! Filter metadata derived from the record list

use super::record::{is_present_status, UseCaseRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Distinct filter values offered to the front end
///
/// Each list is sorted ascending and free of duplicates and empty entries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// `"<agency> (<abbrev>)"` labels
    pub agencies: Vec<String>,
    pub topics: Vec<String>,
    pub statuses: Vec<String>,
}

impl Metadata {
    /// Aggregate metadata over a record list
    pub fn from_records(records: &[UseCaseRecord]) -> Self {
        let agencies: BTreeSet<String> = records.iter().filter_map(|r| r.agency_label()).collect();

        let topics: BTreeSet<&str> = records
            .iter()
            .map(|r| r.topic.as_str())
            .filter(|t| !t.is_empty())
            .collect();

        let statuses: BTreeSet<&str> = records
            .iter()
            .map(|r| r.status.as_str())
            .filter(|s| is_present_status(s))
            .collect();

        Self {
            agencies: agencies.into_iter().collect(),
            topics: topics.into_iter().map(str::to_string).collect(),
            statuses: statuses.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.agencies.is_empty() && self.topics.is_empty() && self.statuses.is_empty()
    }
}
