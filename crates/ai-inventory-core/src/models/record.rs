//! Use case record model

use serde::{Deserialize, Serialize};

/// One inventoried AI use case, normalized from a spreadsheet row
///
/// Every text field is an empty string when the source cell was missing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UseCaseRecord {
    /// 1-based position among retained rows (not stable across refreshes)
    pub id: String,
    pub name: String,
    pub agency: String,
    pub agency_abbrev: String,
    pub topic: String,
    pub purpose: String,
    pub outputs: String,
    /// Stage of development, trimmed
    pub status: String,
}

impl UseCaseRecord {
    /// Whether `status` carries a usable value (non-empty and not "nan")
    pub fn has_status(&self) -> bool {
        is_present_status(&self.status)
    }

    /// Combined agency label used by filter metadata, e.g. `"Department of Defense (DOD)"`
    ///
    /// Returns `None` unless both the agency and its abbreviation are known.
    pub fn agency_label(&self) -> Option<String> {
        if self.agency.is_empty() || self.agency_abbrev.is_empty() {
            return None;
        }
        Some(format!("{} ({})", self.agency, self.agency_abbrev))
    }
}

/// Status values that are empty or the literal "nan" carry no information
pub fn is_present_status(status: &str) -> bool {
    !status.is_empty() && !status.eq_ignore_ascii_case("nan")
}
