//! Workbook parsing
//!
//! Turns the inventory spreadsheet (legacy `.xls`, also `.xlsx`/`.ods` by
//! extension) into normalized [`UseCaseRecord`]s. The first row of the first
//! worksheet is the header row.

use crate::error::{SourceError, SourceResult};
use crate::models::{is_present_status, UseCaseRecord};
use calamine::{open_workbook_auto, Data, Reader};
use std::io::Write;
use std::path::Path;
use tracing::debug;

pub const NAME_COLUMN: &str = "Use Case Name";
pub const AGENCY_COLUMN: &str = "Agency";
pub const AGENCY_ABBREV_COLUMN: &str = "Agency Abbreviation";
pub const TOPIC_COLUMN: &str = "Use Case Topic Area";
pub const PURPOSE_COLUMN: &str = "What is the intended purpose and expected benefits of the AI?";
pub const OUTPUTS_COLUMN: &str = "Describe the AI system's outputs.";
pub const STATUS_COLUMN: &str = "Stage of Development";

/// Cell texts treated as missing values
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Header positions of the mapped columns
#[derive(Debug, Clone, PartialEq, Eq)]
struct ColumnMap {
    name: usize,
    agency: usize,
    agency_abbrev: Option<usize>,
    topic: Option<usize>,
    purpose: Option<usize>,
    outputs: Option<usize>,
    status: Option<usize>,
}

impl ColumnMap {
    fn from_header(header: &[Data]) -> SourceResult<Self> {
        let find = |column: &str| {
            header
                .iter()
                .position(|cell| matches!(cell, Data::String(s) if s.trim() == column))
        };
        let require = |column: &str| {
            find(column).ok_or_else(|| SourceError::MissingColumn {
                column: column.to_string(),
            })
        };

        Ok(Self {
            name: require(NAME_COLUMN)?,
            agency: require(AGENCY_COLUMN)?,
            agency_abbrev: find(AGENCY_ABBREV_COLUMN),
            topic: find(TOPIC_COLUMN),
            purpose: find(PURPOSE_COLUMN),
            outputs: find(OUTPUTS_COLUMN),
            status: find(STATUS_COLUMN),
        })
    }
}

/// Text of a cell, or `None` when the cell is absent or holds a missing value
fn cell_text(row: &[Data], index: Option<usize>) -> Option<String> {
    let text = match row.get(index?)? {
        Data::Empty | Data::Error(_) => return None,
        Data::Float(f) if f.is_nan() => return None,
        Data::String(s) => s.clone(),
        other => other.to_string(),
    };

    if MISSING_MARKERS.contains(&text.as_str()) {
        None
    } else {
        Some(text)
    }
}

/// Transform data rows into records using the given header row
///
/// Rows without a name or agency are skipped, as are rows whose trimmed status
/// is empty or "nan". Ids count retained rows from 1.
pub fn rows_to_records<'a, I>(header: &[Data], rows: I) -> SourceResult<Vec<UseCaseRecord>>
where
    I: IntoIterator<Item = &'a [Data]>,
{
    let columns = ColumnMap::from_header(header)?;
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in rows {
        let (Some(name), Some(agency)) = (
            cell_text(row, Some(columns.name)),
            cell_text(row, Some(columns.agency)),
        ) else {
            skipped += 1;
            continue;
        };

        let status = cell_text(row, columns.status)
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
        if !is_present_status(&status) {
            skipped += 1;
            continue;
        }

        records.push(UseCaseRecord {
            id: (records.len() + 1).to_string(),
            name,
            agency,
            agency_abbrev: cell_text(row, columns.agency_abbrev).unwrap_or_default(),
            topic: cell_text(row, columns.topic).unwrap_or_default(),
            purpose: cell_text(row, columns.purpose).unwrap_or_default(),
            outputs: cell_text(row, columns.outputs).unwrap_or_default(),
            status,
        });
    }

    debug!(kept = records.len(), skipped, "Transformed workbook rows");
    Ok(records)
}

/// Parse a workbook file from disk
pub fn parse_workbook(path: &Path) -> SourceResult<Vec<UseCaseRecord>> {
    let mut workbook = open_workbook_auto(path).map_err(|e| SourceError::Workbook {
        message: e.to_string(),
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SourceError::EmptyWorkbook)?
        .map_err(|e| SourceError::Workbook {
            message: e.to_string(),
        })?;

    let mut rows = range.rows();
    let header = rows.next().ok_or(SourceError::EmptyWorkbook)?;
    rows_to_records(header, rows)
}

/// Stage downloaded bytes in a temporary file and parse them
///
/// `extension` selects the reader (e.g. `"xls"`). The temporary file is removed
/// once parsing finishes, whether or not it succeeded.
pub fn parse_workbook_bytes(bytes: &[u8], extension: &str) -> SourceResult<Vec<UseCaseRecord>> {
    let mut staged = tempfile::Builder::new()
        .prefix("ai-inventory-")
        .suffix(&format!(".{}", extension))
        .tempfile()
        .map_err(|source| SourceError::Io {
            path: std::env::temp_dir(),
            source,
        })?;

    let path = staged.path().to_path_buf();
    staged
        .write_all(bytes)
        .and_then(|_| staged.flush())
        .map_err(|source| SourceError::Io {
            path: path.clone(),
            source,
        })?;
    debug!(path = %path.display(), bytes = bytes.len(), "Staged workbook");

    let parsed = parse_workbook(&path);

    if let Err(e) = staged.close() {
        debug!(path = %path.display(), error = %e, "Failed to remove staged workbook");
    }

    parsed
}
