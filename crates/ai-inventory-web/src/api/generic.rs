//! Generic filter style endpoint
//!
//! `GET /api/use-cases?searchQuery=&agency=&topic=&status=&page=1&perPage=10`
//!
//! Unlike the search-service style, `searchQuery` matches anywhere in the
//! record's display text (field names included) and agency/topic/status must
//! match exactly, case included.

use crate::error::ApiResult;
use crate::pagination::{parse_int, Pagination};
use crate::params::QueryPairs;
use ai_inventory_core::{DataFetcher, UseCaseRecord};
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::sync::Arc;

pub const DEFAULT_PER_PAGE: i64 = 10;

#[derive(Debug, Default)]
pub struct GenericParams {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub search_query: Option<String>,
    pub agency: Option<String>,
    pub topic: Option<String>,
    pub status: Option<String>,
}

impl GenericParams {
    pub fn from_query(query: &QueryPairs) -> Self {
        Self {
            page: query.first("page"),
            per_page: query.first("perPage"),
            search_query: query.first("searchQuery"),
            agency: query.first("agency"),
            topic: query.first("topic"),
            status: query.first("status"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericPage {
    pub items: Vec<UseCaseRecord>,
    pub total: usize,
    pub page: i64,
    pub per_page: i64,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Dictionary-style display text searched by `searchQuery`
///
/// `{'id': '1', 'name': '...', ...}` with each value single-quoted, or
/// double-quoted when it contains a single quote and no double quote. Only
/// backslashes, the chosen quote and control characters are escaped, so a
/// value's quotes appear literally.
pub fn display_text(record: &UseCaseRecord) -> String {
    let fields = [
        ("id", &record.id),
        ("name", &record.name),
        ("agency", &record.agency),
        ("agency_abbrev", &record.agency_abbrev),
        ("topic", &record.topic),
        ("purpose", &record.purpose),
        ("outputs", &record.outputs),
        ("status", &record.status),
    ];

    let mut text = String::from("{");
    for (i, (name, value)) in fields.into_iter().enumerate() {
        if i > 0 {
            text.push_str(", ");
        }
        quote_into(&mut text, name);
        text.push_str(": ");
        quote_into(&mut text, value);
    }
    text.push('}');
    text
}

fn quote_into(out: &mut String, value: &str) {
    let quote = if value.contains('\'') && !value.contains('"') {
        '"'
    } else {
        '\''
    };

    out.push(quote);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
}

/// Apply the whole-record substring search and the exact-match filters
pub fn filter_records(records: &[UseCaseRecord], params: &GenericParams) -> Vec<UseCaseRecord> {
    let mut filtered: Vec<&UseCaseRecord> = records.iter().collect();

    if let Some(query) = non_empty(&params.search_query) {
        let query = query.to_lowercase();
        filtered.retain(|r| display_text(r).to_lowercase().contains(&query));
    }
    if let Some(agency) = non_empty(&params.agency) {
        filtered.retain(|r| r.agency == agency);
    }
    if let Some(topic) = non_empty(&params.topic) {
        filtered.retain(|r| r.topic == topic);
    }
    if let Some(status) = non_empty(&params.status) {
        filtered.retain(|r| r.status == status);
    }

    filtered.into_iter().cloned().collect()
}

pub async fn use_cases(
    State(fetcher): State<Arc<DataFetcher>>,
    query: QueryPairs,
) -> ApiResult<Json<GenericPage>> {
    let params = GenericParams::from_query(&query);
    let page = parse_int("page", params.page.as_deref(), 1)?;
    let per_page = parse_int("perPage", params.per_page.as_deref(), DEFAULT_PER_PAGE)?;
    let pagination = Pagination::new(page, per_page);

    let records = fetcher.fetch_data().await;
    let filtered = filter_records(&records, &params);

    Ok(Json(GenericPage {
        items: pagination.slice(&filtered).to_vec(),
        total: filtered.len(),
        page: pagination.page,
        per_page: pagination.per_page,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ai_inventory_core::source::sample_records;

    fn params() -> GenericParams {
        GenericParams::default()
    }

    #[test]
    fn test_search_query_matches_whole_record() {
        let records = sample_records();

        // Agency text is outside the fields the search-service style looks at
        let homeland = GenericParams {
            search_query: Some("homeland".into()),
            ..params()
        };
        let result = filter_records(&records, &homeland);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].agency_abbrev, "DHS");

        // Field names are part of the display text
        let field_name = GenericParams {
            search_query: Some("AGENCY_ABBREV".into()),
            ..params()
        };
        assert_eq!(filter_records(&records, &field_name).len(), 6);
    }

    #[test]
    fn test_exact_filters_are_case_sensitive() {
        let records = sample_records();

        let exact = GenericParams {
            agency: Some("Department of Defense".into()),
            ..params()
        };
        assert_eq!(filter_records(&records, &exact).len(), 1);

        let lower = GenericParams {
            agency: Some("department of defense".into()),
            ..params()
        };
        assert!(filter_records(&records, &lower).is_empty());

        // Labels are not parsed here
        let label = GenericParams {
            agency: Some("Department of Defense (DOD)".into()),
            ..params()
        };
        assert!(filter_records(&records, &label).is_empty());
    }

    #[test]
    fn test_topic_and_status() {
        let records = sample_records();
        let p = GenericParams {
            topic: Some("Healthcare".into()),
            status: Some("In Development".into()),
            ..params()
        };
        let result = filter_records(&records, &p);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "5");
    }

    #[test]
    fn test_display_text_quoting() {
        let record = UseCaseRecord {
            id: "7".into(),
            name: "Officer's Assistant".into(),
            purpose: r#"Implements the "Claims Assistant" tool"#.into(),
            outputs: r"C:\reports".into(),
            ..Default::default()
        };
        let text = display_text(&record);

        assert!(text.starts_with("{'id': '7', 'name': \"Officer's Assistant\", "));
        assert!(text.contains(r#"'purpose': 'Implements the "Claims Assistant" tool'"#));
        assert!(text.contains(r"'outputs': 'C:\\reports'"));
        assert!(text.ends_with("'status': ''}"));

        let mixed = UseCaseRecord {
            name: r#"It's "quoted""#.into(),
            ..Default::default()
        };
        assert!(display_text(&mixed).contains(r#"'name': 'It\'s "quoted"'"#));
    }

    #[test]
    fn test_search_query_matches_literal_quotes() {
        let mut records = sample_records();
        records[0].purpose = r#"Implements the "Claims Assistant" tool"#.into();

        let p = GenericParams {
            search_query: Some(r#""claims assistant""#.into()),
            ..params()
        };
        let result = filter_records(&records, &p);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "1");
    }

    #[test]
    fn test_no_filters_keep_order() {
        let records = sample_records();
        assert_eq!(filter_records(&records, &params()), records);
    }
}
