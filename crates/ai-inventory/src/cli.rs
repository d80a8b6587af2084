//! Terminal output for the `search` and `metadata` commands

use ai_inventory_core::{Metadata, UseCaseRecord};
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

/// Truncate to `max` characters, appending "..." when cut
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let cut: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut)
}

/// Format search results as a table or JSON
pub fn format_records_table(records: &[UseCaseRecord], json: bool, no_color: bool) -> String {
    if json {
        return serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string());
    }

    if records.is_empty() {
        return "No use cases found.".to_string();
    }

    let headers = ["ID", "Agency", "Name", "Topic", "Status"];
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    if no_color {
        table.set_header(headers.to_vec());
    } else {
        table.set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );
    }

    for record in records {
        let agency = if record.agency_abbrev.is_empty() {
            truncate(&record.agency, 20)
        } else {
            record.agency_abbrev.clone()
        };

        table.add_row(Row::from(vec![
            record.id.clone(),
            agency,
            truncate(&record.name, 50),
            truncate(&record.topic, 25),
            truncate(&record.status, 20),
        ]));
    }

    table.to_string()
}

/// Format filter metadata as sections or JSON
pub fn format_metadata(metadata: &Metadata, json: bool) -> String {
    if json {
        return serde_json::to_string_pretty(metadata).unwrap_or_else(|_| "{}".to_string());
    }

    let mut lines = vec![];
    for (title, values) in [
        ("Agencies", &metadata.agencies),
        ("Topics", &metadata.topics),
        ("Statuses", &metadata.statuses),
    ] {
        lines.push(format!("{} ({}):", title, values.len()));
        lines.extend(values.iter().map(|v| format!("  {}", v)));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ai_inventory_core::source::sample_records;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly ten", 11), "exactly ten");
        assert_eq!(truncate("Predictive Maintenance System", 10), "Predict...");
    }

    #[test]
    fn test_records_table() {
        let output = format_records_table(&sample_records(), false, true);
        assert!(output.contains("TREAS"));
        assert!(output.contains("Status"));

        assert_eq!(format_records_table(&[], false, true), "No use cases found.");
    }

    #[test]
    fn test_records_json() {
        let output = format_records_table(&sample_records()[..1], true, true);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0]["agency_abbrev"], "VA");
    }

    #[test]
    fn test_metadata_sections() {
        let metadata = Metadata::from_records(&sample_records());
        let output = format_metadata(&metadata, false);
        assert!(output.starts_with("Agencies (6):"));
        assert!(output.contains("Statuses (4):"));
        assert!(output.contains("  Planning"));
    }
}
