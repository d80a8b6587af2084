//! Built-in sample dataset
//!
//! Served when the remote inventory is unconfigured or unreachable and no
//! fetch has succeeded yet.

use crate::models::UseCaseRecord;
use once_cell::sync::Lazy;

/// (name, agency, abbrev, topic, purpose, outputs, status)
type SampleRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
);

const SAMPLE_ROWS: [SampleRow; 6] = [
    (
        "Document Processing Automation",
        "Department of Veterans Affairs",
        "VA",
        "Document Processing",
        "To automate the processing of veteran benefit claims using AI and machine learning.",
        "Processed claim documents with extracted key information.",
        "In Development",
    ),
    (
        "Predictive Maintenance System",
        "Department of Defense",
        "DOD",
        "Maintenance",
        "To predict equipment failures and optimize maintenance schedules.",
        "Maintenance predictions and risk assessments.",
        "In Production",
    ),
    (
        "Climate Change Impact Analysis",
        "Environmental Protection Agency",
        "EPA",
        "Environmental Analysis",
        "To analyze and predict climate change impacts using AI models.",
        "Climate impact predictions and recommendations.",
        "In Testing",
    ),
    (
        "Cybersecurity Threat Detection",
        "Department of Homeland Security",
        "DHS",
        "Cybersecurity",
        "To detect and prevent cybersecurity threats using AI.",
        "Threat detection alerts and assessments.",
        "Planning",
    ),
    (
        "Healthcare Analytics Platform",
        "Department of Health and Human Services",
        "HHS",
        "Healthcare",
        "To analyze healthcare data for improved patient outcomes.",
        "Healthcare analytics and patient risk scores.",
        "In Development",
    ),
    (
        "Tax Fraud Detection System",
        "Department of the Treasury",
        "TREAS",
        "Fraud Detection",
        "To identify potential tax fraud using machine learning.",
        "Fraud risk scores and investigation recommendations.",
        "In Production",
    ),
];

static SAMPLE_RECORDS: Lazy<Vec<UseCaseRecord>> = Lazy::new(|| {
    SAMPLE_ROWS
        .iter()
        .enumerate()
        .map(
            |(i, (name, agency, abbrev, topic, purpose, outputs, status))| UseCaseRecord {
                id: (i + 1).to_string(),
                name: name.to_string(),
                agency: agency.to_string(),
                agency_abbrev: abbrev.to_string(),
                topic: topic.to_string(),
                purpose: purpose.to_string(),
                outputs: outputs.to_string(),
                status: status.to_string(),
            },
        )
        .collect()
});

/// The six fixed fallback records
pub fn sample_records() -> Vec<UseCaseRecord> {
    SAMPLE_RECORDS.clone()
}
