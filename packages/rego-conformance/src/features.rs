use crate::predicate::Predicate;
use serde::Serialize;

/// A generator capability and the tokens its source must mention.
#[derive(Debug, Clone, Copy)]
pub struct FeatureRow {
    pub name: &'static str,
    pub predicate: Predicate,
}

pub const FEATURE_MATRIX: &[FeatureRow] = &[
    FeatureRow {
        name: "Fix Availability",
        predicate: Predicate::All(&[
            Predicate::Contains("FIX_AVAILABILITY_OPTIONS"),
            Predicate::Contains("fix_availability"),
        ]),
    },
    FeatureRow {
        name: "CVSS Score",
        predicate: Predicate::All(&[
            Predicate::Contains("cvss_score"),
            Predicate::Contains("cvssScore"),
        ]),
    },
    FeatureRow {
        name: "CVE-Specific",
        // The quotes are part of the token.
        predicate: Predicate::All(&[
            Predicate::Contains("\"cve\""),
            Predicate::Contains("identifiers.CVE"),
        ]),
    },
    FeatureRow {
        name: "Ignored Vulnerabilities",
        predicate: Predicate::All(&[
            Predicate::Contains("ignored_vulnerabilities"),
            Predicate::Contains("ignored_vuln_ids"),
        ]),
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureEntry {
    pub name: String,
    pub implemented: bool,
}

/// Evaluates every row against the generator source. All rows are evaluated even
/// after one fails so the report shows the whole matrix.
pub fn evaluate_matrix(rows: &[FeatureRow], source: &str) -> Vec<FeatureEntry> {
    rows.iter()
        .map(|row| FeatureEntry {
            name: row.name.to_string(),
            implemented: row.predicate.evaluate(source),
        })
        .collect()
}

pub fn all_implemented(entries: &[FeatureEntry]) -> bool {
    entries.iter().all(|e| e.implemented)
}
