use crate::predicate::Predicate;

/// A canonical policy document and the content it must carry.
#[derive(Debug, Clone, Copy)]
pub struct ArtifactCheck {
    pub file_name: &'static str,
    pub title: &'static str,
    pub predicate: Predicate,
    /// Printed one per line when the predicate holds.
    pub confirmations: &'static [&'static str],
    /// Printed once when it does not.
    pub failure: &'static str,
}

impl ArtifactCheck {
    pub fn heading(&self, position: usize) -> String {
        format!("{}. {} ({})", position, self.title, self.file_name)
    }
}

const MISSING_CONTENT: &str = "Missing expected content";

/// Checked in this order; the first failure ends the run.
pub const CANONICAL_ARTIFACTS: &[ArtifactCheck] = &[
    ArtifactCheck {
        file_name: "fix-availability-policy.rego",
        title: "Fix Availability Policy",
        predicate: Predicate::All(&[
            Predicate::Contains("isUpgradable"),
            Predicate::Contains("fix_availability_thresholds"),
        ]),
        confirmations: &[
            "Contains fix availability checks",
            "Uses isUpgradable field from Snyk JSON",
        ],
        failure: MISSING_CONTENT,
    },
    ArtifactCheck {
        file_name: "cvss-score-policy.rego",
        title: "CVSS Score Policy",
        predicate: Predicate::All(&[
            Predicate::Contains("cvssScore"),
            Predicate::Contains("min_cvss"),
        ]),
        confirmations: &[
            "Contains CVSS score threshold check",
            "Uses cvssScore field from Snyk JSON",
        ],
        failure: MISSING_CONTENT,
    },
    ArtifactCheck {
        file_name: "cve-specific-policy.rego",
        title: "CVE-Specific Policy",
        predicate: Predicate::All(&[
            Predicate::Contains("CVE-2021"),
            Predicate::Contains("identifiers.CVE"),
            Predicate::Contains("cve_thresholds"),
        ]),
        confirmations: &[
            "Contains CVE-specific checks",
            "Checks for Log4j CVEs",
            "Uses identifiers.CVE array from Snyk JSON",
        ],
        failure: MISSING_CONTENT,
    },
    ArtifactCheck {
        file_name: "combined-policy.rego",
        title: "Combined Policy",
        // Fix availability may be expressed through the threshold table or the raw field.
        predicate: Predicate::All(&[
            Predicate::Contains("severity_thresholds"),
            Predicate::Any(&[
                Predicate::Contains("fix_availability_thresholds"),
                Predicate::Contains("isUpgradable"),
            ]),
            Predicate::Contains("cvssScore"),
        ]),
        confirmations: &[
            "Combines multiple policy types",
            "Includes severity checks",
            "Includes fix availability checks",
            "Includes CVSS score checks",
        ],
        failure: "Missing expected policy combinations",
    },
];

pub fn find(file_name: &str) -> Option<&'static ArtifactCheck> {
    CANONICAL_ARTIFACTS
        .iter()
        .find(|check| check.file_name == file_name)
}
