use crate::artifacts::{ArtifactCheck, CANONICAL_ARTIFACTS};
use crate::config::{CheckerConfig, MissingArtifactPolicy};
use crate::error::{ConformanceError, Result};
use crate::features::{FEATURE_MATRIX, FeatureEntry, all_implemented, evaluate_matrix};
use crate::locator::locate_artifacts;
use crate::logging::RunLogger;
use crate::report::Reporter;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

pub const RUN_TITLE: &str = "Testing Enhanced Rego Policy Generator";
pub const SUCCESS_TITLE: &str = "All Tests Passed! ✓";

const CAPABILITIES: &[&str] = &[
    "Fix Availability filtering (isUpgradable, isPatchable)",
    "CVSS Score thresholds",
    "CVE-specific checks",
    "Ignored vulnerabilities",
    "Combined policies",
    "All Snyk products (Open Source, Code, Container, IaC)",
];

/// Why a run failed. Each variant ends the run at the point it is detected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum RunFailure {
    ArtifactDirectoryMissing,
    NoArtifacts,
    ArtifactMissing(String),
    ArtifactContent(String),
    GeneratorMissing,
    FeaturesMissing(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunResult {
    pub overall_pass: bool,
    /// Every file the locator found, sorted.
    pub located: Vec<String>,
    /// Canonical artifacts that were read and passed.
    pub checked: Vec<String>,
    /// Canonical artifacts that were absent and tolerated.
    pub skipped: Vec<String>,
    /// Empty unless the run reached the feature matrix.
    pub features: Vec<FeatureEntry>,
    pub failure: Option<RunFailure>,
}

impl RunResult {
    pub fn exit_code(&self) -> u8 {
        if self.overall_pass { 0 } else { 1 }
    }
}

/// One pass of locator, artifact checks and feature matrix, in that order.
///
/// Expected failures end the run early and come back as a `RunResult` with
/// `overall_pass == false`. Only I/O problems are returned as `Err`.
pub struct ConformanceRun<'a> {
    config: &'a CheckerConfig,
    logger: Option<&'a RunLogger>,
}

impl<'a> ConformanceRun<'a> {
    pub fn new(config: &'a CheckerConfig) -> Self {
        Self {
            config,
            logger: None,
        }
    }

    pub fn with_logger(mut self, logger: &'a RunLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn execute(&self, reporter: &mut dyn Reporter) -> Result<RunResult> {
        self.config.validate()?;

        let examples = self.config.examples_path();
        let generator = self.config.generator_path();
        let mut result = RunResult::default();

        reporter.banner(RUN_TITLE);
        if let Some(logger) = self.logger {
            logger.log_run_start(&examples, &generator)?;
        }

        let located = match locate_artifacts(&examples, &self.config.extension) {
            Ok(names) => names,
            Err(ConformanceError::DirectoryNotFound(dir)) => {
                reporter.fail(&format!("Examples directory not found: {}", dir.display()));
                return self.finish(result, RunFailure::ArtifactDirectoryMissing);
            }
            Err(e) => return Err(e),
        };
        result.located = located;
        if let Some(logger) = self.logger {
            logger.log_artifacts_located(&result.located)?;
        }

        if result.located.is_empty() {
            reporter.fail(&format!(
                "No .{} files found in examples directory",
                self.config.extension
            ));
            return self.finish(result, RunFailure::NoArtifacts);
        }

        reporter.note(&format!(
            "Found {} example policy files:",
            result.located.len()
        ));
        for name in &result.located {
            reporter.note(&format!("  • {}", name));
        }

        reporter.section("Verification Results");
        for (index, check) in CANONICAL_ARTIFACTS.iter().enumerate() {
            reporter.heading(&check.heading(index + 1));

            if !result.located.iter().any(|name| name == check.file_name) {
                match self.config.missing_artifacts {
                    MissingArtifactPolicy::Tolerant => {
                        debug!(artifact = check.file_name, "artifact not present, skipping");
                        if let Some(logger) = self.logger {
                            logger.log_artifact_skipped(check.file_name)?;
                        }
                        result.skipped.push(check.file_name.to_string());
                        continue;
                    }
                    MissingArtifactPolicy::Strict => {
                        reporter.fail(&format!("Required artifact not found: {}", check.file_name));
                        let failure = RunFailure::ArtifactMissing(check.file_name.to_string());
                        return self.finish(result, failure);
                    }
                }
            }

            if !self.check_artifact(check, &examples, reporter)? {
                let failure = RunFailure::ArtifactContent(check.file_name.to_string());
                return self.finish(result, failure);
            }
            result.checked.push(check.file_name.to_string());
        }

        reporter.section("Feature Verification");
        if !generator.exists() {
            reporter.fail("Main generator script not found");
            return self.finish(result, RunFailure::GeneratorMissing);
        }

        let source = read_text(&generator)?;
        result.features = evaluate_matrix(FEATURE_MATRIX, &source);
        for entry in &result.features {
            let line = format!("{} feature implemented", entry.name);
            if entry.implemented {
                reporter.pass(&line);
            } else {
                reporter.fail(&line);
            }
            if let Some(logger) = self.logger {
                logger.log_feature_checked(&entry.name, entry.implemented)?;
            }
        }

        if !all_implemented(&result.features) {
            let missing = result
                .features
                .iter()
                .filter(|e| !e.implemented)
                .map(|e| e.name.clone())
                .collect();
            return self.finish(result, RunFailure::FeaturesMissing(missing));
        }

        reporter.banner(SUCCESS_TITLE);
        reporter.note("The enhanced generator successfully supports:");
        for capability in CAPABILITIES {
            reporter.pass(capability);
        }
        reporter.note(&format!(
            "Example policies have been generated in the '{}' directory",
            self.config.examples_dir.display()
        ));

        result.overall_pass = true;
        self.log_end(&result)?;
        info!(checked = result.checked.len(), "conformance run passed");
        Ok(result)
    }

    fn check_artifact(
        &self,
        check: &ArtifactCheck,
        examples: &Path,
        reporter: &mut dyn Reporter,
    ) -> Result<bool> {
        let content = read_text(&examples.join(check.file_name))?;
        let unmet = check.predicate.unmet(&content);
        if let Some(logger) = self.logger {
            logger.log_artifact_checked(check.file_name, unmet.is_empty(), &unmet)?;
        }

        if unmet.is_empty() {
            for confirmation in check.confirmations {
                reporter.pass(confirmation);
            }
            return Ok(true);
        }

        reporter.fail(check.failure);
        for requirement in &unmet {
            reporter.note(&format!("    missing {}", requirement));
        }
        Ok(false)
    }

    fn finish(&self, mut result: RunResult, failure: RunFailure) -> Result<RunResult> {
        warn!(failure = ?failure, "conformance run failed");
        result.overall_pass = false;
        result.failure = Some(failure);
        self.log_end(&result)?;
        Ok(result)
    }

    fn log_end(&self, result: &RunResult) -> Result<()> {
        match self.logger {
            Some(logger) => logger.log_run_end(
                result.overall_pass,
                serde_json::to_value(result).unwrap_or_default(),
            ),
            None => Ok(()),
        }
    }
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| ConformanceError::io(path, e))
}

/// Runs the checker once with `config`, without a run log.
pub fn run(config: &CheckerConfig, reporter: &mut dyn Reporter) -> Result<RunResult> {
    ConformanceRun::new(config).execute(reporter)
}
