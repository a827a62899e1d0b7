use anyhow::Result;
use conformance_e2e::fixture;
use rego_conformance::logging::RunLogger;
use rego_conformance::{
    CheckerConfig, ConformanceRun, MissingArtifactPolicy, RecordingReporter, RunFailure, run,
};
use tempfile::tempdir;

#[test]
fn test_complete_fixture_passes() -> Result<()> {
    let config = CheckerConfig::new(fixture("complete"));
    let mut reporter = RecordingReporter::new();
    let result = run(&config, &mut reporter)?;

    assert!(result.overall_pass);
    assert_eq!(result.exit_code(), 0);
    assert_eq!(result.located.len(), 4, "README.md must not be located");
    assert_eq!(
        result.checked,
        vec![
            "fix-availability-policy.rego",
            "cvss-score-policy.rego",
            "cve-specific-policy.rego",
            "combined-policy.rego",
        ]
    );
    assert!(result.skipped.is_empty());
    assert!(result.features.iter().all(|f| f.implemented));
    assert!(reporter.contains("Checks for Log4j CVEs"));
    assert!(reporter.contains("CVE-Specific feature implemented"));
    Ok(())
}

#[test]
fn test_complete_fixture_passes_strict() -> Result<()> {
    let mut config = CheckerConfig::new(fixture("complete"));
    config.missing_artifacts = MissingArtifactPolicy::Strict;
    let result = run(&config, &mut RecordingReporter::new())?;
    assert!(result.overall_pass);
    Ok(())
}

#[test]
fn test_lone_cvss_policy_depends_on_policy_choice() -> Result<()> {
    let tolerant = CheckerConfig::new(fixture("cvss-only"));
    let result = run(&tolerant, &mut RecordingReporter::new())?;
    assert_eq!(result.exit_code(), 0);
    assert_eq!(result.checked, vec!["cvss-score-policy.rego"]);
    assert_eq!(
        result.skipped,
        vec![
            "fix-availability-policy.rego",
            "cve-specific-policy.rego",
            "combined-policy.rego",
        ]
    );

    let mut strict = tolerant.clone();
    strict.missing_artifacts = MissingArtifactPolicy::Strict;
    let result = run(&strict, &mut RecordingReporter::new())?;
    assert_eq!(result.exit_code(), 1);
    assert!(result.features.is_empty());
    Ok(())
}

#[test]
fn test_combined_without_fix_availability_fails() -> Result<()> {
    let config = CheckerConfig::new(fixture("broken-combined"));
    let mut reporter = RecordingReporter::new();
    let result = run(&config, &mut reporter)?;

    assert_eq!(
        result.failure,
        Some(RunFailure::ArtifactContent("combined-policy.rego".to_string()))
    );
    assert_eq!(result.checked, vec!["cvss-score-policy.rego"]);
    assert!(reporter.contains("one of `fix_availability_thresholds` or `isUpgradable`"));
    assert!(!reporter.contains("Feature Verification"));
    Ok(())
}

#[test]
fn test_directory_without_policies_fails() -> Result<()> {
    let config = CheckerConfig::new(fixture("empty"));
    let result = run(&config, &mut RecordingReporter::new())?;
    assert_eq!(result.failure, Some(RunFailure::NoArtifacts));
    assert_eq!(result.exit_code(), 1);
    Ok(())
}

#[test]
fn test_generator_is_mandatory_even_when_policies_pass() -> Result<()> {
    let mut config = CheckerConfig::new(fixture("complete"));
    config.generator = "missing-generator".into();
    let mut reporter = RecordingReporter::new();
    let result = run(&config, &mut reporter)?;

    assert_eq!(result.checked.len(), 4);
    assert_eq!(result.failure, Some(RunFailure::GeneratorMissing));
    assert_eq!(result.exit_code(), 1);
    Ok(())
}

#[test]
fn test_runs_are_idempotent() -> Result<()> {
    for name in ["complete", "cvss-only", "broken-combined", "empty", "absent"] {
        let config = CheckerConfig::new(fixture(name));
        let mut first_report = RecordingReporter::new();
        let mut second_report = RecordingReporter::new();
        let first = run(&config, &mut first_report)?;
        let second = run(&config, &mut second_report)?;

        assert_eq!(first, second, "fixture {}", name);
        assert_eq!(first.exit_code(), second.exit_code());
        assert_eq!(first_report.lines, second_report.lines);
    }
    Ok(())
}

#[test]
fn test_run_log_for_failed_run() -> Result<()> {
    let tmp = tempdir()?;
    let logger = RunLogger::new(tmp.path().join("run.jsonl"))?;
    let config = CheckerConfig::new(fixture("broken-combined"));
    let result = ConformanceRun::new(&config)
        .with_logger(&logger)
        .execute(&mut RecordingReporter::new())?;
    assert!(!result.overall_pass);

    let content = std::fs::read_to_string(logger.log_file_path())?;
    let events: Vec<serde_json::Value> = content
        .lines()
        .map(serde_json::from_str::<serde_json::Value>)
        .collect::<std::result::Result<_, _>>()?;
    let kinds: Vec<&str> = events
        .iter()
        .map(|e| e["event_type"].as_str().unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec![
            "run_start",
            "artifacts_located",
            "artifact_skipped",
            "artifact_checked",
            "artifact_skipped",
            "artifact_checked",
            "run_end",
        ]
    );
    let end = events.last().unwrap();
    assert_eq!(end["level"], "warn");
    assert_eq!(end["details"]["failure"]["kind"], "artifact_content");
    assert_eq!(end["details"]["failure"]["detail"], "combined-policy.rego");
    Ok(())
}
