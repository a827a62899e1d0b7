use crate::error::{ConformanceError, Result};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum LogEventType {
    RunStart,
    ArtifactsLocated,
    ArtifactChecked,
    ArtifactSkipped,
    FeatureChecked,
    RunEnd,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// One line of the JSONL run log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub timestamp: String,
    pub event_type: LogEventType,
    pub level: LogLevel,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl LogEvent {
    pub fn new(
        event_type: LogEventType,
        level: LogLevel,
        message: impl Into<String>,
        details: Option<serde_json::Value>,
    ) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            event_type,
            level,
            message: message.into(),
            details,
        }
    }

    pub fn info_with_details(
        event_type: LogEventType,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self::new(event_type, LogLevel::Info, message, Some(details))
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(LogEventType::Error, LogLevel::Error, message, None)
    }
}

/// Appends structured events for a run to a JSONL file.
///
/// The file is opened and flushed on every event so a crashed run still leaves
/// the events written so far.
pub struct RunLogger {
    log_file_path: PathBuf,
}

impl RunLogger {
    /// Creates the parent directory of `path` if needed.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let log_file_path = path.into();
        if let Some(parent) = log_file_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| ConformanceError::io(parent, e))?;
            }
        }
        Ok(Self { log_file_path })
    }

    pub fn log(&self, event: LogEvent) -> Result<()> {
        let mut line = serde_json::to_string(&event).map_err(|e| {
            ConformanceError::io(&self.log_file_path, std::io::Error::other(e))
        })?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file_path)
            .map_err(|e| ConformanceError::io(&self.log_file_path, e))?;
        file.write_all(line.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| ConformanceError::io(&self.log_file_path, e))
    }

    pub fn log_run_start(&self, examples: &Path, generator: &Path) -> Result<()> {
        self.log(LogEvent::info_with_details(
            LogEventType::RunStart,
            "Conformance run started",
            serde_json::json!({
                "examples_dir": examples.display().to_string(),
                "generator": generator.display().to_string(),
            }),
        ))
    }

    pub fn log_artifacts_located(&self, names: &[String]) -> Result<()> {
        self.log(LogEvent::info_with_details(
            LogEventType::ArtifactsLocated,
            format!("Located {} artifacts", names.len()),
            serde_json::json!({ "artifacts": names }),
        ))
    }

    pub fn log_artifact_checked(&self, name: &str, passed: bool, unmet: &[String]) -> Result<()> {
        let (level, message) = if passed {
            (LogLevel::Info, format!("Artifact passed: {}", name))
        } else {
            (LogLevel::Warn, format!("Artifact failed: {}", name))
        };
        self.log(LogEvent::new(
            LogEventType::ArtifactChecked,
            level,
            message,
            Some(serde_json::json!({
                "artifact": name,
                "passed": passed,
                "unmet": unmet,
            })),
        ))
    }

    pub fn log_artifact_skipped(&self, name: &str) -> Result<()> {
        self.log(LogEvent::new(
            LogEventType::ArtifactSkipped,
            LogLevel::Debug,
            format!("Artifact not present: {}", name),
            Some(serde_json::json!({ "artifact": name })),
        ))
    }

    pub fn log_feature_checked(&self, feature: &str, implemented: bool) -> Result<()> {
        let level = if implemented {
            LogLevel::Info
        } else {
            LogLevel::Warn
        };
        self.log(LogEvent::new(
            LogEventType::FeatureChecked,
            level,
            format!("Feature {}: {}", feature, implemented),
            Some(serde_json::json!({
                "feature": feature,
                "implemented": implemented,
            })),
        ))
    }

    pub fn log_run_end(&self, passed: bool, details: serde_json::Value) -> Result<()> {
        let level = if passed {
            LogLevel::Info
        } else {
            LogLevel::Warn
        };
        self.log(LogEvent::new(
            LogEventType::RunEnd,
            level,
            if passed {
                "Conformance run passed"
            } else {
                "Conformance run failed"
            },
            Some(details),
        ))
    }

    pub fn log_error(&self, message: &str) -> Result<()> {
        self.log(LogEvent::error(message))
    }

    pub fn log_file_path(&self) -> &Path {
        &self.log_file_path
    }
}
