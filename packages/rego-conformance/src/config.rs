use crate::error::{ConformanceError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "conformance.json";

/// How a canonical artifact that is absent from the examples directory is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingArtifactPolicy {
    /// Skip the artifact; only the artifacts that exist are checked.
    #[default]
    Tolerant,
    /// Fail the run on the first absent artifact.
    Strict,
}

/// Paths and switches for one conformance run. Relative paths resolve against `root`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckerConfig {
    pub root: PathBuf,
    pub examples_dir: PathBuf,
    pub generator: PathBuf,
    pub extension: String,
    pub missing_artifacts: MissingArtifactPolicy,
}

/// On-disk form of `conformance.json`; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    examples_dir: Option<PathBuf>,
    generator: Option<PathBuf>,
    extension: Option<String>,
    missing_artifacts: Option<MissingArtifactPolicy>,
}

pub fn default_examples_dir() -> PathBuf {
    PathBuf::from("examples")
}

pub fn default_generator() -> PathBuf {
    PathBuf::from("rego-policy-generator")
}

pub fn default_extension() -> String {
    "rego".to_string()
}

impl CheckerConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            examples_dir: default_examples_dir(),
            generator: default_generator(),
            extension: default_extension(),
            missing_artifacts: MissingArtifactPolicy::default(),
        }
    }

    /// Builds the defaults for `root`, then applies `root/conformance.json` if it exists.
    pub fn load(root: impl Into<PathBuf>) -> Result<Self> {
        let mut config = Self::new(root);
        let path = config.root.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Ok(config);
        }

        let content = fs::read_to_string(&path).map_err(|e| ConformanceError::io(&path, e))?;
        let file: ConfigFile =
            serde_json::from_str(&content).map_err(|source| ConformanceError::ConfigParse {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(path = %path.display(), "loaded configuration file");

        if let Some(dir) = file.examples_dir {
            config.examples_dir = dir;
        }
        if let Some(generator) = file.generator {
            config.generator = generator;
        }
        if let Some(extension) = file.extension {
            config = config.with_extension(extension);
        }
        if let Some(policy) = file.missing_artifacts {
            config.missing_artifacts = policy;
        }
        Ok(config)
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.extension.is_empty() {
            return Err(ConformanceError::InvalidConfig(
                "extension must not be empty".to_string(),
            ));
        }
        if self.extension.starts_with('.') {
            return Err(ConformanceError::InvalidConfig(format!(
                "extension must not start with a dot: {}",
                self.extension
            )));
        }
        if self.examples_dir.as_os_str().is_empty() {
            return Err(ConformanceError::InvalidConfig(
                "examples_dir must not be empty".to_string(),
            ));
        }
        if self.generator.as_os_str().is_empty() {
            return Err(ConformanceError::InvalidConfig(
                "generator must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn examples_path(&self) -> PathBuf {
        resolve(&self.root, &self.examples_dir)
    }

    pub fn generator_path(&self) -> PathBuf {
        resolve(&self.root, &self.generator)
    }
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
