//! Conformance checks for generated Rego policies and the generator that emits them.
//!
//! A run locates the policy documents, checks each canonical document for the
//! tokens its feature requires, then checks the generator source against the
//! feature matrix. See [`runner::ConformanceRun`].

pub mod artifacts;
pub mod config;
pub mod error;
pub mod features;
pub mod locator;
pub mod logging;
pub mod predicate;
pub mod report;
pub mod runner;

pub use config::{CheckerConfig, MissingArtifactPolicy};
pub use error::ConformanceError;
pub use report::{RecordingReporter, Reporter};
pub use runner::{ConformanceRun, RunFailure, RunResult, run};
