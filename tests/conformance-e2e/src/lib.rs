//! Fixture trees for end-to-end conformance runs.

use std::path::{Path, PathBuf};

/// Root directory of the named fixture tree under `fixtures/`.
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}
