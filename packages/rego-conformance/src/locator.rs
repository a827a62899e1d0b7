use crate::error::{ConformanceError, Result};
use std::fs;
use std::path::Path;

/// Lists the names of regular files in `dir` whose name ends in `.{extension}`,
/// sorted so repeated runs report in the same order.
///
/// A missing directory is reported as `DirectoryNotFound`; an empty result is
/// returned as-is and left for the caller to judge.
pub fn locate_artifacts(dir: &Path, extension: &str) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Err(ConformanceError::DirectoryNotFound(dir.to_path_buf()));
    }

    let suffix = format!(".{}", extension);
    let mut names = Vec::new();
    let entries = fs::read_dir(dir).map_err(|e| ConformanceError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| ConformanceError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if name.ends_with(&suffix) {
                names.push(name.to_string());
            }
        }
    }

    names.sort();
    tracing::debug!(dir = %dir.display(), count = names.len(), "located artifacts");
    Ok(names)
}
