// src/artifacts.rs

//! Publishing build outputs into `build/Artifacts`.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::errors::{EbError, Result};
use crate::fs::FileSystem;
use crate::layout::BuildLayout;

/// Copy `artifact` (relative to the build root, or absolute) into
/// `build/Artifacts/<file name>`.
///
/// Returns the destination, or `None` when the source is missing and
/// `allow_not_exists` is set.
pub fn save_artifact(
    fs: &dyn FileSystem,
    layout: &BuildLayout,
    artifact: &Path,
    allow_not_exists: bool,
) -> Result<Option<PathBuf>> {
    let source = layout.root().join(artifact);
    if !fs.is_file(&source) {
        if allow_not_exists {
            warn!(artifact = ?source, "artifact does not exist; skipping");
            return Ok(None);
        }
        return Err(EbError::ArtifactNotFound(source));
    }

    let Some(file_name) = source.file_name() else {
        return Err(EbError::ArtifactNotFound(source));
    };
    let dest = layout.artifacts_dir().join(file_name);

    info!(from = ?source, to = ?dest, "copying artifact");
    let contents = fs.read(&source)?;
    fs.write(&dest, &contents)?;
    Ok(Some(dest))
}
