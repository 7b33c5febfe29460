// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::model::{BuildFile, RawBuildFile};
use crate::errors::Result;

/// Read and deserialize a build file without semantic validation.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawBuildFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let raw: RawBuildFile = toml::from_str(&contents)?;

    Ok(raw)
}

/// Read, deserialize and validate a build file.
///
/// Validation covers names and global settings only. Task dependencies are
/// left unresolved here; they are resolved on every graph build.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<BuildFile> {
    let raw = load_from_path(&path)?;
    let build_file = BuildFile::try_from(raw)?;
    debug!(path = %path.as_ref().display(), "loaded build file");
    Ok(build_file)
}

/// Build file looked up when `--build-file` is not given.
pub const DEFAULT_BUILD_FILE: &str = "Buildgraph.toml";
