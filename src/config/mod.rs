// src/config/mod.rs

//! Build file loading and validation.
//!
//! - [`model`] is the TOML-backed data model.
//! - [`loader`] reads a build file from disk.
//! - [`validate`] checks names and global settings.
//! - [`assemble`] turns a validated build file into a project tree.

pub mod assemble;
pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, DEFAULT_BUILD_FILE};
pub use model::{BuildFile, BuildSection, DependsOn, ProjectConfig, RawBuildFile, TaskConfig};
