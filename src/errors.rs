// src/errors.rs

//! Crate-wide error type and result alias.
//!
//! Every variant is fatal to the current build round. The graph engine never
//! catches or retries any of them; they surface unchanged to the caller of
//! [`crate::exec::BuildExecuter::execute`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    /// Malformed task path (no separator, or nothing after the last one).
    #[error("Invalid task path: '{0}'")]
    InvalidPath(String),

    /// A project path segment did not resolve.
    #[error("Project '{segment}' could not be found while resolving '{path}'")]
    UnknownProject { path: String, segment: String },

    /// The resolved project has no task of that name. Carries the descriptor
    /// exactly as the user wrote it.
    #[error("Task with path '{0}' could not be found")]
    UnknownTask(String),

    /// Task paths forming the cycle, in dependency order.
    #[error("Cycle detected in task graph: {}", render_cycle(.0))]
    DependencyCycle(Vec<String>),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Task '{task}' failed: {source}")]
    TaskActionFailure {
        task: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn render_cycle(members: &[String]) -> String {
    match members.first() {
        Some(first) => format!("{} -> {}", members.join(" -> "), first),
        None => String::new(),
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, BuildError>;
