// src/project/path.rs

//! Task path parsing.
//!
//! A task path is a project path and a task name joined by
//! [`PATH_SEPARATOR`], split at the *last* separator:
//!
//! - `":compile"` is task `compile` in the root project.
//! - `":lib:jar"` is task `jar` in project `:lib`.
//! - `"sub:test"` is task `test` in project `sub`, relative to some base.

use std::fmt;
use std::str::FromStr;

use crate::errors::{BuildError, Result};

/// Separator between project names and between a project path and a task name.
pub const PATH_SEPARATOR: char = ':';

/// Absolute path of the root project.
pub const ROOT_PATH: &str = ":";

/// A parsed task reference: `(project path, task name)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskPath {
    project_path: String,
    task_name: String,
}

impl TaskPath {
    /// Split `path` at its last separator.
    ///
    /// Fails with [`BuildError::InvalidPath`] when there is no separator or
    /// the task name after it is empty.
    pub fn parse(path: &str) -> Result<Self> {
        let index = path
            .rfind(PATH_SEPARATOR)
            .ok_or_else(|| BuildError::InvalidPath(path.to_string()))?;

        let task_name = &path[index + PATH_SEPARATOR.len_utf8()..];
        if task_name.is_empty() {
            return Err(BuildError::InvalidPath(path.to_string()));
        }

        let project_path = if index == 0 { ROOT_PATH } else { &path[..index] };

        Ok(Self {
            project_path: project_path.to_string(),
            task_name: task_name.to_string(),
        })
    }

    pub fn project_path(&self) -> &str {
        &self.project_path
    }

    pub fn task_name(&self) -> &str {
        &self.task_name
    }

    /// Whether the project part is anchored at the root.
    pub fn is_absolute(&self) -> bool {
        self.project_path.starts_with(PATH_SEPARATOR)
    }
}

impl fmt::Display for TaskPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.project_path == ROOT_PATH {
            write!(f, "{}{}", PATH_SEPARATOR, self.task_name)
        } else {
            write!(f, "{}{}{}", self.project_path, PATH_SEPARATOR, self.task_name)
        }
    }
}

impl FromStr for TaskPath {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self> {
        TaskPath::parse(s)
    }
}

/// Join a child name onto an absolute project path.
pub fn child_path(parent: &str, name: &str) -> String {
    if parent == ROOT_PATH {
        format!("{PATH_SEPARATOR}{name}")
    } else {
        format!("{parent}{PATH_SEPARATOR}{name}")
    }
}

/// Whether a path or descriptor string is anchored at the root.
pub fn is_absolute(path: &str) -> bool {
    path.starts_with(PATH_SEPARATOR)
}
