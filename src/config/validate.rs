// src/config/validate.rs

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::model::{BuildFile, ProjectConfig, RawBuildFile, TaskConfig};
use crate::errors::{BuildError, Result};

/// Project and task names: no separator, no whitespace.
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.\-]+$").unwrap_or_else(|e| panic!("invalid name pattern: {e}"))
});

impl TryFrom<RawBuildFile> for BuildFile {
    type Error = BuildError;

    fn try_from(raw: RawBuildFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_build_file(&raw)?;
        Ok(BuildFile::new_unchecked(raw.build, raw.tasks, raw.projects))
    }
}

fn validate_raw_build_file(raw: &RawBuildFile) -> Result<()> {
    validate_build_section(raw)?;
    validate_names(":", &raw.tasks, &raw.projects)?;
    ensure_has_tasks(raw)?;
    Ok(())
}

fn validate_build_section(raw: &RawBuildFile) -> Result<()> {
    if raw.build.max_parallel == 0 {
        return Err(BuildError::ConfigError(
            "[build].max_parallel must be >= 1 (got 0)".to_string(),
        ));
    }

    if raw.build.default_tasks.iter().any(|t| t.trim().is_empty()) {
        return Err(BuildError::ConfigError(
            "[build].default_tasks must not contain empty entries".to_string(),
        ));
    }

    Ok(())
}

fn validate_names(
    root_path: &str,
    tasks: &BTreeMap<String, TaskConfig>,
    projects: &BTreeMap<String, ProjectConfig>,
) -> Result<()> {
    let mut pending: Vec<(String, &BTreeMap<String, TaskConfig>, &BTreeMap<String, ProjectConfig>)> =
        vec![(root_path.to_string(), tasks, projects)];

    while let Some((path, tasks, projects)) = pending.pop() {
        for name in tasks.keys() {
            if !NAME_PATTERN.is_match(name) {
                return Err(BuildError::ConfigError(format!(
                    "invalid task name '{}' in project '{}'",
                    name, path
                )));
            }
        }

        for (name, project) in projects.iter() {
            if !NAME_PATTERN.is_match(name) {
                return Err(BuildError::ConfigError(format!(
                    "invalid project name '{}' in project '{}'",
                    name, path
                )));
            }
            pending.push((
                crate::project::path::child_path(&path, name),
                &project.tasks,
                &project.projects,
            ));
        }
    }

    Ok(())
}

fn ensure_has_tasks(raw: &RawBuildFile) -> Result<()> {
    let mut pending: Vec<&ProjectConfig> = raw.projects.values().collect();
    let mut found = !raw.tasks.is_empty();

    while let Some(project) = pending.pop() {
        if found {
            break;
        }
        found = !project.tasks.is_empty();
        pending.extend(project.projects.values());
    }

    if !found {
        return Err(BuildError::ConfigError(
            "build file must declare at least one [tasks.<name>] section".to_string(),
        ));
    }
    Ok(())
}
