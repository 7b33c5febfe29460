// src/project/selector.rs

//! Command-line task selection.

use tracing::debug;

use crate::dag::resolve::resolve_task_path;
use crate::errors::{BuildError, Result};
use crate::project::path::PATH_SEPARATOR;
use crate::project::task::TaskId;
use crate::project::tree::ProjectTree;

/// Turn one selector into the tasks it names.
///
/// - A selector containing the separator is a task path, resolved against
///   the root project, and names exactly one task.
/// - A bare name selects that task in the root project and in every
///   descendant project that has one, parents first.
pub fn select_tasks(tree: &ProjectTree, selector: &str) -> Result<Vec<TaskId>> {
    if selector.contains(PATH_SEPARATOR) {
        let task = resolve_task_path(tree, tree.root(), selector)?;
        return Ok(vec![task]);
    }

    if selector.is_empty() {
        return Err(BuildError::InvalidPath(selector.to_string()));
    }

    let selected: Vec<TaskId> = tree
        .projects_depth_first()
        .into_iter()
        .filter_map(|project| tree.project(project).task_by_name(selector))
        .collect();

    if selected.is_empty() {
        return Err(BuildError::UnknownTask(selector.to_string()));
    }

    debug!(
        selector,
        tasks = ?selected.iter().map(|t| tree.task_path(*t)).collect::<Vec<_>>(),
        "selected tasks by name"
    );

    Ok(selected)
}
