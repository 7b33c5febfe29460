// src/dag/resolve.rs

//! Dependency descriptor resolution.
//!
//! Turns the raw [`TaskDependency`] declarations of a task into concrete
//! task ids. Pure lookup; nothing is cached between graph builds.

use tracing::trace;

use crate::errors::{BuildError, Result};
use crate::project::path::{TaskPath, PATH_SEPARATOR};
use crate::project::task::{ProjectId, TaskDependency, TaskId};
use crate::project::tree::ProjectTree;

/// Resolve every dependency declared on `task`, relative to the task's own
/// project.
///
/// Groups are flattened in declaration order and duplicates are dropped, so
/// the result is an ordered set.
pub fn resolve_dependencies(tree: &ProjectTree, task: TaskId) -> Result<Vec<TaskId>> {
    let owner = tree.task(task).project();
    let mut resolved = Vec::new();

    // Walk the (possibly nested) declarations in order without recursion.
    let mut pending: Vec<&TaskDependency> = tree.task(task).depends_on().iter().rev().collect();

    while let Some(dep) = pending.pop() {
        let found = match dep {
            TaskDependency::Task(id) => {
                if tree.get_task(*id).is_none() {
                    return Err(BuildError::UnknownTask(format!("#{}", id.index())));
                }
                *id
            }
            TaskDependency::Path(descriptor) => resolve_task_path(tree, owner, descriptor)?,
            TaskDependency::Group(items) => {
                pending.extend(items.iter().rev());
                continue;
            }
        };

        trace!(
            task = %tree.task_path(task),
            dependency = %tree.task_path(found),
            "resolved dependency"
        );

        if !resolved.contains(&found) {
            resolved.push(found);
        }
    }

    Ok(resolved)
}

/// Resolve a single task path string relative to `base`.
///
/// A bare name (no separator) names a task of `base` itself. Errors echo
/// `descriptor` exactly as supplied.
pub fn resolve_task_path(tree: &ProjectTree, base: ProjectId, descriptor: &str) -> Result<TaskId> {
    let (project, task_name) = if descriptor.contains(PATH_SEPARATOR) {
        let path = TaskPath::parse(descriptor)?;
        let project = tree.resolve_project(base, path.project_path())?;
        (project, path.task_name().to_string())
    } else {
        if descriptor.is_empty() {
            return Err(BuildError::InvalidPath(descriptor.to_string()));
        }
        (base, descriptor.to_string())
    };

    tree.project(project)
        .task_by_name(&task_name)
        .ok_or_else(|| BuildError::UnknownTask(descriptor.to_string()))
}
