// src/dag/builder.rs

//! Populating a [`Dag`] from a requested task set.

use std::collections::HashSet;

use tracing::debug;

use crate::dag::graph::Dag;
use crate::dag::resolve::resolve_dependencies;
use crate::errors::{BuildError, Result};
use crate::project::{ProjectTree, TaskId};

enum Visit {
    Enter(TaskId),
    Leave(TaskId),
}

/// Register every task transitively reachable from `requested` with `dag`,
/// each exactly once.
///
/// Dependencies are resolved relative to the project owning each task. The
/// walk is an explicit depth-first traversal: discovery order matches a
/// recursive pre-order walk, and a task met again while it is still on the
/// current path is reported as [`BuildError::DependencyCycle`] before any
/// further resolution happens.
pub fn fill_dag(dag: &mut Dag, tree: &ProjectTree, requested: &[TaskId]) -> Result<()> {
    let mut stack: Vec<Visit> = requested.iter().rev().map(|t| Visit::Enter(*t)).collect();
    let mut path: Vec<TaskId> = Vec::new();
    let mut on_path: HashSet<TaskId> = HashSet::new();

    while let Some(visit) = stack.pop() {
        match visit {
            Visit::Enter(task) => {
                if on_path.contains(&task) {
                    let start = path.iter().position(|t| *t == task).unwrap_or(0);
                    let members = path[start..]
                        .iter()
                        .map(|t| tree.task_path(*t))
                        .collect::<Vec<_>>();
                    return Err(BuildError::DependencyCycle(members));
                }

                if dag.contains(task) {
                    continue;
                }

                let depends_on = resolve_dependencies(tree, task)?;
                dag.add_task(task, depends_on.clone())?;

                if depends_on.is_empty() {
                    debug!(task = %tree.task_path(task), "found no dependsOn tasks");
                    continue;
                }

                debug!(
                    task = %tree.task_path(task),
                    depends_on = ?depends_on.iter().map(|t| tree.task_path(*t)).collect::<Vec<_>>(),
                    "found dependsOn tasks"
                );

                path.push(task);
                on_path.insert(task);
                stack.push(Visit::Leave(task));
                stack.extend(depends_on.iter().rev().map(|t| Visit::Enter(*t)));
            }
            Visit::Leave(task) => {
                path.pop();
                on_path.remove(&task);
            }
        }
    }

    Ok(())
}
