#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use buildgraph::project::{ProjectId, ProjectTree, TaskAction, TaskDependency, TaskId, TaskSpec};

use crate::actions::{ExecutionLog, FailingAction, RecordingAction};

/// Fluent helper for building project trees in tests.
///
/// Projects are addressed by absolute path (`":"`, `":a:b"`) and created on
/// demand. Unless stated otherwise, tasks get a [`RecordingAction`] writing
/// into the builder's shared [`ExecutionLog`].
pub struct TreeBuilder {
    tree: ProjectTree,
    log: ExecutionLog,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            tree: ProjectTree::new("."),
            log: ExecutionLog::new(),
        }
    }

    pub fn log(&self) -> ExecutionLog {
        self.log.clone()
    }

    /// Ensure every project along `path` exists and return the last one.
    pub fn project(&mut self, path: &str) -> ProjectId {
        let mut current = self.tree.root();
        for segment in path.split(':').filter(|s| !s.is_empty()) {
            current = match self.tree.project(current).child_by_name(segment) {
                Some(child) => child,
                None => self
                    .tree
                    .add_project(current, segment)
                    .expect("adding project"),
            };
        }
        current
    }

    /// A recording task, not dag-neutral.
    pub fn task(&mut self, project: &str, name: &str, deps: &[&str]) -> TaskId {
        let action = Arc::new(RecordingAction::new(self.log.clone()));
        self.task_with_action(project, name, deps, action, false)
    }

    /// A recording, dag-neutral task.
    pub fn neutral_task(&mut self, project: &str, name: &str, deps: &[&str]) -> TaskId {
        let action = Arc::new(RecordingAction::new(self.log.clone()));
        self.task_with_action(project, name, deps, action, true)
    }

    /// A recording task that sleeps for `delay` first.
    pub fn slow_task(&mut self, project: &str, name: &str, deps: &[&str], delay: Duration) -> TaskId {
        let action = Arc::new(RecordingAction::with_delay(self.log.clone(), delay));
        self.task_with_action(project, name, deps, action, true)
    }

    /// A task whose action records itself and then fails.
    pub fn failing_task(&mut self, project: &str, name: &str, deps: &[&str]) -> TaskId {
        let action = Arc::new(FailingAction::new(self.log.clone(), format!("{name} broke")));
        self.task_with_action(project, name, deps, action, true)
    }

    /// A task without an action.
    pub fn lifecycle_task(&mut self, project: &str, name: &str, deps: &[&str]) -> TaskId {
        let project = self.project(project);
        let spec = deps
            .iter()
            .fold(TaskSpec::new(name).dag_neutral(true), |spec, dep| spec.depends_on(*dep));
        self.tree.add_task(project, spec).expect("adding task")
    }

    pub fn task_with_action(
        &mut self,
        project: &str,
        name: &str,
        deps: &[&str],
        action: Arc<dyn TaskAction>,
        dag_neutral: bool,
    ) -> TaskId {
        let project = self.project(project);
        let spec = deps
            .iter()
            .fold(TaskSpec::new(name), |spec, dep| spec.depends_on(*dep))
            .dag_neutral(dag_neutral)
            .action(action);
        self.tree.add_task(project, spec).expect("adding task")
    }

    /// Append any dependency declaration to an existing task.
    pub fn depend(&mut self, task: TaskId, dep: impl Into<TaskDependency>) -> &mut Self {
        self.tree.add_dependency(task, dep).expect("adding dependency");
        self
    }

    pub fn tree(&self) -> &ProjectTree {
        &self.tree
    }

    pub fn build(self) -> (ProjectTree, ExecutionLog) {
        (self.tree, self.log)
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
