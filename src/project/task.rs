// src/project/task.rs

//! Tasks, their dependency descriptors and their runnable actions.

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

/// Stable identity of a task inside a [`super::ProjectTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub(crate) usize);

/// Stable identity of a project inside a [`super::ProjectTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectId(pub(crate) usize);

impl TaskId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl ProjectId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A raw dependency declaration attached to a task.
///
/// Resolved lazily on every graph build; never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskDependency {
    /// A direct reference to another task.
    Task(TaskId),
    /// A task path, absolute (`":lib:jar"`) or relative to the owning project
    /// (`"compile"`, `"sub:test"`).
    Path(String),
    /// Nested declarations, flattened at resolution time.
    Group(Vec<TaskDependency>),
}

impl From<TaskId> for TaskDependency {
    fn from(id: TaskId) -> Self {
        TaskDependency::Task(id)
    }
}

impl From<&str> for TaskDependency {
    fn from(path: &str) -> Self {
        TaskDependency::Path(path.to_string())
    }
}

impl From<String> for TaskDependency {
    fn from(path: String) -> Self {
        TaskDependency::Path(path)
    }
}

impl<T: Into<TaskDependency>> From<Vec<T>> for TaskDependency {
    fn from(items: Vec<T>) -> Self {
        TaskDependency::Group(items.into_iter().map(Into::into).collect())
    }
}

/// What an action gets to know about the task it runs for.
#[derive(Debug, Clone)]
pub struct TaskContext {
    /// Canonical absolute task path, e.g. `":lib:jar"`.
    pub task_path: String,
    /// Absolute path of the owning project.
    pub project_path: String,
    /// Working directory of the owning project.
    pub project_dir: PathBuf,
}

/// Future returned by [`TaskAction::run`].
///
/// It is `'static` so the executor can move it onto its own tokio task.
pub type ActionFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'static>>;

/// The work a task performs when the graph executes it.
pub trait TaskAction: Send + Sync {
    fn run(&self, ctx: TaskContext) -> ActionFuture;
}

impl<F> TaskAction for F
where
    F: Fn(TaskContext) -> ActionFuture + Send + Sync,
{
    fn run(&self, ctx: TaskContext) -> ActionFuture {
        self(ctx)
    }
}

/// A named unit of work owned by exactly one project.
pub struct Task {
    pub(crate) name: String,
    pub(crate) project: ProjectId,
    pub(crate) depends_on: Vec<TaskDependency>,
    pub(crate) dag_neutral: bool,
    pub(crate) description: Option<String>,
    pub(crate) action: Option<Arc<dyn TaskAction>>,
}

impl Task {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owning project (a lookup key, not an ownership edge).
    pub fn project(&self) -> ProjectId {
        self.project
    }

    pub fn depends_on(&self) -> &[TaskDependency] {
        &self.depends_on
    }

    /// `true` if running this task cannot change the shape of the project
    /// or task model.
    pub fn is_dag_neutral(&self) -> bool {
        self.dag_neutral
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn action(&self) -> Option<&Arc<dyn TaskAction>> {
        self.action.as_ref()
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("project", &self.project)
            .field("depends_on", &self.depends_on)
            .field("dag_neutral", &self.dag_neutral)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

/// Declarative description of a task, registered with
/// [`super::ProjectTree::add_task`].
#[derive(Clone)]
pub struct TaskSpec {
    name: String,
    depends_on: Vec<TaskDependency>,
    dag_neutral: bool,
    description: Option<String>,
    action: Option<Arc<dyn TaskAction>>,
}

impl TaskSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            depends_on: Vec::new(),
            dag_neutral: false,
            description: None,
            action: None,
        }
    }

    pub fn depends_on(mut self, dep: impl Into<TaskDependency>) -> Self {
        self.depends_on.push(dep.into());
        self
    }

    pub fn dag_neutral(mut self, neutral: bool) -> Self {
        self.dag_neutral = neutral;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn action(mut self, action: Arc<dyn TaskAction>) -> Self {
        self.action = Some(action);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn into_task(self, project: ProjectId) -> Task {
        Task {
            name: self.name,
            project,
            depends_on: self.depends_on,
            dag_neutral: self.dag_neutral,
            description: self.description,
            action: self.action,
        }
    }
}
