// src/project/tree.rs

//! Arena-backed project hierarchy.
//!
//! The tree owns every [`Project`] and every [`Task`]. Projects refer to their
//! parent, children and tasks by id, and tasks refer back to their owning
//! project by id, so there is exactly one ownership edge per node.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::errors::{BuildError, Result};
use crate::project::path::{child_path, PATH_SEPARATOR, ROOT_PATH};
use crate::project::task::{ProjectId, Task, TaskContext, TaskDependency, TaskId, TaskSpec};

/// A node in the project hierarchy.
#[derive(Debug, Clone)]
pub struct Project {
    name: String,
    path: String,
    dir: PathBuf,
    parent: Option<ProjectId>,
    children: BTreeMap<String, ProjectId>,
    tasks: BTreeMap<String, TaskId>,
}

impl Project {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute path, e.g. `":"` for the root or `":a:b"`.
    pub fn absolute_path(&self) -> &str {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn parent(&self) -> Option<ProjectId> {
        self.parent
    }

    pub fn child_by_name(&self, name: &str) -> Option<ProjectId> {
        self.children.get(name).copied()
    }

    pub fn task_by_name(&self, name: &str) -> Option<TaskId> {
        self.tasks.get(name).copied()
    }

    /// Child projects ordered by name.
    pub fn children(&self) -> impl Iterator<Item = ProjectId> + '_ {
        self.children.values().copied()
    }

    /// Tasks ordered by name.
    pub fn tasks(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.tasks.values().copied()
    }
}

#[derive(Debug)]
pub struct ProjectTree {
    projects: Vec<Project>,
    tasks: Vec<Task>,
}

impl ProjectTree {
    /// Create a tree holding only a root project rooted at `root_dir`.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        let root = Project {
            name: String::new(),
            path: ROOT_PATH.to_string(),
            dir: root_dir.into(),
            parent: None,
            children: BTreeMap::new(),
            tasks: BTreeMap::new(),
        };
        Self {
            projects: vec![root],
            tasks: Vec::new(),
        }
    }

    pub fn root(&self) -> ProjectId {
        ProjectId(0)
    }

    pub fn project(&self, id: ProjectId) -> &Project {
        &self.projects[id.0]
    }

    pub fn get_project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.get(id.0)
    }

    pub fn task(&self, id: TaskId) -> &Task {
        &self.tasks[id.0]
    }

    pub fn get_task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(id.0)
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Add a child project whose directory is `<parent dir>/<name>`.
    pub fn add_project(&mut self, parent: ProjectId, name: &str) -> Result<ProjectId> {
        let dir = self.parent_project(parent)?.dir.join(name);
        self.add_project_with_dir(parent, name, dir)
    }

    pub fn add_project_with_dir(
        &mut self,
        parent: ProjectId,
        name: &str,
        dir: impl Into<PathBuf>,
    ) -> Result<ProjectId> {
        let parent_project = self.parent_project(parent)?;
        if parent_project.children.contains_key(name) {
            return Err(BuildError::ConfigError(format!(
                "project '{}' already exists",
                child_path(&parent_project.path, name)
            )));
        }

        let id = ProjectId(self.projects.len());
        let project = Project {
            name: name.to_string(),
            path: child_path(&parent_project.path, name),
            dir: dir.into(),
            parent: Some(parent),
            children: BTreeMap::new(),
            tasks: BTreeMap::new(),
        };
        self.projects[parent.0].children.insert(name.to_string(), id);
        self.projects.push(project);
        Ok(id)
    }

    /// Register a task in `project`. Task names are unique per project.
    pub fn add_task(&mut self, project: ProjectId, spec: TaskSpec) -> Result<TaskId> {
        let owner = self.parent_project(project)?;
        if owner.tasks.contains_key(spec.name()) {
            return Err(BuildError::ConfigError(format!(
                "task '{}' already exists",
                child_path(&owner.path, spec.name())
            )));
        }

        let id = TaskId(self.tasks.len());
        self.projects[project.0]
            .tasks
            .insert(spec.name().to_string(), id);
        self.tasks.push(spec.into_task(project));
        Ok(id)
    }

    /// Append a dependency declaration to an existing task.
    pub fn add_dependency(&mut self, task: TaskId, dep: impl Into<TaskDependency>) -> Result<()> {
        let task = self.tasks.get_mut(task.0).ok_or_else(|| {
            BuildError::InvalidArguments(format!("unknown task id {}", task.0))
        })?;
        task.depends_on.push(dep.into());
        Ok(())
    }

    /// Canonical absolute path of a task, e.g. `":lib:jar"`.
    pub fn task_path(&self, id: TaskId) -> String {
        let task = self.task(id);
        child_path(&self.project(task.project).path, &task.name)
    }

    pub(crate) fn task_context(&self, id: TaskId) -> TaskContext {
        let project = self.project(self.task(id).project);
        TaskContext {
            task_path: self.task_path(id),
            project_path: project.path.clone(),
            project_dir: project.dir.clone(),
        }
    }

    /// Resolve a project path specifier.
    ///
    /// Absolute specifiers (leading separator) are walked from the root,
    /// relative ones from `base`. An empty relative specifier names `base`
    /// itself.
    pub fn resolve_project(&self, base: ProjectId, specifier: &str) -> Result<ProjectId> {
        let (mut current, rest) = match specifier.strip_prefix(PATH_SEPARATOR) {
            Some(rest) => (self.root(), rest),
            None => (base, specifier),
        };

        if rest.is_empty() {
            return Ok(current);
        }

        for segment in rest.split(PATH_SEPARATOR) {
            current = self
                .project(current)
                .child_by_name(segment)
                .ok_or_else(|| BuildError::UnknownProject {
                    path: specifier.to_string(),
                    segment: segment.to_string(),
                })?;
        }

        Ok(current)
    }

    /// Every project, parents before children and siblings by name.
    pub fn projects_depth_first(&self) -> Vec<ProjectId> {
        let mut ordered = Vec::with_capacity(self.projects.len());
        let mut stack = vec![self.root()];

        while let Some(id) = stack.pop() {
            ordered.push(id);
            let children: Vec<ProjectId> = self.project(id).children().collect();
            stack.extend(children.into_iter().rev());
        }

        ordered
    }

    fn parent_project(&self, id: ProjectId) -> Result<&Project> {
        self.get_project(id)
            .ok_or_else(|| BuildError::InvalidArguments(format!("unknown project id {}", id.0)))
    }
}
