// src/config/assemble.rs

//! Turning a validated [`BuildFile`] into a [`ProjectTree`].

use std::path::Path;
use std::sync::Arc;

use crate::config::model::{BuildFile, DependsOn, ProjectConfig, TaskConfig};
use crate::errors::Result;
use crate::exec::ShellCommandAction;
use crate::project::{ProjectId, ProjectTree, TaskDependency, TaskSpec};

impl BuildFile {
    /// Build the project tree. `root_dir` is the directory the build file
    /// lives in; project `dir` entries are relative to it.
    pub fn into_project_tree(&self, root_dir: &Path) -> Result<ProjectTree> {
        let mut tree = ProjectTree::new(root_dir);
        let mut pending: Vec<(ProjectId, &ProjectConfig)> = vec![(tree.root(), &self.root)];

        while let Some((project, cfg)) = pending.pop() {
            for (name, task) in cfg.tasks.iter() {
                tree.add_task(project, task_spec(name, task))?;
            }

            for (name, child) in cfg.projects.iter() {
                let child_id = match &child.dir {
                    Some(dir) => tree.add_project_with_dir(project, name, root_dir.join(dir))?,
                    None => tree.add_project(project, name)?,
                };
                pending.push((child_id, child));
            }
        }

        Ok(tree)
    }
}

fn task_spec(name: &str, cfg: &TaskConfig) -> TaskSpec {
    let mut spec = TaskSpec::new(name).dag_neutral(cfg.dag_neutral);

    for dep in cfg.depends_on.iter() {
        spec = spec.depends_on(dependency(dep));
    }
    if let Some(description) = &cfg.description {
        spec = spec.description(description.clone());
    }
    if let Some(cmd) = &cfg.cmd {
        spec = spec.action(Arc::new(ShellCommandAction::new(cmd.clone())));
    }

    spec
}

fn dependency(entry: &DependsOn) -> TaskDependency {
    match entry {
        DependsOn::Path(path) => TaskDependency::Path(path.clone()),
        DependsOn::Group(items) => TaskDependency::Group(items.iter().map(dependency).collect()),
    }
}
