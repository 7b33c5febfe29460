// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

/// Build file as read from TOML, before validation.
///
/// ```toml
/// [build]
/// max_parallel = 2
/// default_tasks = ["build"]
///
/// [tasks.compile]
/// cmd = "cc -c main.c"
///
/// [tasks.build]
/// depends_on = ["compile", ":lib:jar"]
///
/// [projects.lib.tasks.jar]
/// cmd = "ar rcs libfoo.a *.o"
/// ```
///
/// The top-level `tasks`/`projects` tables describe the root project.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBuildFile {
    #[serde(default)]
    pub build: BuildSection,

    #[serde(default)]
    pub tasks: BTreeMap<String, TaskConfig>,

    #[serde(default)]
    pub projects: BTreeMap<String, ProjectConfig>,
}

/// A validated build file. Only obtainable through `TryFrom<RawBuildFile>`.
#[derive(Debug, Clone)]
pub struct BuildFile {
    pub build: BuildSection,
    pub root: ProjectConfig,
}

impl BuildFile {
    pub(crate) fn new_unchecked(
        build: BuildSection,
        tasks: BTreeMap<String, TaskConfig>,
        projects: BTreeMap<String, ProjectConfig>,
    ) -> Self {
        Self {
            build,
            root: ProjectConfig {
                dir: None,
                tasks,
                projects,
            },
        }
    }
}

/// `[build]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildSection {
    /// Maximum number of task actions running at once. `1` is sequential.
    #[serde(default = "default_max_parallel")]
    pub max_parallel: usize,

    /// Selectors run when none are given on the command line.
    #[serde(default)]
    pub default_tasks: Vec<String>,
}

fn default_max_parallel() -> usize {
    1
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            max_parallel: default_max_parallel(),
            default_tasks: Vec::new(),
        }
    }
}

/// `[projects.<name>]` section, nestable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectConfig {
    /// Working directory, relative to the build file. Defaults to
    /// `<parent dir>/<name>`.
    #[serde(default)]
    pub dir: Option<String>,

    #[serde(default)]
    pub tasks: BTreeMap<String, TaskConfig>,

    #[serde(default)]
    pub projects: BTreeMap<String, ProjectConfig>,
}

/// `[tasks.<name>]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskConfig {
    /// Shell command to run. Tasks without one only order other tasks.
    #[serde(default)]
    pub cmd: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Task paths this task depends on; arrays may nest.
    #[serde(default)]
    pub depends_on: Vec<DependsOn>,

    /// Set when running the task can never add or remove tasks or projects.
    #[serde(default)]
    pub dag_neutral: bool,
}

/// One `depends_on` entry: a task path or a nested list of entries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DependsOn {
    Path(String),
    Group(Vec<DependsOn>),
}
