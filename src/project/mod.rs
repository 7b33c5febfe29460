// src/project/mod.rs

//! The project/task model the graph engine works on.
//!
//! - [`path`] parses and renders task paths.
//! - [`tree`] owns projects and tasks and navigates project paths.
//! - [`task`] holds tasks, dependency descriptors and actions.
//! - [`selector`] turns command-line task selectors into tasks.

pub mod path;
pub mod selector;
pub mod task;
pub mod tree;

pub use path::{TaskPath, PATH_SEPARATOR, ROOT_PATH};
pub use selector::select_tasks;
pub use task::{
    ActionFuture, ProjectId, Task, TaskAction, TaskContext, TaskDependency, TaskId, TaskSpec,
};
pub use tree::{Project, ProjectTree};
