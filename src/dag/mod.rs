// src/dag/mod.rs

//! Task graph construction and execution.
//!
//! - [`resolve`] turns dependency descriptors into concrete tasks.
//! - [`builder`] walks from the requested tasks and fills the graph.
//! - [`graph`] holds the graph itself, cycle detection and the plan.
//! - [`execute`] runs the graph in dependency order.

pub mod builder;
pub mod execute;
pub mod graph;
pub mod resolve;

pub use builder::fill_dag;
pub use execute::ExecutionOptions;
pub use graph::Dag;
pub use resolve::{resolve_dependencies, resolve_task_path};
