// src/exec/mod.rs

//! Build execution layer.
//!
//! - [`executer`] is the façade: reset, populate and run the task graph, and
//!   report whether the model needs to be re-planned.
//! - [`listener`] defines the telemetry hooks the executor reports through.
//! - [`command`] provides the shell-command task action used by build files.

pub mod command;
pub mod executer;
pub mod listener;

pub use command::ShellCommandAction;
pub use executer::BuildExecuter;
pub use listener::{ExecutionListener, TaskOutcome, TracingListener};
