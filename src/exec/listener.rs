// src/exec/listener.rs

//! Execution telemetry.
//!
//! The build executor reports progress through an [`ExecutionListener`]
//! handed to it by its owner instead of a process-wide logger. The default
//! [`TracingListener`] forwards everything to `tracing`.

use std::time::Duration;

use tracing::{debug, info, warn};

/// How a single task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The task's action ran and succeeded.
    Executed,
    /// The task has no action; it only orders other tasks.
    NoAction,
    /// The task's action returned an error.
    Failed,
}

/// Observer for one build round. Every hook defaults to doing nothing.
pub trait ExecutionListener: Send + Sync {
    fn graph_populated(&self, _task_count: usize, _elapsed: Duration) {}

    fn before_task(&self, _task: &str) {}

    fn after_task(&self, _task: &str, _outcome: TaskOutcome, _elapsed: Duration) {}

    fn graph_executed(&self, _elapsed: Duration) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingListener;

impl ExecutionListener for TracingListener {
    fn graph_populated(&self, task_count: usize, elapsed: Duration) {
        info!(
            tasks = task_count,
            elapsed_ms = elapsed.as_millis() as u64,
            "creating the task graph took {:?}",
            elapsed
        );
    }

    fn before_task(&self, task: &str) {
        info!(task = %task, "executing task");
    }

    fn after_task(&self, task: &str, outcome: TaskOutcome, elapsed: Duration) {
        let elapsed_ms = elapsed.as_millis() as u64;
        match outcome {
            TaskOutcome::Executed => debug!(task = %task, elapsed_ms, "task finished"),
            TaskOutcome::NoAction => debug!(task = %task, "task has nothing to do"),
            TaskOutcome::Failed => warn!(task = %task, elapsed_ms, "task failed"),
        }
    }

    fn graph_executed(&self, elapsed: Duration) {
        info!(
            elapsed_ms = elapsed.as_millis() as u64,
            "executing the task graph took {:?}",
            elapsed
        );
    }
}
