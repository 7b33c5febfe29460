// src/dag/execute.rs

//! Running a populated [`Dag`].

use std::time::{Duration, Instant};

use anyhow::anyhow;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::dag::graph::{Dag, ReadyQueue};
use crate::errors::{BuildError, Result};
use crate::exec::listener::{ExecutionListener, TaskOutcome};
use crate::project::{ProjectTree, TaskId};

/// How a graph is executed.
#[derive(Debug, Clone)]
pub struct ExecutionOptions {
    /// Upper bound on task actions running at the same time.
    ///
    /// `1` runs the graph strictly sequentially.
    pub max_parallel: usize,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self { max_parallel: 1 }
    }
}

type Finished = (TaskId, Duration, anyhow::Result<()>);

impl Dag {
    /// Run every registered task exactly once, each after all of its
    /// predecessors.
    ///
    /// The graph is checked for cycles first; on a cycle nothing runs. After
    /// the first failing action no further task is started. Actions already
    /// in flight are awaited, and only the first failure is returned.
    ///
    /// Returns the tasks in completion order.
    pub async fn execute(
        &self,
        tree: &ProjectTree,
        options: &ExecutionOptions,
        listener: &dyn ExecutionListener,
    ) -> Result<Vec<TaskId>> {
        if options.max_parallel == 0 {
            return Err(BuildError::InvalidArguments(
                "max_parallel must be >= 1 (got 0)".to_string(),
            ));
        }

        self.check_acyclic(tree)?;

        let mut ready = ReadyQueue::new(self);
        let mut in_flight: JoinSet<Finished> = JoinSet::new();
        let mut completed = Vec::with_capacity(self.len());
        let mut first_failure: Option<BuildError> = None;

        loop {
            while first_failure.is_none() && in_flight.len() < options.max_parallel {
                let Some(task) = ready.pop() else {
                    break;
                };

                let path = tree.task_path(task);
                listener.before_task(&path);

                let Some(action) = tree.task(task).action() else {
                    debug!(task = %path, "task has no action");
                    listener.after_task(&path, TaskOutcome::NoAction, Duration::ZERO);
                    ready.complete(task);
                    completed.push(task);
                    continue;
                };

                let run = action.run(tree.task_context(task));
                in_flight.spawn(async move {
                    let started = Instant::now();
                    // Run on a separate task so a panicking action is
                    // reported against the task that caused it.
                    let result = match tokio::spawn(run).await {
                        Ok(result) => result,
                        Err(join_err) => Err(anyhow!("task action panicked: {join_err}")),
                    };
                    (task, started.elapsed(), result)
                });
            }

            let Some(joined) = in_flight.join_next().await else {
                break;
            };

            let (task, elapsed, result) =
                joined.map_err(|e| anyhow!("task supervisor failed: {e}"))?;
            let path = tree.task_path(task);

            match result {
                Ok(()) => {
                    listener.after_task(&path, TaskOutcome::Executed, elapsed);
                    ready.complete(task);
                    completed.push(task);
                }
                Err(source) => {
                    listener.after_task(&path, TaskOutcome::Failed, elapsed);
                    if first_failure.is_none() {
                        first_failure = Some(BuildError::TaskActionFailure { task: path, source });
                    } else {
                        warn!(task = %path, error = %source, "task failed after an earlier failure");
                    }
                }
            }
        }

        if let Some(err) = first_failure {
            return Err(err);
        }

        Ok(completed)
    }
}
