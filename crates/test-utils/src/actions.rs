use std::sync::{Arc, Mutex};
use std::time::Duration;

use buildgraph::project::{ActionFuture, TaskAction, TaskContext};

/// Shared, ordered record of which task actions ran.
#[derive(Debug, Clone, Default)]
pub struct ExecutionLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl ExecutionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: impl Into<String>) {
        self.entries.lock().unwrap().push(entry.into());
    }

    /// Task paths in the order their actions finished.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }

    /// Position of `task` in the log, if it ran.
    pub fn position(&self, task: &str) -> Option<usize> {
        self.entries.lock().unwrap().iter().position(|e| e == task)
    }

    pub fn count(&self, task: &str) -> usize {
        self.entries.lock().unwrap().iter().filter(|e| *e == task).count()
    }
}

/// Records the task path into an [`ExecutionLog`] and succeeds.
pub struct RecordingAction {
    log: ExecutionLog,
    delay: Option<Duration>,
}

impl RecordingAction {
    pub fn new(log: ExecutionLog) -> Self {
        Self { log, delay: None }
    }

    /// Sleep before recording, to keep the action in flight for a while.
    pub fn with_delay(log: ExecutionLog, delay: Duration) -> Self {
        Self {
            log,
            delay: Some(delay),
        }
    }
}

impl TaskAction for RecordingAction {
    fn run(&self, ctx: TaskContext) -> ActionFuture {
        let log = self.log.clone();
        let delay = self.delay;
        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            log.push(ctx.task_path);
            Ok(())
        })
    }
}

/// Records the task path and then fails with `message`.
pub struct FailingAction {
    log: ExecutionLog,
    message: String,
}

impl FailingAction {
    pub fn new(log: ExecutionLog, message: impl Into<String>) -> Self {
        Self {
            log,
            message: message.into(),
        }
    }
}

impl TaskAction for FailingAction {
    fn run(&self, ctx: TaskContext) -> ActionFuture {
        let log = self.log.clone();
        let message = self.message.clone();
        Box::pin(async move {
            log.push(ctx.task_path);
            Err(anyhow::anyhow!(message))
        })
    }
}
