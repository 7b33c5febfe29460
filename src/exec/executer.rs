// src/exec/executer.rs

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::dag::{fill_dag, Dag, ExecutionOptions};
use crate::errors::{BuildError, Result};
use crate::exec::listener::{ExecutionListener, TracingListener};
use crate::project::{ProjectTree, TaskId};

/// Resolves a requested task set into a graph and runs it.
///
/// One executer owns one [`Dag`]; it is reset at the start of every round, so
/// the same executer can be reused across re-plan rounds but must not run two
/// builds at once.
pub struct BuildExecuter {
    dag: Dag,
    options: ExecutionOptions,
    listener: Arc<dyn ExecutionListener>,
}

impl BuildExecuter {
    pub fn new(options: ExecutionOptions) -> Self {
        Self::with_listener(options, Arc::new(TracingListener))
    }

    pub fn with_listener(options: ExecutionOptions, listener: Arc<dyn ExecutionListener>) -> Self {
        Self {
            dag: Dag::new(),
            options,
            listener,
        }
    }

    /// Graph of the most recent round.
    pub fn dag(&self) -> &Dag {
        &self.dag
    }

    pub fn options(&self) -> &ExecutionOptions {
        &self.options
    }

    /// Run one resolve-and-execute round.
    ///
    /// Returns `None` when `check_for_replan` is false. Otherwise returns
    /// `Some(true)` if any of the *requested* tasks (not their dependencies)
    /// is not dag-neutral, meaning the caller should reload the model before
    /// running another round.
    pub async fn execute(
        &mut self,
        tasks: &[TaskId],
        tree: &ProjectTree,
        check_for_replan: bool,
    ) -> Result<Option<bool>> {
        validate_request(tasks, tree)?;

        self.populate(tasks, tree)?;

        let clock = Instant::now();
        self.dag
            .execute(tree, &self.options, self.listener.as_ref())
            .await?;
        self.listener.graph_executed(clock.elapsed());

        if !check_for_replan {
            return Ok(None);
        }

        let replan = tasks.iter().any(|task| !tree.task(*task).is_dag_neutral());
        debug!(replan, "checked requested tasks for model changes");
        Ok(Some(replan))
    }

    /// Build the graph for `tasks` and return the sequential execution
    /// order without running anything.
    pub fn plan(&mut self, tasks: &[TaskId], tree: &ProjectTree) -> Result<Vec<TaskId>> {
        validate_request(tasks, tree)?;
        self.populate(tasks, tree)?;
        self.dag.execution_plan(tree)
    }

    fn populate(&mut self, tasks: &[TaskId], tree: &ProjectTree) -> Result<()> {
        let clock = Instant::now();
        self.dag.reset();
        fill_dag(&mut self.dag, tree, tasks)?;
        self.listener.graph_populated(self.dag.len(), clock.elapsed());
        Ok(())
    }
}

fn validate_request(tasks: &[TaskId], tree: &ProjectTree) -> Result<()> {
    if tasks.is_empty() {
        return Err(BuildError::InvalidArguments(
            "at least one task must be requested".to_string(),
        ));
    }

    if let Some(unknown) = tasks.iter().find(|t| tree.get_task(**t).is_none()) {
        return Err(BuildError::InvalidArguments(format!(
            "requested task #{} does not belong to this project tree",
            unknown.index()
        )));
    }

    Ok(())
}
