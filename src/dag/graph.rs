// src/dag/graph.rs

use std::collections::{BTreeSet, HashMap, VecDeque};

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::errors::{BuildError, Result};
use crate::project::{ProjectTree, TaskId};

/// Mutable execution graph keyed by task identity.
///
/// Each registered task maps to the ordered set of its direct predecessors
/// (the tasks it depends on). Registration order is remembered and used to
/// break ties between tasks that have no ordering relative to each other.
#[derive(Debug, Default)]
pub struct Dag {
    /// Tasks in discovery order.
    order: Vec<TaskId>,
    predecessors: HashMap<TaskId, Vec<TaskId>>,
}

impl Dag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every registered task.
    pub fn reset(&mut self) {
        self.order.clear();
        self.predecessors.clear();
    }

    /// Register `task` with exactly `predecessors`.
    ///
    /// Registering a task again with the same predecessors is a no-op;
    /// registering it with a different set is rejected.
    pub fn add_task(&mut self, task: TaskId, predecessors: Vec<TaskId>) -> Result<()> {
        if let Some(existing) = self.predecessors.get(&task) {
            if *existing == predecessors {
                return Ok(());
            }
            return Err(BuildError::InvalidArguments(format!(
                "task #{} registered twice with different dependencies",
                task.index()
            )));
        }

        self.order.push(task);
        self.predecessors.insert(task, predecessors);
        Ok(())
    }

    pub fn contains(&self, task: TaskId) -> bool {
        self.predecessors.contains_key(&task)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Registered tasks in discovery order.
    pub fn tasks(&self) -> &[TaskId] {
        &self.order
    }

    pub fn predecessors_of(&self, task: TaskId) -> &[TaskId] {
        self.predecessors
            .get(&task)
            .map(|p| p.as_slice())
            .unwrap_or(&[])
    }

    /// Verify the graph is complete and acyclic.
    ///
    /// Every predecessor must itself be registered, and no task may depend on
    /// itself directly or transitively. A cycle is reported with its members
    /// in dependency order.
    pub fn check_acyclic(&self, tree: &ProjectTree) -> Result<()> {
        // Edge direction: task -> predecessor ("depends on").
        let mut graph: DiGraphMap<TaskId, ()> = DiGraphMap::new();

        for task in &self.order {
            graph.add_node(*task);
        }

        for task in &self.order {
            for pred in self.predecessors_of(*task) {
                if !self.contains(*pred) {
                    return Err(BuildError::InvalidArguments(format!(
                        "task '{}' depends on '{}' which is not part of the graph",
                        tree.task_path(*task),
                        tree.task_path(*pred)
                    )));
                }
                graph.add_edge(*task, *pred, ());
            }
        }

        match toposort(&graph, None) {
            Ok(_) => Ok(()),
            Err(cycle) => {
                let members = cycle_through(&graph, cycle.node_id())
                    .into_iter()
                    .map(|task| tree.task_path(task))
                    .collect::<Vec<_>>();
                debug!(?members, "cycle detected in task graph");
                Err(BuildError::DependencyCycle(members))
            }
        }
    }

    /// The order a sequential [`Dag::execute`] runs tasks in.
    pub fn execution_plan(&self, tree: &ProjectTree) -> Result<Vec<TaskId>> {
        self.check_acyclic(tree)?;

        let mut ready = ReadyQueue::new(self);
        let mut plan = Vec::with_capacity(self.len());
        while let Some(task) = ready.pop() {
            ready.complete(task);
            plan.push(task);
        }
        Ok(plan)
    }
}

/// Shortest path from `start` back to itself along dependency edges.
fn cycle_through(graph: &DiGraphMap<TaskId, ()>, start: TaskId) -> Vec<TaskId> {
    let mut came_from: HashMap<TaskId, TaskId> = HashMap::new();
    let mut queue = VecDeque::from([start]);

    while let Some(node) = queue.pop_front() {
        for next in graph.neighbors(node) {
            if next == start {
                let mut members = vec![node];
                let mut cursor = node;
                while let Some(prev) = came_from.get(&cursor) {
                    members.push(*prev);
                    cursor = *prev;
                }
                members.reverse();
                return members;
            }
            if !came_from.contains_key(&next) {
                came_from.insert(next, node);
                queue.push_back(next);
            }
        }
    }

    vec![start]
}

/// Tracks which registered tasks may run next.
///
/// A task becomes ready once all of its predecessors have completed. Ready
/// tasks come out earliest-discovered first.
#[derive(Debug)]
pub(crate) struct ReadyQueue {
    position: HashMap<TaskId, usize>,
    waiting_on: HashMap<TaskId, usize>,
    dependents: HashMap<TaskId, Vec<TaskId>>,
    ready: BTreeSet<(usize, TaskId)>,
}

impl ReadyQueue {
    pub(crate) fn new(dag: &Dag) -> Self {
        let mut position = HashMap::with_capacity(dag.len());
        let mut waiting_on = HashMap::with_capacity(dag.len());
        let mut dependents: HashMap<TaskId, Vec<TaskId>> = HashMap::new();
        let mut ready = BTreeSet::new();

        for (index, task) in dag.order.iter().enumerate() {
            position.insert(*task, index);
            let preds = dag.predecessors_of(*task);
            waiting_on.insert(*task, preds.len());
            for pred in preds {
                dependents.entry(*pred).or_default().push(*task);
            }
            if preds.is_empty() {
                ready.insert((index, *task));
            }
        }

        Self {
            position,
            waiting_on,
            dependents,
            ready,
        }
    }

    pub(crate) fn pop(&mut self) -> Option<TaskId> {
        self.ready.pop_first().map(|(_, task)| task)
    }

    /// Mark `task` finished and release dependents whose predecessors are
    /// now all complete.
    pub(crate) fn complete(&mut self, task: TaskId) {
        let Some(dependents) = self.dependents.remove(&task) else {
            return;
        };

        for dependent in dependents {
            if let Some(count) = self.waiting_on.get_mut(&dependent) {
                *count = count.saturating_sub(1);
                if *count == 0 {
                    if let Some(index) = self.position.get(&dependent) {
                        self.ready.insert((*index, dependent));
                    }
                }
            }
        }
    }
}
