// tests/dag_graph.rs

use buildgraph::dag::{fill_dag, Dag, ExecutionOptions};
use buildgraph::errors::BuildError;
use buildgraph::exec::TracingListener;
use buildgraph::project::ProjectTree;
use buildgraph_test_utils::builders::TreeBuilder;
use buildgraph_test_utils::init_tracing;

fn paths(tree: &ProjectTree, tasks: &[buildgraph::project::TaskId]) -> Vec<String> {
    tasks.iter().map(|t| tree.task_path(*t)).collect()
}

#[test]
fn add_task_is_idempotent_for_identical_predecessors() {
    let mut b = TreeBuilder::new();
    let a = b.task(":", "a", &[]);
    let c = b.task(":", "c", &[]);

    let mut dag = Dag::new();
    dag.add_task(a, vec![c]).unwrap();
    dag.add_task(a, vec![c]).unwrap();
    dag.add_task(c, vec![]).unwrap();

    assert_eq!(dag.len(), 2);
    assert_eq!(dag.tasks(), &[a, c]);
    assert_eq!(dag.predecessors_of(a), &[c]);
}

#[test]
fn add_task_rejects_conflicting_predecessors() {
    let mut b = TreeBuilder::new();
    let a = b.task(":", "a", &[]);
    let c = b.task(":", "c", &[]);

    let mut dag = Dag::new();
    dag.add_task(a, vec![c]).unwrap();
    assert!(matches!(
        dag.add_task(a, vec![]),
        Err(BuildError::InvalidArguments(_))
    ));
}

#[test]
fn reset_clears_everything_and_is_idempotent() {
    let mut b = TreeBuilder::new();
    let a = b.task(":", "a", &[]);

    let mut dag = Dag::new();
    dag.add_task(a, vec![]).unwrap();
    dag.reset();
    dag.reset();

    assert!(dag.is_empty());
    assert!(!dag.contains(a));
    assert!(dag.predecessors_of(a).is_empty());
}

#[test]
fn plan_follows_discovery_order_between_independent_tasks() {
    let mut b = TreeBuilder::new();
    let a = b.task(":", "a", &["c"]);
    let bb = b.task(":", "b", &[]);
    b.task(":", "c", &[]);
    let d = b.task(":", "d", &["b"]);
    let (tree, _) = b.build();

    let mut dag = Dag::new();
    fill_dag(&mut dag, &tree, &[a, d, bb]).unwrap();

    assert_eq!(paths(&tree, dag.tasks()), vec![":a", ":c", ":d", ":b"]);
    let plan = dag.execution_plan(&tree).unwrap();
    assert_eq!(paths(&tree, &plan), vec![":c", ":a", ":b", ":d"]);
}

#[test]
fn cycle_is_reported_with_members_in_dependency_order() {
    let mut b = TreeBuilder::new();
    let a = b.task(":", "a", &[]);
    let bb = b.task(":", "b", &[]);
    let c = b.task(":", "c", &[]);
    let (tree, log) = b.build();

    // Registered by hand so the graph-level check sees the cycle.
    let mut dag = Dag::new();
    dag.add_task(a, vec![bb]).unwrap();
    dag.add_task(bb, vec![c]).unwrap();
    dag.add_task(c, vec![a]).unwrap();

    match dag.check_acyclic(&tree) {
        Err(BuildError::DependencyCycle(members)) => {
            assert_eq!(members.len(), 3);
            let start = members.iter().position(|m| m == ":a").unwrap();
            let rotated: Vec<&str> = members[start..]
                .iter()
                .chain(members[..start].iter())
                .map(|s| s.as_str())
                .collect();
            assert_eq!(rotated, vec![":a", ":b", ":c"]);
        }
        other => panic!("expected DependencyCycle, got {other:?}"),
    }
    assert!(log.is_empty());
}

#[test]
fn self_dependency_is_a_cycle() {
    let mut b = TreeBuilder::new();
    let a = b.task(":", "a", &[]);
    let (tree, _) = b.build();

    let mut dag = Dag::new();
    dag.add_task(a, vec![a]).unwrap();

    match dag.execution_plan(&tree) {
        Err(BuildError::DependencyCycle(members)) => assert_eq!(members, vec![":a"]),
        other => panic!("expected DependencyCycle, got {other:?}"),
    }
}

#[test]
fn predecessor_missing_from_graph_is_rejected() {
    let mut b = TreeBuilder::new();
    let a = b.task(":", "a", &[]);
    let c = b.task(":", "c", &[]);
    let (tree, _) = b.build();

    let mut dag = Dag::new();
    dag.add_task(a, vec![c]).unwrap();

    match dag.check_acyclic(&tree) {
        Err(BuildError::InvalidArguments(msg)) => assert!(msg.contains(":c")),
        other => panic!("expected InvalidArguments, got {other:?}"),
    }
}

#[tokio::test]
async fn execute_runs_nothing_when_graph_has_a_cycle() {
    init_tracing();
    let mut b = TreeBuilder::new();
    let a = b.task(":", "a", &[]);
    let c = b.task(":", "c", &[]);
    let free = b.task(":", "free", &[]);
    let (tree, log) = b.build();

    let mut dag = Dag::new();
    dag.add_task(free, vec![]).unwrap();
    dag.add_task(a, vec![c]).unwrap();
    dag.add_task(c, vec![a]).unwrap();

    let result = dag
        .execute(&tree, &ExecutionOptions::default(), &TracingListener)
        .await;

    assert!(matches!(result, Err(BuildError::DependencyCycle(_))));
    assert!(log.is_empty());
}

#[tokio::test]
async fn execute_returns_completion_order() {
    init_tracing();
    let mut b = TreeBuilder::new();
    let top = b.task(":", "top", &["left", "right"]);
    b.task(":", "left", &["base"]);
    b.task(":", "right", &["base"]);
    b.lifecycle_task(":", "base", &[]);
    let (tree, log) = b.build();

    let mut dag = Dag::new();
    fill_dag(&mut dag, &tree, &[top]).unwrap();
    let completed = dag
        .execute(&tree, &ExecutionOptions::default(), &TracingListener)
        .await
        .unwrap();

    assert_eq!(
        paths(&tree, &completed),
        vec![":base", ":left", ":right", ":top"]
    );
    // `base` has no action, so it is not in the action log.
    assert_eq!(log.entries(), vec![":left", ":right", ":top"]);
}
