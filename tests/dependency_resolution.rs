// tests/dependency_resolution.rs

use buildgraph::dag::{resolve_dependencies, resolve_task_path};
use buildgraph::errors::BuildError;
use buildgraph::project::TaskDependency;
use buildgraph_test_utils::builders::TreeBuilder;

#[test]
fn bare_name_resolves_in_owning_project_not_root() {
    let mut b = TreeBuilder::new();
    let root_compile = b.task(":", "compile", &[]);
    let nested_compile = b.task(":a:b", "compile", &[]);
    let nested_build = b.task(":a:b", "build", &["compile"]);
    let (tree, _) = b.build();

    let deps = resolve_dependencies(&tree, nested_build).unwrap();
    assert_eq!(deps, vec![nested_compile]);
    assert_ne!(deps, vec![root_compile]);
}

#[test]
fn relative_project_path_resolves_against_owning_project() {
    let mut b = TreeBuilder::new();
    let test = b.task(":a:b:sub", "test", &[]);
    b.task(":sub", "test", &[]);
    let check = b.task(":a:b", "check", &["sub:test"]);
    let (tree, _) = b.build();

    assert_eq!(resolve_dependencies(&tree, check).unwrap(), vec![test]);
}

#[test]
fn absolute_path_resolves_from_root() {
    let mut b = TreeBuilder::new();
    let jar = b.task(":lib", "jar", &[]);
    let assemble = b.task(":app", "assemble", &[":lib:jar"]);
    let root_task = b.task(":", "root", &[]);
    let uses_root = b.task(":app", "uses_root", &[":root"]);
    let (tree, _) = b.build();

    assert_eq!(resolve_dependencies(&tree, assemble).unwrap(), vec![jar]);
    assert_eq!(resolve_dependencies(&tree, uses_root).unwrap(), vec![root_task]);
}

#[test]
fn direct_references_and_nested_groups_flatten_in_order() {
    let mut b = TreeBuilder::new();
    let one = b.task(":", "one", &[]);
    let two = b.task(":", "two", &[]);
    let three = b.task(":lib", "three", &[]);
    let four = b.task(":", "four", &[]);
    let top = b.task(":", "top", &[]);
    b.depend(top, two)
        .depend(top, vec![TaskDependency::from("one"), TaskDependency::Group(vec![":lib:three".into(), four.into()])])
        .depend(top, "two");
    let (tree, _) = b.build();

    let deps = resolve_dependencies(&tree, top).unwrap();
    assert_eq!(deps, vec![two, one, three, four]);
}

#[test]
fn unknown_task_echoes_descriptor_as_written() {
    let mut b = TreeBuilder::new();
    b.project(":lib");
    let broken = b.task(":app", "assemble", &["lib:nope"]);
    b.task(":app:lib", "other", &[]);
    let (tree, _) = b.build();

    match resolve_dependencies(&tree, broken) {
        Err(BuildError::UnknownTask(descriptor)) => assert_eq!(descriptor, "lib:nope"),
        other => panic!("expected UnknownTask, got {other:?}"),
    }
}

#[test]
fn unknown_project_in_descriptor_is_reported() {
    let mut b = TreeBuilder::new();
    let broken = b.task(":", "build", &[":missing:compile"]);
    let (tree, _) = b.build();

    match resolve_dependencies(&tree, broken) {
        Err(BuildError::UnknownProject { segment, .. }) => assert_eq!(segment, "missing"),
        other => panic!("expected UnknownProject, got {other:?}"),
    }
}

#[test]
fn malformed_descriptors_are_invalid_paths() {
    let mut b = TreeBuilder::new();
    let trailing = b.task(":", "a", &[":lib:"]);
    let empty = b.task(":", "b", &[""]);
    let (tree, _) = b.build();

    assert!(matches!(
        resolve_dependencies(&tree, trailing),
        Err(BuildError::InvalidPath(p)) if p == ":lib:"
    ));
    assert!(matches!(
        resolve_dependencies(&tree, empty),
        Err(BuildError::InvalidPath(_))
    ));
}

#[test]
fn single_path_lookup_uses_given_base() {
    let mut b = TreeBuilder::new();
    let lib_jar = b.task(":lib", "jar", &[]);
    let (tree, _) = b.build();
    let lib = tree.resolve_project(tree.root(), ":lib").unwrap();

    assert_eq!(resolve_task_path(&tree, lib, "jar").unwrap(), lib_jar);
    assert_eq!(resolve_task_path(&tree, tree.root(), "lib:jar").unwrap(), lib_jar);
    assert!(matches!(
        resolve_task_path(&tree, tree.root(), "jar"),
        Err(BuildError::UnknownTask(d)) if d == "jar"
    ));
}
