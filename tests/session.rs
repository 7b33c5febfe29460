// tests/session.rs
#![cfg(unix)]

use std::fs;
use std::path::Path;

use buildgraph::cli::CliArgs;
use buildgraph::run;
use buildgraph_test_utils::{init_tracing, with_timeout};

fn args(build_file: &Path, tasks: &[&str]) -> CliArgs {
    CliArgs {
        tasks: tasks.iter().map(|t| t.to_string()).collect(),
        build_file: build_file.display().to_string(),
        max_parallel: None,
        log_level: None,
        dry_run: false,
    }
}

#[tokio::test]
async fn default_tasks_run_when_none_are_given() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let build_file = dir.path().join("Buildgraph.toml");
    fs::write(
        &build_file,
        r#"
[build]
default_tasks = ["hello"]

[tasks.hello]
cmd = "echo hello > hello.txt"
"#,
    )
    .unwrap();

    with_timeout(run(args(&build_file, &[]))).await.unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("hello.txt")).unwrap(),
        "hello\n"
    );
}

#[tokio::test]
async fn no_tasks_and_no_defaults_is_an_error() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let build_file = dir.path().join("Buildgraph.toml");
    fs::write(&build_file, "[tasks.hello]\n").unwrap();

    let err = with_timeout(run(args(&build_file, &[]))).await.unwrap_err();
    assert!(err.to_string().contains("default_tasks"));
}

#[tokio::test]
async fn model_is_reloaded_after_a_non_neutral_round() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let build_file = dir.path().join("Buildgraph.toml");

    // `generate` appends a new task to the build file. The second selector
    // names that task, so it only resolves if the model is reloaded.
    fs::write(
        &build_file,
        r#"
[tasks.generate]
cmd = "printf '\n[tasks.generated]\ncmd = \"echo generated > generated.txt\"\n' >> Buildgraph.toml"
"#,
    )
    .unwrap();

    with_timeout(run(args(&build_file, &["generate", "generated"])))
        .await
        .unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("generated.txt")).unwrap(),
        "generated\n"
    );
}

#[tokio::test]
async fn dag_neutral_round_keeps_the_loaded_model() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let build_file = dir.path().join("Buildgraph.toml");

    fs::write(
        &build_file,
        r#"
[tasks.generate]
dag_neutral = true
cmd = "printf '\n[tasks.generated]\ncmd = \"true\"\n' >> Buildgraph.toml"
"#,
    )
    .unwrap();

    let err = with_timeout(run(args(&build_file, &["generate", "generated"])))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("generated"));
}

#[tokio::test]
async fn dry_run_does_not_execute_anything() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let build_file = dir.path().join("Buildgraph.toml");
    fs::write(
        &build_file,
        r#"
[tasks.build]
cmd = "touch built.txt"
depends_on = ["compile"]

[tasks.compile]
cmd = "touch compiled.txt"
"#,
    )
    .unwrap();

    let mut dry = args(&build_file, &["build"]);
    dry.dry_run = true;
    with_timeout(run(dry)).await.unwrap();

    assert!(!dir.path().join("built.txt").exists());
    assert!(!dir.path().join("compiled.txt").exists());
}

#[tokio::test]
async fn dry_run_still_reports_cycles() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let build_file = dir.path().join("Buildgraph.toml");
    fs::write(
        &build_file,
        r#"
[tasks.a]
depends_on = ["b"]

[tasks.b]
depends_on = ["a"]
"#,
    )
    .unwrap();

    let mut dry = args(&build_file, &["a"]);
    dry.dry_run = true;
    let err = with_timeout(run(dry)).await.unwrap_err();
    assert!(err.to_string().contains("Cycle"));
}
