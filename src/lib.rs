// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod project;

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

use crate::cli::CliArgs;
use crate::config::{load_and_validate, BuildFile};
use crate::dag::ExecutionOptions;
use crate::errors::BuildError;
use crate::exec::BuildExecuter;
use crate::project::{select_tasks, ProjectTree};

/// High-level entry point used by `main.rs`.
///
/// Loads the build file, then runs each task selector as its own round
/// through one [`BuildExecuter`]. After every round except the last, the
/// executer reports whether a requested task may have changed the model;
/// if so, the build file is reloaded before the next selector is resolved.
pub async fn run(args: CliArgs) -> Result<()> {
    let build_file_path = PathBuf::from(&args.build_file);
    let root_dir = build_root_dir(&build_file_path);

    let (build_file, mut tree) = load_model(&build_file_path, &root_dir)?;
    let selectors = requested_selectors(&args, &build_file)?;

    let options = ExecutionOptions {
        max_parallel: args.max_parallel.unwrap_or(build_file.build.max_parallel),
    };
    let mut executer = BuildExecuter::new(options);

    if args.dry_run {
        for selector in &selectors {
            let tasks = select_tasks(&tree, selector)?;
            let plan = executer.plan(&tasks, &tree)?;
            print_plan(selector, &tree, &plan);
        }
        return Ok(());
    }

    for (index, selector) in selectors.iter().enumerate() {
        let is_last = index + 1 == selectors.len();
        let tasks = select_tasks(&tree, selector)?;
        info!(selector = %selector, round = index + 1, "starting build round");

        let replan = executer.execute(&tasks, &tree, !is_last).await?;

        if replan == Some(true) {
            info!(
                path = %build_file_path.display(),
                "requested tasks may have changed the build model; reloading"
            );
            tree = load_model(&build_file_path, &root_dir)?.1;
        }
    }

    info!(rounds = selectors.len(), "build finished");
    Ok(())
}

/// Load and validate the build file and assemble its project tree.
pub fn load_model(path: &Path, root_dir: &Path) -> errors::Result<(BuildFile, ProjectTree)> {
    let build_file = load_and_validate(path)?;
    let tree = build_file.into_project_tree(root_dir)?;
    Ok((build_file, tree))
}

/// The directory a build file lives in, or the current directory for a bare
/// file name.
fn build_root_dir(build_file: &Path) -> PathBuf {
    match build_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Selectors from the command line, falling back to `[build].default_tasks`.
fn requested_selectors(args: &CliArgs, build_file: &BuildFile) -> errors::Result<Vec<String>> {
    let selectors = if args.tasks.is_empty() {
        build_file.build.default_tasks.clone()
    } else {
        args.tasks.clone()
    };

    if selectors.is_empty() {
        return Err(BuildError::InvalidArguments(
            "no tasks given and [build].default_tasks is empty".to_string(),
        ));
    }
    Ok(selectors)
}

fn print_plan(selector: &str, tree: &ProjectTree, plan: &[project::TaskId]) {
    println!("{selector}:");
    for (position, task) in plan.iter().enumerate() {
        let info = tree.task(*task);
        match info.description() {
            Some(description) => {
                println!("  {:>3}. {} - {}", position + 1, tree.task_path(*task), description)
            }
            None => println!("  {:>3}. {}", position + 1, tree.task_path(*task)),
        }
    }
}
