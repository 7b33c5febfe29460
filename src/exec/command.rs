// src/exec/command.rs

//! Shell-command task action.

use std::process::Stdio;

use anyhow::{bail, Context, Result};
use tokio::process::Command;
use tracing::info;

use crate::project::{ActionFuture, TaskAction, TaskContext};

/// Runs a command line through the platform shell in the owning project's
/// directory. Output goes straight to the build's stdout/stderr.
#[derive(Debug, Clone)]
pub struct ShellCommandAction {
    cmd: String,
}

impl ShellCommandAction {
    pub fn new(cmd: impl Into<String>) -> Self {
        Self { cmd: cmd.into() }
    }

    pub fn command(&self) -> &str {
        &self.cmd
    }
}

impl TaskAction for ShellCommandAction {
    fn run(&self, ctx: TaskContext) -> ActionFuture {
        Box::pin(run_command(self.cmd.clone(), ctx))
    }
}

async fn run_command(cmd_line: String, ctx: TaskContext) -> Result<()> {
    info!(
        task = %ctx.task_path,
        cmd = %cmd_line,
        dir = %ctx.project_dir.display(),
        "starting task command"
    );

    // Build a shell command appropriate for the platform.
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(&cmd_line);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(&cmd_line);
        c
    };

    cmd.current_dir(&ctx.project_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);

    let status = cmd
        .status()
        .await
        .with_context(|| format!("spawning process for task '{}'", ctx.task_path))?;

    let code = status.code().unwrap_or(-1);
    info!(
        task = %ctx.task_path,
        exit_code = code,
        success = status.success(),
        "task command exited"
    );

    if !status.success() {
        bail!("command `{cmd_line}` exited with code {code}");
    }
    Ok(())
}
