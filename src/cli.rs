// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::config::DEFAULT_BUILD_FILE;

/// Command-line arguments for `buildgraph`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "buildgraph",
    version,
    about = "Resolve named build tasks across nested projects and run them in dependency order.",
    long_about = None
)]
pub struct CliArgs {
    /// Tasks to run, e.g. `build` or `:lib:jar`.
    ///
    /// Each selector is run as its own round, in order. A bare name selects
    /// that task in every project that has it. Defaults to
    /// `[build].default_tasks`.
    #[arg(value_name = "TASK")]
    pub tasks: Vec<String>,

    /// Path to the build file (TOML).
    #[arg(long, short = 'b', value_name = "PATH", default_value = DEFAULT_BUILD_FILE)]
    pub build_file: String,

    /// Maximum number of tasks to run at once (overrides `[build].max_parallel`).
    #[arg(long, value_name = "N")]
    pub max_parallel: Option<usize>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `BUILDGRAPH_LOG` or `info` is used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve the task graph and print the execution plan without running anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

pub fn parse() -> CliArgs {
    CliArgs::parse()
}
