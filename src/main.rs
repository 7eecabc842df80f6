//! Wiki Diff - change report for a single page of a Git-hosted wiki
//!
//! # Usage
//! ```bash
//! wiki-diff                                   # Prompt for project and page
//! wiki-diff --base-url https://gitlab.corp    # Resolve bare names against another host
//! wiki-diff --limit 20 --no-open              # Longer history, don't open the report
//! ```
//!
//! The wiki is cloned into a temporary directory that is removed on every exit
//! path. The report is written to `diff.md` in the configuration directory.

mod app;
mod config;
mod error;
mod git;
mod models;
mod projects;
mod prompt;
mod report;
#[cfg(test)]
mod testing;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::WikiDiff;
use config::{DEFAULT_BASE_URL, Settings};
use git::history::DEFAULT_HISTORY_LIMIT;
use git::{ProcessRunner, RunContext};
use prompt::Prompter;

/// Wiki Diff - Build a markdown change report for one wiki page
#[derive(Parser)]
#[command(name = "wiki-diff")]
#[command(about = "Diff the recent history of a Git-hosted wiki page", long_about = None)]
struct Cli {
    /// Base address used for bare project names
    #[arg(long, env = "WIKI_DIFF_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Number of most recent commits to compare
    #[arg(short, long, default_value_t = DEFAULT_HISTORY_LIMIT)]
    limit: usize,

    /// Directory holding the project list and the report
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Parent directory for the temporary clone
    #[arg(long, value_name = "DIR")]
    work_dir: Option<PathBuf>,

    /// Write the report without opening it
    #[arg(long)]
    no_open: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_log_level(cli.verbose).into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli) {
        Ok(report_path) => {
            println!("✓ Report written to {}", report_path.display());
        }
        Err(e) => {
            tracing::debug!("{:?}", e);
            eprintln!("✗ {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Errors reach the user once, through the `✗` line; their chain is only
/// logged at debug level.
fn default_log_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

fn run(cli: Cli) -> anyhow::Result<PathBuf> {
    let config_dir = match cli.config_dir {
        Some(dir) => dir,
        None => Settings::default_config_dir()
            .context("Could not determine the user configuration directory")?,
    };

    let settings = Settings {
        base_url: cli.base_url,
        history_limit: cli.limit,
        config_dir,
        work_dir: cli.work_dir.unwrap_or_else(std::env::temp_dir),
        open_report: !cli.no_open,
    };

    let context = RunContext::new();
    context
        .install_fault_handler()
        .context("Failed to install cleanup handlers")?;

    let runner = ProcessRunner;
    let mut wiki_diff = WikiDiff::new(&runner, &settings, Prompter::stdio(), context);
    let report_path = wiki_diff
        .run()
        .context("Failed to build the wiki diff report")?;
    Ok(report_path)
}
