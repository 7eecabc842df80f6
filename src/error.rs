//! Application error types.
//!
//! Defines `AppError` for every failure the report pipeline can hit. Each stage
//! fails fast; the top level turns the error into one consolidated message.
//!
//! Error kinds:
//! - `ToolNotFound` → required executable missing from `PATH`
//! - `ExternalCommand`, `Spawn` → an external command failed or could not start
//! - `HistoryFetch` → malformed `git log` output
//! - `InsufficientHistory` → fewer than two commits, nothing to compare
//! - `Cleanup` → temporary clone could not be removed (logged, never masks)

use std::path::PathBuf;

use thiserror::Error;

use crate::git::CommandOutput;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0} is not found")]
    ToolNotFound(String),

    #[error("{message}\ncommand: {command}\n{output}")]
    ExternalCommand {
        message: String,
        command: String,
        output: CommandOutput,
    },

    #[error("Failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Fetch file commit history failed: {0}")]
    HistoryFetch(String),

    #[error("Not enough commits to compare (found {0})")]
    InsufficientHistory(usize),

    #[error("Failed to remove temporary clone {}: {source}", .path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to install termination handler: {0}")]
    SignalHandler(#[from] ctrlc::Error),

    #[error("Invalid project identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Please select or enter a valid project name/address")]
    NoProjectSelected,

    #[error("No wiki pages found in {0}")]
    NoWikiPages(String),

    #[error("Input closed before an answer was given")]
    InputClosed,

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
