//! External command execution.
//!
//! Every interaction with the installed `git` binary (and the platform opener)
//! goes through the `CommandRunner` trait, so history, diff and clone logic can
//! be driven by a scripted fake in tests.
//!
//! Calls are synchronous, spawn exactly one process each and are never retried.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, debug_span};

use crate::error::{AppError, Result};

/// A single external command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn git() -> Self {
        Self::new("git")
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy().into_owned())
    }

    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    /// First positional argument, e.g. the git subcommand.
    pub fn subcommand(&self) -> Option<&str> {
        self.args.first().map(|s| s.as_str())
    }
}

impl From<&Command> for CommandSpec {
    fn from(cmd: &Command) -> Self {
        Self {
            program: cmd.get_program().to_string_lossy().into_owned(),
            args: cmd
                .get_args()
                .map(|a| a.to_string_lossy().into_owned())
                .collect(),
            cwd: cmd.get_current_dir().map(Path::to_path_buf),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(dir) = &self.cwd {
            write!(f, "cd \"{}\" && ", dir.display())?;
        }
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when the process was terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

impl fmt::Display for CommandOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = self
            .code
            .map(|c| c.to_string())
            .unwrap_or_else(|| "signal".to_string());
        write!(
            f,
            "code={}\nstdout=```\n{}```\nstderr=```\n{}```",
            code, self.stdout, self.stderr
        )
    }
}

pub trait CommandRunner {
    /// Run the command to completion and capture its output, whatever the exit status.
    fn execute(&self, spec: &CommandSpec) -> Result<CommandOutput>;

    /// Locate `tool` on the execution path.
    fn assert_available(&self, tool: &str) -> Result<()>;

    /// Run the command; a non-zero exit becomes `AppError::ExternalCommand`.
    fn run(&self, spec: &CommandSpec, on_failure: &str) -> Result<CommandOutput> {
        let output = self.execute(spec)?;
        if !output.is_success() {
            return Err(AppError::ExternalCommand {
                message: on_failure.to_string(),
                command: spec.to_string(),
                output,
            });
        }
        Ok(output)
    }
}

/// Runs commands as real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn execute(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        let _span = debug_span!("command", subcommand = ?spec.subcommand()).entered();

        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args).stdin(Stdio::null());
        if let Some(dir) = &spec.cwd {
            cmd.current_dir(dir);
        }

        debug!("{}", spec);
        let output = cmd.output().map_err(|source| AppError::Spawn {
            command: spec.to_string(),
            source,
        })?;

        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(code = ?result.code, "command finished");
        Ok(result)
    }

    fn assert_available(&self, tool: &str) -> Result<()> {
        which::which(tool)
            .map(|path| debug!("found {} at {}", tool, path.display()))
            .map_err(|_| AppError::ToolNotFound(tool.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedRunner;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_quotes_arguments_with_spaces() {
        let spec = CommandSpec::git()
            .arg("log")
            .arg("-10")
            .arg("My Page.md")
            .current_dir(Path::new("/tmp/clone"));

        assert_eq!(
            spec.to_string(),
            "cd \"/tmp/clone\" && git log -10 \"My Page.md\""
        );
    }

    #[test]
    fn run_turns_non_zero_exit_into_error_with_output() {
        let runner = ScriptedRunner::new(|_| CommandOutput::failure(128, "fatal: bad revision"));

        let err = runner
            .run(&CommandSpec::git().arg("diff"), "diff commit fail")
            .unwrap_err();

        match err {
            AppError::ExternalCommand {
                message,
                command,
                output,
            } => {
                assert_eq!(message, "diff commit fail");
                assert_eq!(command, "git diff");
                assert_eq!(output.code, Some(128));
                assert_eq!(output.stderr, "fatal: bad revision");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn run_passes_successful_output_through() {
        let runner = ScriptedRunner::new(|_| CommandOutput::success("ok\n"));

        let output = runner.run(&CommandSpec::git().arg("status"), "FAIL").unwrap();

        assert_eq!(output.stdout, "ok\n");
    }

    #[test]
    fn process_runner_reports_missing_tool() {
        let err = ProcessRunner
            .assert_available("definitely-not-a-real-tool-4f1c")
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::ToolNotFound(ref t) if t == "definitely-not-a-real-tool-4f1c"
        ));
    }

    #[test]
    fn process_runner_reports_spawn_failure() {
        let err = ProcessRunner
            .execute(&CommandSpec::new("definitely-not-a-real-tool-4f1c"))
            .unwrap_err();

        assert!(matches!(err, AppError::Spawn { .. }));
    }
}
