//! Temporary clone lifecycle.
//!
//! `CloneLifecycle::run` clones the wiki into a fresh temporary directory, hands
//! it to the pipeline and removes it afterwards, whatever the outcome:
//!
//! ```text
//! Idle ──clone──▶ Cloned ──pipeline ok──▶ Completed
//!   │               │
//!   └──clone err──▶ Failed ◀──pipeline err
//! ```
//!
//! Removal happens exactly once per run. The structured path removes the
//! directory explicitly; a drop guard covers unwinding; the panic hook and the
//! termination-signal handler installed by `RunContext::install_fault_handler`
//! cover faults and interrupts outside the call chain. All of them go through the
//! same `RunContext`, which hands the path out only once.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, error, info, warn};

use crate::error::{AppError, Result};
use crate::git::command::{CommandRunner, CommandSpec};

const TEMP_PREFIX: &str = "wiki-diff-";
const CLONE_DIR_NAME: &str = "wiki";
/// 128 + SIGINT
const INTERRUPTED_EXIT_CODE: i32 = 130;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloneState {
    Idle,
    Cloned,
    Completed,
    Failed,
}

/// Per-run record of the temporary directory awaiting removal.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    workspace: Arc<Mutex<Option<PathBuf>>>,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn track(&self, path: &Path) {
        let mut slot = self.workspace.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(path.to_path_buf());
    }

    /// Directory that would be removed by the next cleanup, if any.
    pub fn tracked(&self) -> Option<PathBuf> {
        self.workspace
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove the tracked directory. Later calls are no-ops.
    pub fn cleanup(&self) -> Result<()> {
        let path = self
            .workspace
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match path {
            Some(path) => {
                info!("removing temporary clone {}", path.display());
                remove_dir(&path)
            }
            None => Ok(()),
        }
    }

    /// Install every last-resort cleanup route: a panic hook and a
    /// SIGINT/SIGTERM/SIGHUP handler.
    pub fn install_fault_handler(&self) -> Result<()> {
        self.install_panic_hook();
        self.install_signal_handler()
    }

    /// Chain a panic hook that removes the tracked directory.
    ///
    /// Panics can happen after the pipeline's own error handling has been
    /// bypassed, or with `panic = "abort"` where no destructor runs.
    pub fn install_panic_hook(&self) {
        let context = self.clone();
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            previous(panic_info);
            if let Err(e) = context.cleanup() {
                eprintln!("{}", e);
            }
        }));
    }

    /// Remove the tracked directory and exit when the process is interrupted,
    /// e.g. Ctrl-C while waiting at a prompt. Only one handler may be
    /// registered per process.
    pub fn install_signal_handler(&self) -> Result<()> {
        let context = self.clone();
        ctrlc::set_handler(move || std::process::exit(context.on_termination()))?;
        Ok(())
    }

    /// Cleanup on a termination signal; returns the exit status to use.
    pub fn on_termination(&self) -> i32 {
        warn!("interrupted, removing temporary clone");
        if let Err(e) = self.cleanup() {
            eprintln!("{}", e);
        }
        INTERRUPTED_EXIT_CODE
    }
}

/// Remove `path` recursively; a missing directory is not an error.
pub fn remove_dir(path: &Path) -> Result<()> {
    match std::fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(AppError::Cleanup {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Runs cleanup when dropped during unwinding.
struct CleanupGuard(RunContext);

impl CleanupGuard {
    fn finish(self) {
        // Drop performs the cleanup
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        if let Err(e) = self.0.cleanup() {
            error!("{}", e);
        }
    }
}

pub struct CloneLifecycle<'r, R: CommandRunner + ?Sized> {
    runner: &'r R,
    context: RunContext,
    parent_dir: PathBuf,
    state: CloneState,
}

impl<'r, R: CommandRunner + ?Sized> CloneLifecycle<'r, R> {
    pub fn new(runner: &'r R, context: RunContext, parent_dir: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            context,
            parent_dir: parent_dir.into(),
            state: CloneState::Idle,
        }
    }

    pub fn state(&self) -> CloneState {
        self.state
    }

    /// Clone `address`, run `pipeline` on the clone, then remove it.
    ///
    /// Cleanup failures are logged and never replace the pipeline's own result.
    pub fn run<T, F>(&mut self, address: &str, pipeline: F) -> Result<T>
    where
        F: FnOnce(&Path) -> Result<T>,
    {
        let guard = CleanupGuard(self.context.clone());

        let result = self.clone_into_temp(address).and_then(|clone_dir| {
            self.state = CloneState::Cloned;
            pipeline(&clone_dir)
        });

        self.state = match result {
            Ok(_) => CloneState::Completed,
            Err(ref e) => {
                debug!("run failed: {}", e);
                CloneState::Failed
            }
        };
        guard.finish();

        result
    }

    fn clone_into_temp(&self, address: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.parent_dir)?;
        let workspace = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .tempdir_in(&self.parent_dir)?
            .keep();
        self.context.track(&workspace);

        let clone_dir = workspace.join(CLONE_DIR_NAME);
        info!("cloning {} into {}", address, clone_dir.display());
        let spec = CommandSpec::git()
            .arg("clone")
            .arg(address)
            .path_arg(&clone_dir);
        self.runner.run(&spec, "Project clone failed")?;

        Ok(clone_dir)
    }
}
