use std::path::{Path, PathBuf};

use crate::git::command::{CommandRunner, CommandSpec};

/// A cloned wiki on disk, queried through the `git` binary.
pub struct WikiRepository<'r, R: CommandRunner + ?Sized> {
    runner: &'r R,
    pub path: PathBuf,
}

impl<'r, R: CommandRunner + ?Sized> WikiRepository<'r, R> {
    pub fn open<P: AsRef<Path>>(runner: &'r R, path: P) -> Self {
        Self {
            runner,
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn runner(&self) -> &'r R {
        self.runner
    }

    /// `git` invocation rooted at the clone.
    pub fn git(&self) -> CommandSpec {
        CommandSpec::git().current_dir(&self.path)
    }
}
