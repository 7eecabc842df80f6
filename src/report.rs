//! Report artifact: written once as a whole file, then handed to the platform opener.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{AppError, Result};
use crate::git::{CommandRunner, CommandSpec};
use crate::models::Report;

pub const REPORT_FILE_NAME: &str = "diff.md";

pub fn write_report(report: &Report, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(REPORT_FILE_NAME);
    fs::write(&path, report.to_markdown())?;
    info!("wrote report to {}", path.display());
    Ok(path)
}

/// Open `path` with the first platform opener that succeeds.
pub fn open_report<R: CommandRunner + ?Sized>(runner: &R, path: &Path) -> Result<()> {
    let mut last_error = None;
    for cmd in open::commands(path) {
        let spec = CommandSpec::from(&cmd);
        match runner.run(&spec, "Open file failed") {
            Ok(_) => return Ok(()),
            Err(e) => {
                debug!("opener `{}` failed: {}", spec, e);
                last_error = Some(e);
            }
        }
    }
    Err(last_error.unwrap_or_else(|| AppError::ToolNotFound("file opener".to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::CommandOutput;
    use crate::models::DiffSegment;
    use crate::testing::ScriptedRunner;
    use pretty_assertions::assert_eq;

    #[test]
    fn writes_whole_report_to_fixed_name() {
        let dir = tempfile::tempdir().unwrap();
        let report = Report::new(vec![DiffSegment {
            author: "alice".to_string(),
            timestamp: "2023-01-02 10:00:00".to_string(),
            from_commit: "def456".to_string(),
            to_commit: "abc123".to_string(),
            body: "+hello\n".to_string(),
        }]);

        let path = write_report(&report, dir.path()).unwrap();

        assert_eq!(path, dir.path().join("diff.md"));
        assert_eq!(fs::read_to_string(&path).unwrap(), report.to_markdown());
    }

    #[test]
    fn first_successful_opener_wins() {
        let runner = ScriptedRunner::new(|_| CommandOutput::success(""));

        open_report(&runner, Path::new("/tmp/diff.md")).unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].args.iter().any(|a| a.contains("diff.md")));
    }

    #[test]
    fn every_opener_failing_is_an_error() {
        let runner = ScriptedRunner::new(|_| CommandOutput::failure(1, "no display"));

        let err = open_report(&runner, Path::new("/tmp/diff.md")).unwrap_err();

        assert!(matches!(err, AppError::ExternalCommand { .. }));
        assert_eq!(
            runner.calls().len(),
            open::commands(Path::new("/tmp/diff.md")).len()
        );
    }
}
