use tracing::{debug, info};

use crate::error::{AppError, Result};
use crate::git::command::CommandRunner;
use crate::git::repository::WikiRepository;
use crate::models::{CommitRecord, DiffSegment, Report};

impl<R: CommandRunner + ?Sized> WikiRepository<'_, R> {
    /// Raw `git diff <older> <newer> -- <file>` output.
    pub fn diff(&self, older: &str, newer: &str, file_path: &str) -> Result<String> {
        let spec = self
            .git()
            .arg("diff")
            .arg(older)
            .arg(newer)
            .arg("--")
            .arg(file_path);

        let output = self.runner().run(&spec, "diff commit fail")?;
        Ok(output.stdout)
    }

    /// Diff every adjacent pair of a newest-first commit sequence.
    ///
    /// Segment `i` shows what changed from `commits[i + 1]` to `commits[i]` and
    /// is attributed to the newer commit's author and date. The first failing
    /// diff aborts the whole report.
    pub fn aggregate(&self, commits: &[CommitRecord], file_path: &str) -> Result<Report> {
        if commits.len() < 2 {
            return Err(AppError::InsufficientHistory(commits.len()));
        }

        let mut segments = Vec::with_capacity(commits.len() - 1);
        for pair in commits.windows(2) {
            let (newer, older) = (&pair[0], &pair[1]);
            debug!(from = %older.commit_id, to = %newer.commit_id, "diffing");

            let body = self.diff(&older.commit_id, &newer.commit_id, file_path)?;
            segments.push(DiffSegment {
                author: newer.user.clone(),
                timestamp: newer.display_time(),
                from_commit: older.commit_id.clone(),
                to_commit: newer.commit_id.clone(),
                body,
            });
        }

        info!("built {} diff segments for {}", segments.len(), file_path);
        Ok(Report::new(segments))
    }
}
