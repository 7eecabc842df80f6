//! Commit history of a single wiki page.
//!
//! Runs `git log` scoped to one file and parses each line of
//! `<date> -- <author> -- <hash>` into a `CommitRecord`, newest first.
//! Any malformed line fails the whole query; a partial history would
//! silently shift the diff pairing downstream.

use chrono::{DateTime, Local, NaiveDateTime};
use tracing::{debug, info};

use crate::error::{AppError, Result};
use crate::git::command::CommandRunner;
use crate::git::repository::WikiRepository;
use crate::models::CommitRecord;

pub const DEFAULT_HISTORY_LIMIT: usize = 10;

const FIELD_DELIMITER: &str = "--";

impl<R: CommandRunner + ?Sized> WikiRepository<'_, R> {
    /// Last `limit` commits that touched `file_path`, in git's order (newest first).
    pub fn history(&self, file_path: &str, limit: usize) -> Result<Vec<CommitRecord>> {
        let spec = self
            .git()
            .arg("log")
            .arg(format!("-{}", limit))
            .arg("--date=iso")
            .arg(format!(
                "--pretty=format:%cd {d} %an {d} %H",
                d = FIELD_DELIMITER
            ))
            .arg("--")
            .arg(file_path);

        let output = self
            .runner()
            .run(&spec, "fetch file commit history failed")?;
        let commits = parse_history(&output.stdout)?;

        info!("found {} commits for {}", commits.len(), file_path);
        Ok(commits)
    }
}

pub fn parse_history(raw: &str) -> Result<Vec<CommitRecord>> {
    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse_history_line(line).map_err(|reason| {
            AppError::HistoryFetch(format!("line {}: {} ({:?})", idx + 1, reason, line))
        }))
        .collect()
}

fn parse_history_line(line: &str) -> std::result::Result<CommitRecord, &'static str> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).map(str::trim).collect();
    let [date, user, commit_id] = fields.as_slice() else {
        return Err("expected exactly three fields");
    };

    if commit_id.is_empty() {
        return Err("missing commit id");
    }
    let updated_at = parse_commit_time(date).ok_or("unrecognized commit date")?;

    debug!(%commit_id, %user, "parsed history line");
    Ok(CommitRecord {
        updated_at,
        user: user.to_string(),
        commit_id: commit_id.to_string(),
    })
}

/// Parse a git commit date into local wall-clock time.
fn parse_commit_time(raw: &str) -> Option<NaiveDateTime> {
    const ZONED_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S %z", "%a %b %e %H:%M:%S %Y %z"];

    let to_local = |dt: DateTime<chrono::FixedOffset>| dt.with_timezone(&Local).naive_local();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(to_local(dt));
    }
    for format in ZONED_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(to_local(dt));
        }
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").ok()
}
