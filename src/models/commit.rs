use chrono::NaiveDateTime;

/// Display format used in report headers.
pub const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One line of `git log` output for the selected page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// Commit date in local time
    pub updated_at: NaiveDateTime,
    pub user: String,
    pub commit_id: String,
}

impl CommitRecord {
    pub fn display_time(&self) -> String {
        self.updated_at.format(DISPLAY_TIME_FORMAT).to_string()
    }
}
