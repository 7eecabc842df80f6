use std::path::PathBuf;

pub const APP_NAME: &str = "wiki-diff";

pub const DEFAULT_BASE_URL: &str = "http://git.example.com";

/// Non-interactive settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base address for bare project names
    pub base_url: String,
    pub history_limit: usize,
    /// Holds the project list and the report
    pub config_dir: PathBuf,
    /// Parent of the temporary clone
    pub work_dir: PathBuf,
    pub open_report: bool,
}

impl Settings {
    /// `<platform config dir>/wiki-diff`, e.g. `~/.config/wiki-diff` on Linux.
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME))
    }
}
