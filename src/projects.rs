//! Recently used projects.
//!
//! Stored as a pretty-printed JSON array of `{ "name", "value" }` entries in
//! `projectlist.json` under the configuration directory, so the next run can
//! offer them as choices.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;

pub const PROJECT_LIST_FILE: &str = "projectlist.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    pub value: String,
}

pub struct ProjectStore {
    path: PathBuf,
    entries: Vec<ProjectEntry>,
}

impl ProjectStore {
    /// Load the list from `config_dir`, creating an empty one if missing.
    pub fn open(config_dir: &Path) -> Result<Self> {
        fs::create_dir_all(config_dir)?;
        let path = config_dir.join(PROJECT_LIST_FILE);

        let store = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let entries = serde_json::from_str(&contents)?;
            Self { path, entries }
        } else {
            let store = Self {
                path,
                entries: Vec::new(),
            };
            store.save()?;
            store
        };

        debug!(
            "loaded {} projects from {}",
            store.entries.len(),
            store.path.display()
        );
        Ok(store)
    }

    pub fn entries(&self) -> &[ProjectEntry] {
        &self.entries
    }

    /// Append `identifier` unless an entry with that name exists. Returns whether it was added.
    pub fn remember(&mut self, identifier: &str) -> Result<bool> {
        if self.entries.iter().any(|e| e.name == identifier) {
            return Ok(false);
        }

        self.entries.push(ProjectEntry {
            name: identifier.to_string(),
            value: identifier.to_string(),
        });
        self.save()?;
        info!("remembered project {}", identifier);
        Ok(true)
    }

    fn save(&self) -> Result<()> {
        fs::write(&self.path, serde_json::to_string_pretty(&self.entries)?)?;
        Ok(())
    }
}
