//! CLI configuration.
//!
//! # Responsibility
//! - Load `~/.tallybook.json` with serde defaults; a missing or malformed
//!   file falls back to the defaults without failing the invocation.

use serde::Deserialize;
use std::path::PathBuf;

const CONFIG_FILE: &str = ".tallybook.json";
const DATA_DIR: &str = ".tallybook";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Base directory for the data dir; defaults to the home directory.
    pub tallybook_directory: Option<String>,
    pub display_complete_tasks: bool,
    pub display_progress_overview: bool,
    pub starred_symbol: String,
    pub medium_priority_color: String,
    pub high_priority_color: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tallybook_directory: None,
            display_complete_tasks: true,
            display_progress_overview: true,
            starred_symbol: "★".to_string(),
            medium_priority_color: "yellow".to_string(),
            high_priority_color: "red".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let Some(home) = dirs::home_dir() else {
            return Self::default();
        };
        let path = home.join(CONFIG_FILE);
        let Ok(text) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        match serde_json::from_str(&text) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("warning: ignoring malformed config `{}`: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Data directory holding storage, archive and logs.
    pub fn data_dir(&self) -> PathBuf {
        let base = self
            .tallybook_directory
            .as_ref()
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        base.join(DATA_DIR)
    }
}
