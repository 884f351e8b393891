use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::i18n::DEFAULT_LANGUAGE;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// User preferences read at startup. The editor never writes them back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Printed into exported documents
    pub trainer_name: String,
    /// Initial player count for a new plan
    pub default_player_count: u32,
    pub requirements: String,
    pub team: String,
    /// Language code, e.g. "en-us" or "de-de"
    pub language: String,
    /// Document template; the bundled one is used when unset
    pub template_path: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            trainer_name: String::new(),
            default_player_count: 16,
            requirements: String::new(),
            team: String::new(),
            language: DEFAULT_LANGUAGE.to_string(),
            template_path: None,
        }
    }
}

impl AppSettings {
    /// Read settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like [`load`](Self::load) but never fails; problems are logged.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("{}; using default settings", err);
                Self::default()
            }
        }
    }
}
