//! Configuration structures and loading logic.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::media::FilterSet;

/// Main configuration structure.
///
/// ```toml
/// subreddits = ["pics", "aww"]
/// downloadPath = "/tmp/out"
///
/// [fileExt]
/// ".jpg" = true
/// ".png" = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Subreddits to pull listings from.
    #[serde(default)]
    pub subreddits: Vec<String>,

    /// Root directory; each subreddit gets its own folder below it.
    #[serde(default)]
    pub download_path: PathBuf,

    /// Extensions (with leading dot) mapped to whether they are downloaded.
    #[serde(default)]
    pub file_ext: HashMap<String, bool>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Build the extension filter used for the run.
    pub fn filter_set(&self) -> FilterSet {
        FilterSet::from_map(&self.file_ext)
    }
}
