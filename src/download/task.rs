//! Download task definition.

use std::path::{Path, PathBuf};

use crate::fs::destination_path;
use crate::media::extension;

/// One file to retrieve, produced by a listing worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    /// Last path segment of the URL.
    pub filename: String,
    /// Subreddit the file was listed in.
    pub folder: String,
    /// Entity-decoded URL.
    pub url: String,
}

impl DownloadTask {
    pub fn new(
        filename: impl Into<String>,
        folder: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            folder: folder.into(),
            url: url.into(),
        }
    }

    /// Where the file is written below `root`.
    pub fn destination(&self, root: &Path) -> PathBuf {
        destination_path(root, &self.folder, &self.filename)
    }

    pub fn extension(&self) -> &str {
        extension(&self.filename)
    }
}

/// Successful terminal states of a download task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// File fetched; carries the number of bytes written.
    Downloaded(u64),
    /// Destination already existed, nothing was fetched.
    Skipped,
}
