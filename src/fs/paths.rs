//! Path and directory management.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Destination of a downloaded file: `<root>/<folder>/<filename>`.
pub fn destination_path(root: &Path, folder: &str, filename: &str) -> PathBuf {
    root.join(folder).join(filename)
}

/// Make sure the download root is usable, creating it if necessary.
pub fn prepare_download_dir(path: &Path) -> Result<()> {
    if path.exists() && !path.is_dir() {
        return Err(Error::ConfigValidation {
            field: "downloadPath".to_string(),
            message: format!("{} exists but is not a directory", path.display()),
        });
    }

    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Ensure a directory exists, creating it if necessary.
///
/// Concurrent creation of the same directory by several workers is fine;
/// only errors other than "already exists" are reported.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    match tokio::fs::create_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(e) => Err(Error::Io(e)),
    }
}
