//! Configuration validation logic.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::fs::prepare_download_dir;

/// Validate the entire configuration.
///
/// Also creates the download directory when it does not exist yet, so a
/// successful return means the pipeline has somewhere to write.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_subreddits(&config.subreddits)?;
    validate_file_ext(config)?;

    if config.download_path.as_os_str().is_empty() {
        return Err(Error::MissingConfig("downloadPath".to_string()));
    }
    prepare_download_dir(&config.download_path)?;

    Ok(())
}

/// Validate the subreddit list.
pub fn validate_subreddits<S: AsRef<str>>(subreddits: &[S]) -> Result<()> {
    if subreddits.is_empty() {
        return Err(Error::MissingConfig(
            "subreddits (at least one subreddit required)".to_string(),
        ));
    }

    if let Some(blank) = subreddits.iter().find(|s| s.as_ref().trim().is_empty()) {
        return Err(Error::ConfigValidation {
            field: "subreddits".to_string(),
            message: format!("Subreddit name '{}' is blank", blank.as_ref()),
        });
    }

    Ok(())
}

fn validate_file_ext(config: &Config) -> Result<()> {
    if config.file_ext.is_empty() {
        return Err(Error::MissingConfig(
            "fileExt (at least one file extension required)".to_string(),
        ));
    }

    if config.filter_set().is_empty() {
        return Err(Error::ConfigValidation {
            field: "fileExt".to_string(),
            message: "every file extension is disabled, nothing would be downloaded".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn make_config(root: PathBuf) -> Config {
        Config {
            subreddits: vec!["pics".to_string()],
            download_path: root,
            file_ext: HashMap::from([(".jpg".to_string(), true)]),
        }
    }

    #[test]
    fn test_valid_config_creates_directory() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("nested").join("out");
        let config = make_config(root.clone());

        validate_config(&config).unwrap();
        assert!(root.is_dir());
    }

    #[test]
    fn test_empty_subreddits() {
        let dir = TempDir::new().unwrap();
        let mut config = make_config(dir.path().to_path_buf());
        config.subreddits.clear();
        assert!(matches!(
            validate_config(&config),
            Err(Error::MissingConfig(_))
        ));
    }

    #[test]
    fn test_blank_subreddit() {
        assert!(validate_subreddits(&["pics", "  "]).is_err());
    }

    #[test]
    fn test_empty_download_path() {
        let config = make_config(PathBuf::new());
        assert!(matches!(
            validate_config(&config),
            Err(Error::MissingConfig(field)) if field == "downloadPath"
        ));
    }

    #[test]
    fn test_empty_filter() {
        let dir = TempDir::new().unwrap();
        let mut config = make_config(dir.path().to_path_buf());
        config.file_ext.clear();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_all_extensions_disabled() {
        let dir = TempDir::new().unwrap();
        let mut config = make_config(dir.path().to_path_buf());
        config.file_ext = HashMap::from([(".jpg".to_string(), false), (".png".to_string(), false)]);
        assert!(matches!(
            validate_config(&config),
            Err(Error::ConfigValidation { field, .. }) if field == "fileExt"
        ));
    }

    #[test]
    fn test_download_path_is_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("not_a_dir");
        std::fs::write(&file, b"x").unwrap();

        let config = make_config(file);
        assert!(matches!(
            validate_config(&config),
            Err(Error::ConfigValidation { .. })
        ));
    }
}
