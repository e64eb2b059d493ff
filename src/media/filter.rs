//! File extension filter.

use std::collections::{HashMap, HashSet};

/// Set of enabled file extensions, each including its leading dot.
///
/// Membership is an exact, case-sensitive match: `.JPG` does not match `.jpg`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    enabled: HashSet<String>,
}

impl FilterSet {
    /// Build a filter from the `fileExt` table, keeping only enabled entries.
    pub fn from_map(map: &HashMap<String, bool>) -> Self {
        let enabled = map
            .iter()
            .filter(|(_, on)| **on)
            .map(|(ext, _)| ext.clone())
            .collect();
        Self { enabled }
    }

    /// Whether `ext` (e.g. `.png`) should be downloaded.
    pub fn contains(&self, ext: &str) -> bool {
        self.enabled.contains(ext)
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }

    pub fn len(&self) -> usize {
        self.enabled.len()
    }

    /// Enabled extensions in sorted order, for display.
    pub fn sorted(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.enabled.iter().map(String::as_str).collect();
        exts.sort_unstable();
        exts
    }
}

impl<S: Into<String>> FromIterator<S> for FilterSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            enabled: iter.into_iter().map(Into::into).collect(),
        }
    }
}
