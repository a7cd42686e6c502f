//! Static stylesheet lookup used when inlining styles into previews.

use std::collections::BTreeMap;

use crate::file_tree::starter::{APP_CSS, INDEX_CSS};

/// Maps a stylesheet file name to the style text inlined for it.
///
/// Not a resolver over the file tree: only names present
/// in the table produce styles, anything else yields none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylesheetTable {
    entries: BTreeMap<String, String>,
}

impl Default for StylesheetTable {
    fn default() -> Self {
        Self::empty()
            .with("App.css", APP_CSS)
            .with("index.css", INDEX_CSS)
    }
}

impl StylesheetTable {
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, css: impl Into<String>) -> Self {
        self.entries.insert(name.into(), css.into());
        self
    }

    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
