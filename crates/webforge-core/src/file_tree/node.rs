//! Nodes of the virtual file tree.

use serde::{Deserialize, Serialize};

use crate::language::Language;

/// Kind of entry to create in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

/// A single entry of the virtual file system.
///
/// Names are unique among siblings by convention only; nothing validates it.
/// A folder's `children` order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FileNode {
    File {
        name: String,
        content: String,
        language: Language,
    },
    Folder {
        name: String,
        children: Vec<FileNode>,
    },
}

impl FileNode {
    pub fn file(name: impl Into<String>, content: impl Into<String>, language: Language) -> Self {
        Self::File {
            name: name.into(),
            content: content.into(),
            language,
        }
    }

    /// An empty file whose language is inferred from the name's extension.
    pub fn empty_file(name: impl Into<String>) -> Self {
        let name = name.into();
        let language = Language::for_file_name(&name);
        Self::File {
            name,
            content: String::new(),
            language,
        }
    }

    pub fn folder(name: impl Into<String>, children: Vec<FileNode>) -> Self {
        Self::Folder {
            name: name.into(),
            children,
        }
    }

    /// An empty node of the requested kind, as created by the "new entry" dialog.
    pub fn new_entry(name: impl Into<String>, kind: NodeKind) -> Self {
        match kind {
            NodeKind::File => Self::empty_file(name),
            NodeKind::Folder => Self::folder(name, Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Folder { name, .. } => name,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::File { .. } => NodeKind::File,
            Self::Folder { .. } => NodeKind::Folder,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder { .. })
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            Self::File { content, .. } => Some(content),
            Self::Folder { .. } => None,
        }
    }

    pub fn language(&self) -> Option<Language> {
        match self {
            Self::File { language, .. } => Some(*language),
            Self::Folder { .. } => None,
        }
    }

    pub fn children(&self) -> Option<&[FileNode]> {
        match self {
            Self::Folder { children, .. } => Some(children),
            Self::File { .. } => None,
        }
    }

    /// Single-line listing entry, e.g. `📁 src/` or `📄 package.json`.
    pub fn listing_label(&self) -> String {
        match self {
            Self::Folder { name, .. } => format!("📁 {name}/"),
            Self::File { name, .. } => format!("📄 {name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_infers_language() {
        let node = FileNode::empty_file("styles.scss");
        assert_eq!(node.language(), Some(Language::Scss));
        assert_eq!(node.content(), Some(""));
    }

    #[test]
    fn test_new_entry_folder_has_no_children() {
        let node = FileNode::new_entry("components", NodeKind::Folder);
        assert!(node.is_folder());
        assert_eq!(node.children().map(<[FileNode]>::len), Some(0));
        assert_eq!(node.content(), None);
    }

    #[test]
    fn test_serde_shape_is_tagged() {
        let node = FileNode::file("a.json", "{}", Language::Json);
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["type"], "file");
        assert_eq!(value["language"], "json");
    }

    #[test]
    fn test_listing_label() {
        assert_eq!(FileNode::folder("src", vec![]).listing_label(), "📁 src/");
        assert_eq!(FileNode::empty_file("a.js").listing_label(), "📄 a.js");
    }
}
