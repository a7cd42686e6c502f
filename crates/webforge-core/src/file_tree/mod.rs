//! Virtual file tree domain module.
//!
//! The tree is an ordered forest of [`FileNode`]s owned by a session. All
//! name lookups are depth-first and resolve to the **first** node encountered
//! in traversal order. Two files named `index.css` in different folders are
//! therefore indistinguishable to [`FileTree::find_content`] and
//! [`FileTree::update_content`]: the one listed first wins.
//!
//! # Module Structure
//!
//! - `node`: `FileNode` and `NodeKind`
//! - `starter`: the canonical starter project

mod node;
pub mod starter;

pub use node::{FileNode, NodeKind};

use serde::{Deserialize, Serialize};

/// Where an inserted node ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Placed at the requested location (root when no path was given).
    Placed,
    /// The requested path did not resolve to a folder; appended at the root.
    FellBackToRoot,
}

/// In-memory hierarchical file system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileTree {
    roots: Vec<FileNode>,
}

impl Default for FileTree {
    /// The starter project.
    fn default() -> Self {
        Self::starter(None)
    }
}

impl FileTree {
    /// A tree with no entries at all.
    pub fn empty() -> Self {
        Self { roots: Vec::new() }
    }

    /// The canonical starter project, optionally with a custom entry component.
    pub fn starter(entry_source: Option<&str>) -> Self {
        Self {
            roots: starter::starter_nodes(entry_source),
        }
    }

    pub fn from_nodes(roots: Vec<FileNode>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[FileNode] {
        &self.roots
    }

    /// First file named `name` in depth-first order.
    pub fn find_file(&self, name: &str) -> Option<&FileNode> {
        self.walk()
            .map(|(_, node)| node)
            .find(|node| !node.is_folder() && node.name() == name)
    }

    /// Content of the first file named `name`, or empty text if absent.
    pub fn find_content(&self, name: &str) -> String {
        self.find_file(name)
            .and_then(FileNode::content)
            .map(str::to_string)
            .unwrap_or_default()
    }

    /// Whether a file (not folder) named `name` exists anywhere in the tree.
    pub fn contains_file(&self, name: &str) -> bool {
        self.find_file(name).is_some()
    }

    /// Replaces the content of the first file named `name`.
    ///
    /// Returns `false` and leaves the tree untouched when no file matches.
    pub fn update_content(&mut self, name: &str, new_content: &str) -> bool {
        fn update(nodes: &mut [FileNode], name: &str, new_content: &str) -> bool {
            for node in nodes {
                match node {
                    FileNode::File {
                        name: file_name,
                        content,
                        ..
                    } if file_name.as_str() == name => {
                        *content = new_content.to_string();
                        return true;
                    }
                    FileNode::Folder { children, .. } => {
                        if update(children, name, new_content) {
                            return true;
                        }
                    }
                    FileNode::File { .. } => {}
                }
            }
            false
        }

        update(&mut self.roots, name, new_content)
    }

    /// Appends `node` under the slash-separated folder `path`.
    ///
    /// Each path segment must name a folder at its level (first sibling with
    /// that name). If any segment misses, the node is appended at the root
    /// instead. An empty or absent path means the root.
    pub fn insert(&mut self, node: FileNode, path: Option<&str>) -> InsertOutcome {
        let Some(path) = path.filter(|p| !p.is_empty()) else {
            self.roots.push(node);
            return InsertOutcome::Placed;
        };

        match self.folder_children_mut(path) {
            Some(children) => {
                children.push(node);
                InsertOutcome::Placed
            }
            None => {
                tracing::debug!(
                    "[FileTree] Path '{}' not found, inserting '{}' at root",
                    path,
                    node.name()
                );
                self.roots.push(node);
                InsertOutcome::FellBackToRoot
            }
        }
    }

    /// Removes the first node named `name` at the nesting level given by `path`.
    ///
    /// With no path only root-level nodes are considered. Returns whether a
    /// node was removed; a miss is a silent no-op.
    pub fn remove(&mut self, name: &str, path: Option<&str>) -> bool {
        fn remove_at(nodes: &mut Vec<FileNode>, name: &str, parts: &[&str]) -> bool {
            match parts.split_first() {
                None => match nodes.iter().position(|node| node.name() == name) {
                    Some(index) => {
                        nodes.remove(index);
                        true
                    }
                    None => false,
                },
                Some((head, rest)) => nodes.iter_mut().any(|node| match node {
                    FileNode::Folder {
                        name: folder,
                        children,
                    } if folder.as_str() == *head => remove_at(children, name, rest),
                    _ => false,
                }),
            }
        }

        let parts: Vec<&str> = path
            .filter(|p| !p.is_empty())
            .map(|p| p.split('/').collect())
            .unwrap_or_default();
        let removed = remove_at(&mut self.roots, name, &parts);
        if !removed {
            tracing::debug!("[FileTree] remove('{}', {:?}) matched nothing", name, path);
        }
        removed
    }

    /// Depth-first pre-order traversal yielding `(depth, node)`.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: self.roots.iter().rev().map(|node| (0, node)).collect(),
        }
    }

    /// Names of all files in traversal order.
    pub fn file_names(&self) -> Vec<&str> {
        self.walk()
            .filter(|(_, node)| !node.is_folder())
            .map(|(_, node)| node.name())
            .collect()
    }

    fn folder_children_mut(&mut self, path: &str) -> Option<&mut Vec<FileNode>> {
        let mut level = &mut self.roots;
        for part in path.split('/') {
            let node = level.iter_mut().find(|node| node.name() == part)?;
            match node {
                FileNode::Folder { children, .. } => level = children,
                FileNode::File { .. } => return None,
            }
        }
        Some(level)
    }
}

/// Iterator returned by [`FileTree::walk`].
pub struct Walk<'a> {
    stack: Vec<(usize, &'a FileNode)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a FileNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        if let Some(children) = node.children() {
            self.stack
                .extend(children.iter().rev().map(|child| (depth + 1, child)));
        }
        Some((depth, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;

    fn tree_with_duplicates() -> FileTree {
        FileTree::from_nodes(vec![
            FileNode::folder(
                "a",
                vec![FileNode::file("dup.txt", "first", Language::Text)],
            ),
            FileNode::folder(
                "b",
                vec![FileNode::file("dup.txt", "second", Language::Text)],
            ),
        ])
    }

    #[test]
    fn test_starter_layout() {
        let tree = FileTree::default();
        let names: Vec<&str> = tree.roots().iter().map(FileNode::name).collect();
        assert_eq!(names, vec!["src", "public", "package.json"]);
        assert_eq!(
            tree.file_names(),
            vec![
                "App.jsx",
                "App.css",
                "index.js",
                "index.css",
                "index.html",
                "package.json"
            ]
        );
        assert!(tree.find_content("App.jsx").contains("export default App;"));
    }

    #[test]
    fn test_missing_name_is_empty_and_update_is_noop() {
        let mut tree = FileTree::default();
        let before = tree.clone();
        assert_eq!(tree.find_content("nope.js"), "");
        assert!(!tree.update_content("nope.js", "x"));
        assert_eq!(tree, before);
    }

    #[test]
    fn test_folder_names_are_not_files() {
        let mut tree = FileTree::default();
        assert_eq!(tree.find_content("src"), "");
        assert!(!tree.update_content("src", "x"));
    }

    #[test]
    fn test_first_match_wins_for_duplicates() {
        let mut tree = tree_with_duplicates();
        assert_eq!(tree.find_content("dup.txt"), "first");
        assert!(tree.update_content("dup.txt", "changed"));
        assert_eq!(tree.find_content("dup.txt"), "changed");

        let b = &tree.roots()[1];
        assert_eq!(b.children().unwrap()[0].content(), Some("second"));
    }

    #[test]
    fn test_insert_then_find_round_trip() {
        let mut tree = FileTree::default();
        let outcome = tree.insert(
            FileNode::file("Hero.jsx", "const Hero = () => null;", Language::Jsx),
            Some("src"),
        );
        assert_eq!(outcome, InsertOutcome::Placed);
        assert_eq!(tree.find_content("Hero.jsx"), "const Hero = () => null;");
        let src = tree.roots()[0].children().unwrap();
        assert_eq!(src.last().unwrap().name(), "Hero.jsx");
    }

    #[test]
    fn test_insert_nested_path() {
        let mut tree = FileTree::default();
        tree.insert(FileNode::folder("components", vec![]), Some("src"));
        let outcome = tree.insert(FileNode::empty_file("Nav.tsx"), Some("src/components"));
        assert_eq!(outcome, InsertOutcome::Placed);

        let (depth, _) = tree
            .walk()
            .find(|(_, node)| node.name() == "Nav.tsx")
            .unwrap();
        assert_eq!(depth, 2);
    }

    #[test]
    fn test_insert_missing_path_falls_back_to_root() {
        let mut tree = FileTree::default();
        let outcome = tree.insert(FileNode::empty_file("x.js"), Some("src/missing"));
        assert_eq!(outcome, InsertOutcome::FellBackToRoot);
        assert_eq!(tree.roots().last().unwrap().name(), "x.js");

        // A leading miss also falls back, even if a later segment exists.
        let outcome = tree.insert(FileNode::empty_file("y.js"), Some("missing/src"));
        assert_eq!(outcome, InsertOutcome::FellBackToRoot);
        assert_eq!(tree.roots().last().unwrap().name(), "y.js");
    }

    #[test]
    fn test_insert_through_file_falls_back() {
        let mut tree = FileTree::default();
        let outcome = tree.insert(FileNode::empty_file("z.js"), Some("package.json"));
        assert_eq!(outcome, InsertOutcome::FellBackToRoot);
    }

    #[test]
    fn test_insert_preserves_sibling_order() {
        let mut tree = FileTree::empty();
        for name in ["c", "a", "b"] {
            tree.insert(FileNode::empty_file(name), None);
        }
        let names: Vec<&str> = tree.roots().iter().map(FileNode::name).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_remove_at_path() {
        let mut tree = FileTree::default();
        assert!(!tree.remove("App.css", None), "root level has no App.css");
        assert!(tree.remove("App.css", Some("src")));
        assert!(!tree.contains_file("App.css"));
        let src: Vec<&str> = tree.roots()[0]
            .children()
            .unwrap()
            .iter()
            .map(FileNode::name)
            .collect();
        assert_eq!(src, vec!["App.jsx", "index.js", "index.css"]);
    }

    #[test]
    fn test_remove_folder_at_root() {
        let mut tree = FileTree::default();
        assert!(tree.remove("public", None));
        assert!(!tree.contains_file("index.html"));
    }

    #[test]
    fn test_remove_miss_is_silent() {
        let mut tree = FileTree::default();
        let before = tree.clone();
        assert!(!tree.remove("ghost", Some("src/deeper")));
        assert_eq!(tree, before);
    }

    #[test]
    fn test_walk_reports_depths() {
        let tree = FileTree::default();
        let depths: Vec<(usize, &str)> = tree.walk().map(|(d, n)| (d, n.name())).collect();
        assert_eq!(depths[0], (0, "src"));
        assert_eq!(depths[1], (1, "App.jsx"));
        assert_eq!(depths[5], (0, "public"));
        assert_eq!(depths[7], (0, "package.json"));
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let tree = FileTree::default();
        let value = serde_json::to_value(&tree).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["name"], "src");
        let back: FileTree = serde_json::from_value(value).unwrap();
        assert_eq!(back, tree);
    }
}
