//! Active buffer controller.
//!
//! [`Editor`] owns the session's [`FileTree`] together with the name of the
//! open file and its live buffer. Every edit is written back into the tree
//! synchronously, so there is never an unsaved state and switching files
//! cannot lose data. [`Editor::save`] exists for the UI's save action and is
//! equivalent to re-applying the current buffer.

use std::sync::Arc;

use crate::file_tree::{FileNode, FileTree, InsertOutcome, NodeKind, starter};
use crate::language::Language;
use crate::observer::{NoopObserver, WorkspaceObserver};

/// Tracks the open file and mirrors it into an editable buffer.
pub struct Editor {
    tree: FileTree,
    active_file: Option<String>,
    buffer: String,
    observer: Arc<dyn WorkspaceObserver>,
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("active_file", &self.active_file)
            .field("buffer_len", &self.buffer.len())
            .finish_non_exhaustive()
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(FileTree::default(), Arc::new(NoopObserver))
    }
}

impl Editor {
    /// Creates an editor over `tree` and opens the entry component if present.
    pub fn new(tree: FileTree, observer: Arc<dyn WorkspaceObserver>) -> Self {
        let mut editor = Self {
            tree,
            active_file: None,
            buffer: String::new(),
            observer,
        };
        if editor.tree.contains_file(starter::ENTRY_FILE) {
            editor.open(starter::ENTRY_FILE);
        }
        editor
    }

    pub fn tree(&self) -> &FileTree {
        &self.tree
    }

    pub fn active_file(&self) -> Option<&str> {
        self.active_file.as_deref()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Language the editor uses for highlighting the active file.
    pub fn editor_language(&self) -> Language {
        Language::for_editor(self.active_file())
    }

    /// Makes `name` the active file and loads its content into the buffer.
    ///
    /// Opening a name that is not in the tree yields an empty buffer.
    pub fn open(&mut self, name: &str) {
        tracing::debug!("[Editor] open('{}')", name);
        self.active_file = Some(name.to_string());
        self.buffer = self.tree.find_content(name);
    }

    /// Replaces the buffer and persists it into the active file immediately.
    pub fn edit(&mut self, new_text: &str) {
        self.buffer = new_text.to_string();
        self.observer.on_code_change(&self.buffer);
        self.persist();
    }

    /// Writes the buffer back into the tree. Redundant with [`Editor::edit`].
    pub fn save(&mut self) -> bool {
        self.persist()
    }

    /// Inserts `node` without opening it and notifies the observer.
    pub fn insert_node(&mut self, node: FileNode, path: Option<&str>) -> InsertOutcome {
        let outcome = self.tree.insert(node, path);
        self.observer.on_file_structure_change(&self.tree);
        outcome
    }

    /// Creates an empty file or folder. New files are opened with an empty buffer.
    ///
    /// Blank names are ignored and return `None`.
    pub fn create_entry(
        &mut self,
        name: &str,
        kind: NodeKind,
        path: Option<&str>,
    ) -> Option<InsertOutcome> {
        if name.trim().is_empty() {
            return None;
        }
        let outcome = self.insert_node(FileNode::new_entry(name, kind), path);
        if kind == NodeKind::File {
            self.active_file = Some(name.to_string());
            self.buffer.clear();
        }
        Some(outcome)
    }

    /// Removes an entry; clears the selection if the active file went with it.
    ///
    /// Deleting a folder drops every file below it, so the selection is also
    /// cleared when the active file no longer resolves in the tree.
    pub fn delete_entry(&mut self, name: &str, path: Option<&str>) -> bool {
        let removed = self.tree.remove(name, path);
        self.observer.on_file_structure_change(&self.tree);
        let dangling = self
            .active_file
            .as_deref()
            .is_some_and(|active| active == name || !self.tree.contains_file(active));
        if dangling {
            tracing::debug!("[Editor] Active file gone after deleting '{}', clearing buffer", name);
            self.active_file = None;
            self.buffer.clear();
        }
        removed
    }

    /// Applies generated code as the new content of `file_name`.
    ///
    /// An unknown file name is created at the root first. Without a file name
    /// the active file receives the code.
    pub fn apply_generated(&mut self, code: &str, file_name: Option<&str>) {
        if let Some(name) = file_name {
            if !self.tree.contains_file(name) {
                tracing::info!("[Editor] Creating '{}' for generated code", name);
                self.insert_node(FileNode::empty_file(name), None);
            }
            self.open(name);
        }
        self.edit(code);
        self.observer.on_code_generated(code, file_name);
    }

    fn persist(&mut self) -> bool {
        match self.active_file.as_deref() {
            Some(name) => self.tree.update_content(name, &self.buffer),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::recording::RecordingObserver;

    fn editor_with_recorder() -> (Editor, Arc<RecordingObserver>) {
        let recorder = Arc::new(RecordingObserver::default());
        let editor = Editor::new(FileTree::default(), recorder.clone());
        (editor, recorder)
    }

    #[test]
    fn test_starts_on_entry_file() {
        let editor = Editor::default();
        assert_eq!(editor.active_file(), Some("App.jsx"));
        assert_eq!(editor.buffer(), starter::APP_JSX);
        assert_eq!(editor.editor_language(), Language::Jsx);
    }

    #[test]
    fn test_empty_tree_has_no_active_file() {
        let editor = Editor::new(FileTree::empty(), Arc::new(NoopObserver));
        assert_eq!(editor.active_file(), None);
        assert_eq!(editor.buffer(), "");
    }

    #[test]
    fn test_edit_persists_immediately() {
        let (mut editor, recorder) = editor_with_recorder();
        editor.edit("export default Page;");
        assert_eq!(editor.tree().find_content("App.jsx"), "export default Page;");
        assert_eq!(recorder.events(), vec!["change:export default Page;"]);
    }

    #[test]
    fn test_edit_is_idempotent() {
        let mut once = Editor::default();
        let text = once.buffer().to_string();
        once.edit(&text);

        let mut twice = Editor::default();
        twice.edit(&text);
        twice.edit(&text);

        assert_eq!(once.tree(), twice.tree());
        assert_eq!(once.buffer(), twice.buffer());
    }

    #[test]
    fn test_switching_files_keeps_edits() {
        let mut editor = Editor::default();
        editor.edit("changed");
        editor.open("index.css");
        assert_eq!(editor.editor_language(), Language::Css);
        editor.open("App.jsx");
        assert_eq!(editor.buffer(), "changed");
    }

    #[test]
    fn test_save_is_harmless() {
        let mut editor = Editor::default();
        editor.edit("x");
        let before = editor.tree().clone();
        assert!(editor.save());
        assert_eq!(editor.tree(), &before);
    }

    #[test]
    fn test_delete_active_file_clears_selection() {
        let (mut editor, recorder) = editor_with_recorder();
        assert!(editor.delete_entry("App.jsx", Some("src")));
        assert_eq!(editor.active_file(), None);
        assert_eq!(editor.buffer(), "");
        assert!(!editor.save());
        assert_eq!(recorder.events(), vec!["structure:3"]);
    }

    #[test]
    fn test_delete_folder_holding_active_file_clears_selection() {
        let mut editor = Editor::default();
        assert!(editor.delete_entry("src", None));
        assert_eq!(editor.active_file(), None);
        assert_eq!(editor.buffer(), "");

        editor.edit("typed after delete");
        assert!(!editor.tree().contains_file("App.jsx"));
        assert!(!editor.save());
    }

    #[test]
    fn test_delete_other_file_keeps_selection() {
        let mut editor = Editor::default();
        editor.delete_entry("package.json", None);
        assert_eq!(editor.active_file(), Some("App.jsx"));
        assert!(!editor.buffer().is_empty());
    }

    #[test]
    fn test_create_file_opens_it() {
        let (mut editor, recorder) = editor_with_recorder();
        let outcome = editor.create_entry("Card.tsx", NodeKind::File, Some("src"));
        assert_eq!(outcome, Some(InsertOutcome::Placed));
        assert_eq!(editor.active_file(), Some("Card.tsx"));
        assert_eq!(editor.buffer(), "");
        assert_eq!(editor.editor_language(), Language::Tsx);
        assert_eq!(recorder.events().len(), 1);
    }

    #[test]
    fn test_create_folder_keeps_selection() {
        let mut editor = Editor::default();
        editor.create_entry("assets", NodeKind::Folder, None);
        assert_eq!(editor.active_file(), Some("App.jsx"));
        assert_eq!(editor.create_entry("  ", NodeKind::Folder, None), None);
    }

    #[test]
    fn test_apply_generated_to_existing_file() {
        let (mut editor, recorder) = editor_with_recorder();
        editor.apply_generated(".app { color: red; }", Some("App.css"));
        assert_eq!(editor.active_file(), Some("App.css"));
        assert_eq!(editor.tree().find_content("App.css"), ".app { color: red; }");
        assert_eq!(
            recorder.events().last().unwrap(),
            "generated:App.css:.app { color: red; }"
        );
    }

    #[test]
    fn test_apply_generated_creates_missing_file() {
        let mut editor = Editor::default();
        editor.apply_generated("function Button() {}", Some("Button.jsx"));
        assert_eq!(editor.active_file(), Some("Button.jsx"));
        let node = editor.tree().find_file("Button.jsx").unwrap();
        assert_eq!(node.language(), Some(Language::Jsx));
        assert_eq!(node.content(), Some("function Button() {}"));
        assert_eq!(editor.tree().roots().last().unwrap().name(), "Button.jsx");
    }

    #[test]
    fn test_apply_generated_without_name_edits_active() {
        let mut editor = Editor::default();
        editor.apply_generated("plain", None);
        assert_eq!(editor.active_file(), Some("App.jsx"));
        assert_eq!(editor.tree().find_content("App.jsx"), "plain");
    }
}
