//! Collaborator callbacks fired by the core.
//!
//! The surrounding shell (CLI, REPL, GUI) implements [`WorkspaceObserver`] to
//! react to changes. Every callback is fire-and-forget: the core never reads a
//! return value and never waits on the observer.

use crate::file_tree::FileTree;

/// Receiver of core notifications. All methods default to no-ops.
pub trait WorkspaceObserver: Send + Sync {
    /// A snippet was applied to the editor.
    fn on_code_generated(&self, _code: &str, _file_name: Option<&str>) {}

    /// The user asked the assistant to analyse the current buffer.
    fn on_code_analysis_requested(&self, _code: &str) {}

    /// The buffer text changed through an edit.
    fn on_code_change(&self, _code: &str) {}

    /// Files or folders were added or removed.
    fn on_file_structure_change(&self, _tree: &FileTree) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl WorkspaceObserver for NoopObserver {}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;
    use std::sync::Mutex;

    /// Test observer that records every callback as a string event.
    #[derive(Default)]
    pub struct RecordingObserver {
        pub events: Mutex<Vec<String>>,
    }

    impl RecordingObserver {
        pub fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }

        fn push(&self, event: String) {
            self.events.lock().unwrap().push(event);
        }
    }

    impl WorkspaceObserver for RecordingObserver {
        fn on_code_generated(&self, code: &str, file_name: Option<&str>) {
            self.push(format!("generated:{}:{}", file_name.unwrap_or("-"), code));
        }

        fn on_code_analysis_requested(&self, code: &str) {
            self.push(format!("analysis:{code}"));
        }

        fn on_code_change(&self, code: &str) {
            self.push(format!("change:{code}"));
        }

        fn on_file_structure_change(&self, tree: &FileTree) {
            self.push(format!("structure:{}", tree.roots().len()));
        }
    }
}
