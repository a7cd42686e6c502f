//! One workbench session: editor, chat, preview and terminal wired together.
//!
//! All state lives in memory for the lifetime of the value. Applying a chat
//! reply, editing, opening a file and running a terminal command all go
//! through here so the preview follows the buffer.

use std::sync::Arc;

use webforge_core::chat::{BufferContext, ChatSession, ExchangeOutcome, PendingExchange};
use webforge_core::editor::Editor;
use webforge_core::error::Result;
use webforge_core::file_tree::{FileTree, InsertOutcome, NodeKind};
use webforge_core::observer::WorkspaceObserver;
use webforge_core::preview::{DocumentHandle, DocumentHost, PreviewGenerator, PreviewPane};
use webforge_core::terminal::Terminal;
use webforge_interaction::CompletionClient;

use crate::chat_orchestrator::{ChatOrchestrator, ReplyFuture};

pub struct IdeSession<H: DocumentHost> {
    editor: Editor,
    orchestrator: ChatOrchestrator,
    preview: PreviewPane<H>,
    terminal: Terminal,
    observer: Arc<dyn WorkspaceObserver>,
}

impl<H: DocumentHost> IdeSession<H> {
    /// Starts a session on the starter project with `App.jsx` open and a
    /// first preview generated.
    pub fn new(
        client: Arc<dyn CompletionClient>,
        host: H,
        observer: Arc<dyn WorkspaceObserver>,
    ) -> Result<Self> {
        Self::with_tree(FileTree::default(), client, host, observer)
    }

    pub fn with_tree(
        tree: FileTree,
        client: Arc<dyn CompletionClient>,
        host: H,
        observer: Arc<dyn WorkspaceObserver>,
    ) -> Result<Self> {
        let mut session = Self {
            editor: Editor::new(tree, Arc::clone(&observer)),
            orchestrator: ChatOrchestrator::new(client),
            preview: PreviewPane::new(PreviewGenerator::default(), host),
            terminal: Terminal::new(),
            observer,
        };
        session.sync_preview()?;
        Ok(session)
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn chat(&self) -> &ChatSession {
        self.orchestrator.chat()
    }

    pub fn preview(&self) -> &PreviewPane<H> {
        &self.preview
    }

    pub fn terminal(&self) -> &Terminal {
        &self.terminal
    }

    pub fn set_client(&mut self, client: Arc<dyn CompletionClient>) {
        self.orchestrator.set_client(client);
    }

    // ------------------------------------------------------------------
    // Editor
    // ------------------------------------------------------------------

    pub fn open(&mut self, name: &str) -> Result<()> {
        self.editor.open(name);
        self.sync_preview()
    }

    pub fn edit(&mut self, text: &str) -> Result<()> {
        self.editor.edit(text);
        self.sync_preview()
    }

    pub fn save(&mut self) -> bool {
        self.editor.save()
    }

    pub fn create_entry(
        &mut self,
        name: &str,
        kind: NodeKind,
        path: Option<&str>,
    ) -> Result<Option<InsertOutcome>> {
        let outcome = self.editor.create_entry(name, kind, path);
        self.sync_preview()?;
        Ok(outcome)
    }

    pub fn delete_entry(&mut self, name: &str, path: Option<&str>) -> Result<bool> {
        let removed = self.editor.delete_entry(name, path);
        self.sync_preview()?;
        Ok(removed)
    }

    // ------------------------------------------------------------------
    // Chat
    // ------------------------------------------------------------------

    /// Starts an exchange with a snapshot of the current buffer.
    pub fn begin_send(&mut self, utterance: &str) -> Result<PendingExchange> {
        let context = BufferContext::new(self.editor.active_file(), self.editor.buffer());
        self.orchestrator.begin(utterance, context)
    }

    pub fn request(&self, pending: &PendingExchange) -> ReplyFuture {
        self.orchestrator.request(pending)
    }

    /// Records the reply and carries out what it asks for: the first snippet
    /// goes into the editor and an analysis request reaches the observer.
    pub fn finish_send(
        &mut self,
        pending: PendingExchange,
        reply: Result<String>,
    ) -> Result<Option<ExchangeOutcome>> {
        let outcome = self.orchestrator.finish(pending, reply);
        if let Some(ExchangeOutcome::Success { apply, analysis }) = &outcome {
            if let Some(snippet) = apply {
                self.editor
                    .apply_generated(&snippet.code, snippet.file_name.as_deref());
                self.sync_preview()?;
            }
            if let Some(code) = analysis {
                self.observer.on_code_analysis_requested(code);
            }
        }
        Ok(outcome)
    }

    /// Runs a whole exchange in place.
    pub async fn send(&mut self, utterance: &str) -> Result<Option<ExchangeOutcome>> {
        let pending = self.begin_send(utterance)?;
        let reply = self.request(&pending).await;
        self.finish_send(pending, reply)
    }

    /// Applies a snippet kept in the history. Returns `false` if it does not exist.
    pub fn apply_snippet(&mut self, message_index: usize, snippet_index: usize) -> Result<bool> {
        let Some(snippet) = self
            .orchestrator
            .chat()
            .snippet(message_index, snippet_index)
            .cloned()
        else {
            return Ok(false);
        };
        self.editor
            .apply_generated(&snippet.code, snippet.file_name.as_deref());
        self.sync_preview()?;
        Ok(true)
    }

    pub fn dismiss_error(&mut self) {
        self.orchestrator.dismiss_error();
    }

    pub fn reset_chat(&mut self) {
        self.orchestrator.reset();
    }

    // ------------------------------------------------------------------
    // Terminal
    // ------------------------------------------------------------------

    pub fn run_command(&mut self, input: &str) -> Vec<String> {
        self.terminal.execute(input, &mut self.editor)
    }

    pub fn export_to_github(&mut self, token: &str, repository: &str) -> bool {
        self.terminal.export_to_github(token, repository)
    }

    pub fn download_project(&mut self) {
        self.terminal.download_project();
    }

    // ------------------------------------------------------------------
    // Preview
    // ------------------------------------------------------------------

    /// Forces a regeneration of the current buffer.
    pub fn refresh_preview(&mut self) -> Result<DocumentHandle> {
        let buffer = self.editor.buffer().to_string();
        self.preview.refresh(&buffer)
    }

    pub fn mark_preview_loaded(&mut self, handle: &DocumentHandle) -> bool {
        self.preview.mark_loaded(handle)
    }

    pub fn open_preview_in_new_window(&mut self) -> Result<DocumentHandle> {
        self.preview.open_in_new_window(self.editor.buffer())
    }

    fn sync_preview(&mut self) -> Result<()> {
        self.preview.watch(self.editor.buffer())?;
        Ok(())
    }
}
