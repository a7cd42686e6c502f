//! Lifecycle of generated preview documents.
//!
//! Each generation is handed to a [`DocumentHost`], which turns the HTML into
//! something a frame can load (a blob URL in a browser, a temp file on disk)
//! and returns a handle. A handle stays alive while it is displayed and is
//! released once the frame has loaded the next generation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::PreviewGenerator;
use crate::error::Result;

/// Opaque reference to a hosted document, e.g. a URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentHandle(pub String);

impl DocumentHandle {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocumentHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Backing store for generated documents.
pub trait DocumentHost {
    /// Stores `html` and returns a handle the rendering context can load.
    fn create(&mut self, html: &str) -> Result<DocumentHandle>;

    /// Frees the resources behind `handle`. Unknown handles are ignored.
    fn release(&mut self, handle: &DocumentHandle);

    /// Shows `handle` outside the embedded frame. Defaults to doing nothing.
    fn open_external(&mut self, _handle: &DocumentHandle) -> Result<()> {
        Ok(())
    }
}

/// Host keeping documents in memory, addressed by `blob:webforge/<n>`.
#[derive(Debug, Default)]
pub struct InMemoryDocumentHost {
    next_id: u64,
    documents: BTreeMap<String, String>,
    released: Vec<DocumentHandle>,
    opened_external: Vec<DocumentHandle>,
}

impl InMemoryDocumentHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, handle: &DocumentHandle) -> Option<&str> {
        self.documents.get(handle.as_str()).map(String::as_str)
    }

    /// Number of documents not yet released.
    pub fn live_count(&self) -> usize {
        self.documents.len()
    }

    pub fn released(&self) -> &[DocumentHandle] {
        &self.released
    }

    pub fn opened_external(&self) -> &[DocumentHandle] {
        &self.opened_external
    }
}

impl DocumentHost for InMemoryDocumentHost {
    fn create(&mut self, html: &str) -> Result<DocumentHandle> {
        self.next_id += 1;
        let handle = DocumentHandle(format!("blob:webforge/{}", self.next_id));
        self.documents.insert(handle.0.clone(), html.to_string());
        Ok(handle)
    }

    fn release(&mut self, handle: &DocumentHandle) {
        if self.documents.remove(handle.as_str()).is_some() {
            self.released.push(handle.clone());
        }
    }

    fn open_external(&mut self, handle: &DocumentHandle) -> Result<()> {
        self.opened_external.push(handle.clone());
        Ok(())
    }
}

/// The preview panel: regenerates on buffer changes and manages handles.
///
/// At most two handles are alive: the one on display and the one the frame
/// is currently loading. A pending handle superseded before it loaded is
/// released right away since it will never be displayed.
pub struct PreviewPane<H: DocumentHost> {
    generator: PreviewGenerator,
    host: H,
    last_source: Option<String>,
    displayed: Option<DocumentHandle>,
    pending: Option<DocumentHandle>,
}

impl<H: DocumentHost> PreviewPane<H> {
    pub fn new(generator: PreviewGenerator, host: H) -> Self {
        Self {
            generator,
            host,
            last_source: None,
            displayed: None,
            pending: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn displayed(&self) -> Option<&DocumentHandle> {
        self.displayed.as_ref()
    }

    pub fn pending(&self) -> Option<&DocumentHandle> {
        self.pending.as_ref()
    }

    /// Whether a generated document is still waiting for its load event.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Regenerates when `source` differs from the last generated source.
    pub fn watch(&mut self, source: &str) -> Result<Option<DocumentHandle>> {
        if self.last_source.as_deref() == Some(source) {
            return Ok(None);
        }
        self.refresh(source).map(Some)
    }

    /// Regenerates unconditionally and returns the handle to load.
    pub fn refresh(&mut self, source: &str) -> Result<DocumentHandle> {
        let html = self.generator.generate(source);
        let handle = self.host.create(&html)?;
        self.last_source = Some(source.to_string());
        if let Some(superseded) = self.pending.replace(handle.clone()) {
            tracing::debug!("[PreviewPane] Releasing unloaded document {}", superseded);
            self.host.release(&superseded);
        }
        Ok(handle)
    }

    /// Records that the frame finished loading `handle`.
    ///
    /// The previously displayed document is released. Load events for
    /// anything other than the pending handle are stale and ignored.
    pub fn mark_loaded(&mut self, handle: &DocumentHandle) -> bool {
        if self.pending.as_ref() != Some(handle) {
            return false;
        }
        self.pending = None;
        if let Some(previous) = self.displayed.replace(handle.clone()) {
            self.host.release(&previous);
        }
        true
    }

    /// Opens `source` in a separate window.
    ///
    /// The document is generated afresh, passed to the host and released
    /// once the host has taken it over. The panel's own handles are untouched.
    pub fn open_in_new_window(&mut self, source: &str) -> Result<DocumentHandle> {
        let html = self.generator.generate(source);
        let handle = self.host.create(&html)?;
        let opened = self.host.open_external(&handle);
        self.host.release(&handle);
        opened.map(|_| handle)
    }
}

impl<H: DocumentHost> Drop for PreviewPane<H> {
    fn drop(&mut self) {
        for handle in [self.pending.take(), self.displayed.take()].into_iter().flatten() {
            self.host.release(&handle);
        }
    }
}
