//! Document host backed by files in a private temporary directory.
//!
//! Handles are `file://` URLs a browser can open. Releasing a handle deletes
//! its file; dropping the host removes the whole directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use webforge_core::error::Result;
use webforge_core::preview::{DocumentHandle, DocumentHost};

#[derive(Debug)]
pub struct TempFileDocumentHost {
    dir: TempDir,
    next_id: u64,
    files: HashMap<DocumentHandle, PathBuf>,
    last_external: Option<PathBuf>,
}

impl TempFileDocumentHost {
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("webforge-preview-").tempdir()?;
        tracing::debug!("[TempFileDocumentHost] Using {}", dir.path().display());
        Ok(Self {
            dir,
            next_id: 0,
            files: HashMap::new(),
            last_external: None,
        })
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Path behind a live handle.
    pub fn path_of(&self, handle: &DocumentHandle) -> Option<&Path> {
        self.files.get(handle).map(PathBuf::as_path)
    }

    /// Copy made by the last [`DocumentHost::open_external`] call. It outlives
    /// the released handle and is removed with the host.
    pub fn last_external(&self) -> Option<&Path> {
        self.last_external.as_deref()
    }

    fn next_path(&mut self, stem: &str) -> PathBuf {
        self.next_id += 1;
        self.dir.path().join(format!("{stem}-{}.html", self.next_id))
    }
}

impl DocumentHost for TempFileDocumentHost {
    fn create(&mut self, html: &str) -> Result<DocumentHandle> {
        let path = self.next_path("preview");
        std::fs::write(&path, html)?;
        let handle = DocumentHandle(format!("file://{}", path.display()));
        self.files.insert(handle.clone(), path);
        Ok(handle)
    }

    fn release(&mut self, handle: &DocumentHandle) {
        if let Some(path) = self.files.remove(handle) {
            if let Err(err) = std::fs::remove_file(&path) {
                tracing::warn!(
                    "[TempFileDocumentHost] Failed to remove {}: {}",
                    path.display(),
                    err
                );
            }
        }
    }

    fn open_external(&mut self, handle: &DocumentHandle) -> Result<()> {
        let Some(source) = self.files.get(handle).cloned() else {
            return Ok(());
        };
        let target = self.next_path("window");
        std::fs::copy(&source, &target)?;
        tracing::info!("[TempFileDocumentHost] Preview window file: {}", target.display());
        self.last_external = Some(target);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webforge_core::preview::{PreviewGenerator, PreviewPane};

    #[test]
    fn test_create_and_release_files() {
        let mut host = TempFileDocumentHost::new().unwrap();
        let handle = host.create("<html></html>").unwrap();
        assert!(handle.as_str().starts_with("file://"));

        let path = host.path_of(&handle).unwrap().to_path_buf();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html></html>");

        host.release(&handle);
        assert!(!path.exists());
        assert!(host.path_of(&handle).is_none());
        host.release(&handle);
    }

    #[test]
    fn test_external_copy_survives_release() {
        let mut pane = PreviewPane::new(
            PreviewGenerator::default(),
            TempFileDocumentHost::new().unwrap(),
        );
        pane.watch("export default App;").unwrap();
        let handle = pane.open_in_new_window("export default App;").unwrap();

        let host = pane.host();
        assert!(host.path_of(&handle).is_none());
        let external = host.last_external().unwrap();
        assert!(std::fs::read_to_string(external).unwrap().contains("<App />"));
    }

    #[test]
    fn test_new_window_renders_given_source() {
        let mut pane = PreviewPane::new(
            PreviewGenerator::default(),
            TempFileDocumentHost::new().unwrap(),
        );
        pane.watch("export default Old;").unwrap();
        pane.open_in_new_window("export default Fresh;").unwrap();

        let external = pane.host().last_external().unwrap();
        let html = std::fs::read_to_string(external).unwrap();
        assert!(html.contains("const App = Fresh;"));
        assert!(!html.contains("const App = Old;"));
    }

    #[test]
    fn test_directory_removed_on_drop() {
        let host = TempFileDocumentHost::new().unwrap();
        let dir = host.dir().to_path_buf();
        assert!(dir.exists());
        drop(host);
        assert!(!dir.exists());
    }
}
