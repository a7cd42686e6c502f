pub mod chat;
pub mod config;
pub mod editor;
pub mod error;
pub mod file_tree;
pub mod language;
pub mod observer;
pub mod preview;
pub mod secret;
pub mod terminal;

// Re-export common error type
pub use error::ForgeError;
