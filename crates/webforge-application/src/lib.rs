//! Application layer for WEBFORGE.
//!
//! Coordinates the domain objects of `webforge-core` with the completion
//! client of `webforge-interaction`.

pub mod chat_orchestrator;
pub mod ide_session;

pub use chat_orchestrator::{ChatOrchestrator, ReplyFuture};
pub use ide_session::IdeSession;

#[cfg(test)]
mod testing;
