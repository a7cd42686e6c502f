//! Chat orchestrator.
//!
//! Drives one [`ChatSession`] against a [`CompletionClient`]. An exchange has
//! three steps so the caller decides where the request runs:
//!
//! 1. [`ChatOrchestrator::begin`] validates input and records the user message.
//! 2. [`ChatOrchestrator::request`] returns an owned future performing the call;
//!    it can be awaited in place or spawned.
//! 3. [`ChatOrchestrator::finish`] feeds the reply back into the session.
//!
//! [`ChatOrchestrator::send`] runs all three in sequence.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use webforge_core::chat::{BufferContext, ChatSession, ExchangeOutcome, PendingExchange};
use webforge_core::error::Result;
use webforge_interaction::CompletionClient;

/// Owned, spawnable future of one outbound call.
pub type ReplyFuture = Pin<Box<dyn Future<Output = Result<String>> + Send + 'static>>;

pub struct ChatOrchestrator {
    chat: ChatSession,
    client: Arc<dyn CompletionClient>,
}

impl ChatOrchestrator {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            chat: ChatSession::new(),
            client,
        }
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    pub fn dismiss_error(&mut self) {
        self.chat.dismiss_error();
    }

    /// Swaps the client, e.g. after the API key or model changed.
    pub fn set_client(&mut self, client: Arc<dyn CompletionClient>) {
        self.client = client;
    }

    pub fn begin(&mut self, utterance: &str, context: BufferContext<'_>) -> Result<PendingExchange> {
        self.chat.begin(utterance, context)
    }

    /// The outbound call for `pending`. Owns everything it needs.
    pub fn request(&self, pending: &PendingExchange) -> ReplyFuture {
        let client = Arc::clone(&self.client);
        let prompt = pending.prompt().to_string();
        Box::pin(async move {
            tracing::debug!("[ChatOrchestrator] Sending prompt to {}", client.name());
            client.complete(&prompt).await
        })
    }

    pub fn finish(
        &mut self,
        pending: PendingExchange,
        reply: Result<String>,
    ) -> Option<ExchangeOutcome> {
        self.chat.complete(pending, reply)
    }

    /// Runs a whole exchange. `Err` only for rejected input; request
    /// failures come back as [`ExchangeOutcome::Failure`].
    pub async fn send(
        &mut self,
        utterance: &str,
        context: BufferContext<'_>,
    ) -> Result<Option<ExchangeOutcome>> {
        let pending = self.begin(utterance, context)?;
        let reply = self.request(&pending).await;
        Ok(self.finish(pending, reply))
    }

    /// Clears the history; replies still in flight are discarded on arrival.
    pub fn reset(&mut self) {
        self.chat.reset();
    }
}
