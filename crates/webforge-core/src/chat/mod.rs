//! Chat domain module.
//!
//! [`ChatSession`] holds the history and the per-exchange state machine
//! `Idle -> Sending -> {Success, Failure} -> Idle`. It performs no I/O: an
//! exchange is started with [`ChatSession::begin`], the caller performs the
//! request, and the result is fed back through [`ChatSession::complete`].
//!
//! # Module Structure
//!
//! - `message`: `ChatMessage`, `MessageRole`
//! - `snippet`: fenced code block extraction and filename inference
//! - `prompt`: prompt construction and keyword detection

mod message;
pub mod prompt;
pub mod snippet;

pub use message::{ChatMessage, MessageRole};
pub use prompt::{BufferContext, build_prompt};
pub use snippet::{CodeSnippet, extract_snippets};

use crate::error::{ForgeError, Result};

/// First assistant message of every session.
pub const GREETING: &str = "Привет! Я ИИ-ассистент для создания веб-сайтов. Опишите, какой сайт вы хотите создать, и я помогу вам с кодом.";

/// Prefix of the history entry recorded for a failed exchange.
pub const ERROR_PREFIX: &str = "Ошибка: ";

/// Prefix of the confirmation recorded when a snippet is auto-applied.
pub const APPLYING_PREFIX: &str = "Применяю код в редактор: ";

/// Request state of the chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeState {
    /// Ready to accept a message.
    Idle,
    /// One request is in flight; submissions are rejected.
    Sending { exchange_id: u64 },
}

/// Token for an exchange started with [`ChatSession::begin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingExchange {
    exchange_id: u64,
    epoch: u64,
    prompt: String,
    utterance: String,
    file_name: String,
    buffer: String,
}

impl PendingExchange {
    /// Prompt to send to the model.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn utterance(&self) -> &str {
        &self.utterance
    }
}

/// What the caller must do after an exchange completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeOutcome {
    Success {
        /// First snippet of the reply, to be applied to the editor.
        apply: Option<CodeSnippet>,
        /// Buffer to hand to the analysis collaborator, if requested.
        analysis: Option<String>,
    },
    Failure {
        message: String,
    },
}

/// Chat history plus the single-exchange request state.
#[derive(Debug, Clone)]
pub struct ChatSession {
    history: Vec<ChatMessage>,
    state: ExchangeState,
    error: Option<String>,
    epoch: u64,
    next_exchange_id: u64,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            history: vec![ChatMessage::assistant(GREETING)],
            state: ExchangeState::Idle,
            error: None,
            epoch: 0,
            next_exchange_id: 0,
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn state(&self) -> ExchangeState {
        self.state
    }

    pub fn is_sending(&self) -> bool {
        matches!(self.state, ExchangeState::Sending { .. })
    }

    /// Error banner text of the last failed exchange.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// A stored snippet, for manual application from the history.
    pub fn snippet(&self, message_index: usize, snippet_index: usize) -> Option<&CodeSnippet> {
        self.history
            .get(message_index)
            .and_then(|message| message.snippets.get(snippet_index))
    }

    /// Starts an exchange: validates input, records the user message and
    /// switches to `Sending`.
    pub fn begin(&mut self, utterance: &str, context: BufferContext<'_>) -> Result<PendingExchange> {
        if self.is_sending() {
            return Err(ForgeError::ExchangeInFlight);
        }
        if utterance.trim().is_empty() {
            return Err(ForgeError::EmptyInput);
        }

        self.history.push(ChatMessage::user(utterance));
        self.error = None;
        self.next_exchange_id += 1;
        let exchange_id = self.next_exchange_id;
        self.state = ExchangeState::Sending { exchange_id };
        tracing::debug!("[ChatSession] Exchange {} started", exchange_id);

        Ok(PendingExchange {
            exchange_id,
            epoch: self.epoch,
            prompt: build_prompt(utterance, context),
            utterance: utterance.to_string(),
            file_name: context.file_name.to_string(),
            buffer: context.code.to_string(),
        })
    }

    /// Finishes an exchange with the model's reply or the request error.
    ///
    /// Returns `None` when the exchange no longer belongs to this session
    /// (for example after [`ChatSession::reset`]); the result is dropped.
    pub fn complete(
        &mut self,
        pending: PendingExchange,
        reply: Result<String>,
    ) -> Option<ExchangeOutcome> {
        let current = ExchangeState::Sending {
            exchange_id: pending.exchange_id,
        };
        if pending.epoch != self.epoch || self.state != current {
            tracing::debug!(
                "[ChatSession] Dropping late result for exchange {}",
                pending.exchange_id
            );
            return None;
        }
        self.state = ExchangeState::Idle;

        match reply {
            Ok(text) => {
                let snippets = extract_snippets(&text);
                let apply = snippets.first().cloned();
                self.history
                    .push(ChatMessage::assistant(text).with_snippets(snippets));

                if let Some(snippet) = &apply {
                    let target = snippet.file_name.as_deref().unwrap_or(&pending.file_name);
                    self.history
                        .push(ChatMessage::assistant(format!("{APPLYING_PREFIX}{target}")));
                }

                let analysis = (prompt::wants_analysis(&pending.utterance)
                    && !pending.buffer.is_empty())
                .then(|| pending.buffer.clone());

                Some(ExchangeOutcome::Success { apply, analysis })
            }
            Err(err) => {
                let message = err.to_string();
                tracing::warn!("[ChatSession] Exchange {} failed: {}", pending.exchange_id, message);
                self.error = Some(message.clone());
                self.history
                    .push(ChatMessage::assistant(format!("{ERROR_PREFIX}{message}")));
                Some(ExchangeOutcome::Failure { message })
            }
        }
    }

    /// Starts over with a fresh history. Results of exchanges begun before
    /// the reset are ignored when they arrive.
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.history = vec![ChatMessage::assistant(GREETING)];
        self.state = ExchangeState::Idle;
        self.error = None;
    }
}
