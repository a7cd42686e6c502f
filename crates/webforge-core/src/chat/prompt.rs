//! Outbound prompt construction.

use crate::file_tree::starter::ENTRY_FILE;
use crate::language::extension_of;

/// Substrings that make the current buffer relevant to the request.
pub const CONTEXT_KEYWORDS: [&str; 6] = ["код", "исправ", "анализ", "добав", "создай", "сделай"];

/// Substring that additionally triggers an analysis notification.
pub const ANALYSIS_KEYWORD: &str = "анализ";

/// Appended to every prompt so replies come back as complete, named files.
pub const FORMAT_INSTRUCTION: &str = "\n\nЕсли ты генерируешь код, пожалуйста, используй формат ```язык\n// имя_файла.расширение\nкод\n``` чтобы я мог определить язык и имя файла. Пожалуйста, предоставь полный код компонента или файла, а не только изменения.";

/// Snapshot of the editor at the time the user sends a message.
#[derive(Debug, Clone, Copy)]
pub struct BufferContext<'a> {
    pub file_name: &'a str,
    pub code: &'a str,
}

impl<'a> BufferContext<'a> {
    /// Context for `code`; without an active file the entry component's name is used.
    pub fn new(file_name: Option<&'a str>, code: &'a str) -> Self {
        Self {
            file_name: file_name.unwrap_or(ENTRY_FILE),
            code,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}

fn mentions_any(utterance: &str, keywords: &[&str]) -> bool {
    let lower = utterance.to_lowercase();
    keywords.iter().any(|keyword| lower.contains(keyword))
}

/// Whether the utterance asks for the buffer to be sent along.
pub fn wants_code_context(utterance: &str) -> bool {
    mentions_any(utterance, &CONTEXT_KEYWORDS)
}

/// Whether the utterance asks for an analysis of the buffer.
pub fn wants_analysis(utterance: &str) -> bool {
    mentions_any(utterance, &[ANALYSIS_KEYWORD])
}

/// Builds the prompt sent to the model for `utterance`.
pub fn build_prompt(utterance: &str, context: BufferContext<'_>) -> String {
    let mut prompt = utterance.to_string();
    if !context.is_empty() && wants_code_context(utterance) {
        prompt.push_str(&format!(
            "\n\nТекущий код ({file}):\n```{ext}\n{code}\n```",
            file = context.file_name,
            ext = extension_of(context.file_name),
            code = context.code,
        ));
    }
    prompt.push_str(FORMAT_INSTRUCTION);
    prompt
}
