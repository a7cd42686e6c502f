//! Extraction of fenced code blocks from assistant replies.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::language::Language;

/// Language tag used when a fence has none.
pub const PLAIN_TEXT_TAG: &str = "text";

/// A fenced code block found in a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSnippet {
    pub code: String,
    /// Fence language tag as written, or `text`.
    pub language: String,
    pub file_name: Option<String>,
}

static FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```([A-Za-z0-9_-]+)?\n((?s:.*?))```").expect("valid regex"));

/// `// name.ext`, `# name.ext` and `/* name.ext */`, tried in this order.
static FILE_NAME_COMMENTS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        r"(?m)^//\s*([A-Za-z0-9_.-]+\.[A-Za-z0-9_]+)",
        r"(?m)^#\s*([A-Za-z0-9_.-]+\.[A-Za-z0-9_]+)",
        r"(?m)^\s*/\*\s*([A-Za-z0-9_.-]+\.[A-Za-z0-9_]+)\s*\*/",
    ]
    .map(|pattern| Regex::new(pattern).expect("valid regex"))
});

static COMPONENT_DECLARATIONS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        r"function\s+([A-Z][A-Za-z0-9_]+)\s*\(",
        r"class\s+([A-Z][A-Za-z0-9_]+)\s+extends",
        r"const\s+([A-Z][A-Za-z0-9_]+)\s*=\s*\(",
    ]
    .map(|pattern| Regex::new(pattern).expect("valid regex"))
});

/// Extracts every fenced block of `text`, in order of appearance.
pub fn extract_snippets(text: &str) -> Vec<CodeSnippet> {
    FENCED_BLOCK
        .captures_iter(text)
        .map(|caps| {
            let language = caps
                .get(1)
                .map(|m| m.as_str().trim())
                .filter(|tag| !tag.is_empty())
                .unwrap_or(PLAIN_TEXT_TAG)
                .to_string();
            let code = caps.get(2).map(|m| m.as_str()).unwrap_or_default().to_string();
            let file_name = infer_file_name(&code, &language);
            CodeSnippet {
                code,
                language,
                file_name,
            }
        })
        .collect()
}

/// Guesses a file name for a block.
///
/// Order: a filename comment, then (for `jsx`/`tsx`) a capitalised component
/// declaration, then `code.<language>` unless the tag is `text`.
pub fn infer_file_name(code: &str, language: &str) -> Option<String> {
    if let Some(name) = first_capture(FILE_NAME_COMMENTS.iter(), code) {
        return Some(name);
    }
    if Language::is_markup_component(language) {
        if let Some(component) = first_capture(COMPONENT_DECLARATIONS.iter(), code) {
            return Some(format!("{component}.{language}"));
        }
    }
    if !language.is_empty() && language != PLAIN_TEXT_TAG {
        return Some(format!("code.{language}"));
    }
    None
}

fn first_capture<'r>(patterns: impl Iterator<Item = &'r Regex>, code: &str) -> Option<String> {
    patterns
        .filter_map(|pattern| pattern.captures(code))
        .find_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
}
