//! Live preview generation.
//!
//! A buffer holding a single React-style component is turned into a complete
//! HTML document by plain textual rewrites. There is no parser here: imports,
//! the root render call and the default export are matched with fixed
//! patterns, and anything that does not match is left as is. The JSX itself
//! is compiled inside the sandboxed frame by Babel standalone, loaded from a
//! CDN together with React.
//!
//! Malformed input is never reported. A buffer without `export default X;`
//! simply produces a document whose bootstrap fails inside the frame.

mod pane;
mod stylesheet;

pub use pane::{DocumentHandle, DocumentHost, InMemoryDocumentHost, PreviewPane};
pub use stylesheet::StylesheetTable;

use once_cell::sync::Lazy;
use regex::Regex;

/// `sandbox` attribute for the frame that renders generated documents.
pub const SANDBOX_POLICY: &str = "allow-scripts allow-same-origin";

/// External scripts the generated document loads, in order.
pub const RUNTIME_SCRIPTS: [&str; 3] = [
    "https://unpkg.com/react@18/umd/react.development.js",
    "https://unpkg.com/react-dom@18/umd/react-dom.development.js",
    "https://unpkg.com/@babel/standalone/babel.min.js",
];

static STYLESHEET_IMPORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"import ['"]\./(.*\.css)['"];"#).expect("valid regex"));

/// Import lines removed before the script is embedded, applied in order.
static STRIPPED_IMPORTS: Lazy<[Regex; 4]> = Lazy::new(|| {
    [
        r#"import React from ["']react["'];\n?"#,
        r#"import ReactDOM from ["']react-dom["'];\n?"#,
        r#"import ["']\./(.*\.css)["'];\n?"#,
        r#"import App from ["']\./(App|\./App)["'];\n?"#,
    ]
    .map(|pattern| Regex::new(pattern).expect("valid regex"))
});

// Greedy across lines: swallows everything between the first createRoot and
// the last `);` that follows a `.render(`.
static ROOT_RENDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)ReactDOM\.createRoot\(.*\)\.render\(.*\);").expect("valid regex")
});

static DEFAULT_EXPORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"export default ([A-Za-z0-9_]+);").expect("valid regex"));

/// Result of the textual rewrite, before it is wrapped into a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformedSource {
    /// Script text to embed in the `text/babel` block.
    pub script: String,
    /// Inlined style text, when the imported stylesheet is a known one.
    pub styles: Option<String>,
    /// Whether a `const App = ...;` alias was produced.
    pub has_component_alias: bool,
}

/// Turns component source into standalone preview documents.
#[derive(Debug, Clone, Default)]
pub struct PreviewGenerator {
    stylesheets: StylesheetTable,
}

impl PreviewGenerator {
    pub fn new(stylesheets: StylesheetTable) -> Self {
        Self { stylesheets }
    }

    pub fn stylesheets(&self) -> &StylesheetTable {
        &self.stylesheets
    }

    /// Applies the import, render and export rewrites to `source`.
    pub fn transform(&self, source: &str) -> TransformedSource {
        let styles = STYLESHEET_IMPORT
            .captures(source)
            .and_then(|caps| caps.get(1))
            .and_then(|name| self.stylesheets.lookup(name.as_str()))
            .map(str::to_string);

        let mut script = source.to_string();
        for pattern in STRIPPED_IMPORTS.iter() {
            script = pattern.replace_all(&script, "").into_owned();
        }
        script = ROOT_RENDER.replace_all(&script, "").into_owned();

        let has_component_alias = DEFAULT_EXPORT.is_match(&script);
        script = DEFAULT_EXPORT
            .replace(&script, "const App = ${1};")
            .into_owned();

        TransformedSource {
            script,
            styles,
            has_component_alias,
        }
    }

    /// Generates the complete HTML document for `source`.
    ///
    /// Output depends only on `source` and the stylesheet table.
    pub fn generate(&self, source: &str) -> String {
        let transformed = self.transform(source);
        if !transformed.has_component_alias {
            tracing::debug!("[Preview] No default export found, preview will not mount");
        }
        render_document(&transformed)
    }
}

/// Generates a document with the default stylesheet table.
pub fn generate_document(source: &str) -> String {
    PreviewGenerator::default().generate(source)
}

fn render_document(transformed: &TransformedSource) -> String {
    let scripts: String = RUNTIME_SCRIPTS
        .iter()
        .map(|src| format!("  <script src=\"{src}\"></script>\n"))
        .collect();
    let style_block = transformed
        .styles
        .as_deref()
        .map(|css| format!("  <style>\n    {css}\n  </style>\n"))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="ru">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Предпросмотр</title>
{scripts}{style_block}</head>
<body>
  <div id="root"></div>
  <script type="text/babel">
    {script}

    ReactDOM.createRoot(document.getElementById('root')).render(
      <React.StrictMode>
        <App />
      </React.StrictMode>
    );
  </script>
</body>
</html>
"#,
        script = transformed.script,
    )
}
