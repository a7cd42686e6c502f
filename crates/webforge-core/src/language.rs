//! Language tags attached to files in the virtual tree.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Declared language of a file node.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    Js,
    Jsx,
    Ts,
    Tsx,
    Css,
    Scss,
    Html,
    Json,
    Markdown,
    Text,
}

impl Language {
    /// Maps a bare extension (without the dot) to a language.
    ///
    /// Unknown extensions map to [`Language::Text`].
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_lowercase().as_str() {
            "js" => Self::Js,
            "jsx" => Self::Jsx,
            "ts" => Self::Ts,
            "tsx" => Self::Tsx,
            "css" => Self::Css,
            "scss" => Self::Scss,
            "html" => Self::Html,
            "json" => Self::Json,
            "md" => Self::Markdown,
            _ => Self::Text,
        }
    }

    /// Infers the language from the text after the last `.` of a file name.
    ///
    /// A name without a dot is treated as its own extension, so `Makefile`
    /// becomes `Text` and `json` becomes `Json`.
    pub fn for_file_name(name: &str) -> Self {
        Self::from_extension(extension_of(name))
    }

    /// Language used by the editor for the active file.
    ///
    /// The editor treats anything it does not recognise as JSX, including
    /// the case where no file is open.
    pub fn for_editor(active_file: Option<&str>) -> Self {
        match active_file.map(Self::for_file_name) {
            Some(Self::Text) | None => Self::Jsx,
            Some(language) => language,
        }
    }

    /// Whether component-name inference applies to this language tag.
    pub fn is_markup_component(tag: &str) -> bool {
        tag == "jsx" || tag == "tsx"
    }
}

/// Returns the text after the last `.` in `name`, or `name` itself.
pub fn extension_of(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}
