//! Error types for the Webforge workbench.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire workbench.
///
/// Only `MissingCredential`, `Transport` and `Api` are ever surfaced to the
/// user during a chat exchange. Structural misses in the file tree and
/// malformed generated content degrade silently and never produce a
/// `ForgeError`.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForgeError {
    /// No API key is configured; raised before any network call.
    #[error("{0}")]
    MissingCredential(String),

    /// The request never produced an HTTP response.
    #[error("{0}")]
    Transport(String),

    /// The API answered with a non-success status.
    #[error("API Error: {message}")]
    Api { status: u16, message: String },

    /// A chat exchange is already in flight.
    #[error("A request is already in progress")]
    ExchangeInFlight,

    /// The user submitted blank input.
    #[error("Input is empty")]
    EmptyInput,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },
}

impl ForgeError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a MissingCredential error
    pub fn missing_credential(message: impl Into<String>) -> Self {
        Self::MissingCredential(message.into())
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates an Api error
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a MissingCredential error
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, Self::MissingCredential(_))
    }

    /// Check if this error came from the outbound request (transport or status)
    pub fn is_transport_or_api(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Api { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Whether this error must be shown to the user as a banner and chat entry.
    pub fn is_user_facing(&self) -> bool {
        self.is_missing_credential() || self.is_transport_or_api()
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ForgeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ForgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ForgeError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ForgeError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ForgeError>`.
pub type Result<T> = std::result::Result<T, ForgeError>;
