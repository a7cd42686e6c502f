//! Secret management service trait.

use crate::config::SecretConfig;
use crate::error::Result;

/// Source of the API credentials.
///
/// Implementations must never log the key or put it into error messages.
#[async_trait::async_trait]
pub trait SecretService: Send + Sync {
    /// Loads the secret configuration. A missing file yields the default
    /// (credential-less) configuration.
    async fn load_secrets(&self) -> Result<SecretConfig>;

    /// Checks if the secret file exists.
    async fn secret_file_exists(&self) -> bool;
}
