pub mod config_service;
pub mod file_document_host;
pub mod paths;
pub mod secret_service;

pub use crate::config_service::ConfigService;
pub use crate::file_document_host::TempFileDocumentHost;
pub use crate::paths::WebforgePaths;
pub use crate::secret_service::SecretServiceImpl;
