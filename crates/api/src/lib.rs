pub mod error;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use error::{ApiError, ApiResult};
pub use models::*;
pub use services::{HostDocument, JavaMapperParser, MapperXmlService, TextSource, WorkspaceResolver};
