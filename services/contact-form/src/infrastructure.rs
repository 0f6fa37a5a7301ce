// Infrastructure layer modules
pub mod config;
pub mod logging;
pub mod submission_repository;

// Re-exports
pub use config::{ConfigurationError, FormTableConfig};
pub use logging::init_logging;
pub use submission_repository::{DynamoSubmissionRepository, RepositoryError, SubmissionRepository};
