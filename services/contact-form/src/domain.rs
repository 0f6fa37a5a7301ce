// Domain layer modules
pub mod field_policy;
pub mod submission;

// Re-exports
pub use field_policy::{FieldPolicy, FieldTypeError, UnknownFieldPolicy};
pub use submission::{Submission, SubmissionFields, SENTINEL};
