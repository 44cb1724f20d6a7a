pub mod expiry;
pub mod format;
pub mod policy;

pub use expiry::ExpiryValidator;
pub use format::FormatValidator;
pub use policy::{PolicyValidator, ValidationIssue, ValidationOutcome};
