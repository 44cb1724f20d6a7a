pub mod document_extractor;
pub mod models;
pub mod processing;
pub mod utils;
pub mod validation;

pub use document_extractor::DocumentExtractor;
pub use models::{DocumentType, ExtractionResult};
pub use utils::{DocumentError, Result};
