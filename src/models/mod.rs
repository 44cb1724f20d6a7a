pub mod config;
pub mod data;
pub mod rules;

pub use config::{ExtractorConfig, OcrConfig};
pub use data::{DocumentType, ExtractedFields, ExtractionResult, Field};
pub use rules::{DocumentRule, DocumentRules, ValidityRule};
