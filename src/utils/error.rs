use thiserror::Error;

/// Errors that reach the caller of the extraction engine.
///
/// Per-field misses (a date that does not parse, a pattern that never
/// matches) are not errors; they show up as absent or empty fields.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Unsupported document type: {0}")]
    UnsupportedDocumentType(String),

    #[error("Failed to process document: {0}")]
    Processing(String),

    #[error("Image processing error: {0}")]
    ImageProcessing(String),

    #[error("OCR error: {0}")]
    Ocr(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DocumentError>;
