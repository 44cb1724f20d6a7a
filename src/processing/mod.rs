pub mod dates;
pub mod events;
pub mod extractors;
#[cfg(feature = "ocr")]
pub mod image;
#[cfg(feature = "ocr")]
pub mod ocr;
pub mod patterns;

pub use dates::{DateCandidate, DateParser, DateRole, ExtractedDates};
pub use events::{ExtractionEvent, ExtractionObserver, LogObserver, NoopObserver};
pub use extractors::{NameMatch, NameSource};
#[cfg(feature = "ocr")]
pub use self::image::ImageProcessor;
#[cfg(feature = "ocr")]
pub use ocr::{OcrEngine, TesseractOcr};
