// Command-line front end: OCR text (or an image) in, extraction JSON out.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use idextract::models::ExtractorConfig;
use idextract::{DocumentError, DocumentExtractor, ExtractionResult};

/// Extract document number, names and dates from identity-document OCR text
#[derive(Parser)]
#[command(name = "idextract")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Document type: pan (or pan_card) or passport
    #[arg(short = 't', long = "type")]
    document_type: String,

    /// File holding OCR text; stdin is read when neither --text nor --image is given
    #[arg(long, conflicts_with = "image")]
    text: Option<PathBuf>,

    /// Document image to run through OCR first (requires the `ocr` feature)
    #[arg(long)]
    image: Option<PathBuf>,

    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON result
    #[arg(long)]
    pretty: bool,

    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("Document processing failed: {}", err);
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // RUST_LOG still wins when set
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: &Cli) -> Result<String, DocumentError> {
    let config = match &cli.config {
        Some(path) => ExtractorConfig::from_file(path)?,
        None => ExtractorConfig::default(),
    };
    let extractor = DocumentExtractor::with_config(config);

    let result = match (&cli.image, &cli.text) {
        (Some(image), _) => extract_image(&extractor, image, &cli.document_type)?,
        (None, Some(path)) => extractor.extract_bytes(&std::fs::read(path)?, &cli.document_type)?,
        (None, None) => {
            let mut raw = Vec::new();
            std::io::stdin().read_to_end(&mut raw)?;
            extractor.extract_bytes(&raw, &cli.document_type)?
        }
    };

    render(&result, cli.pretty)
}

#[cfg(feature = "ocr")]
fn extract_image(
    extractor: &DocumentExtractor,
    path: &Path,
    document_type: &str,
) -> Result<ExtractionResult, DocumentError> {
    use idextract::processing::TesseractOcr;

    let bytes = std::fs::read(path)?;
    let ocr = TesseractOcr::new(&extractor.config().ocr);
    extractor.extract_image(&bytes, document_type, &ocr)
}

#[cfg(not(feature = "ocr"))]
fn extract_image(
    _extractor: &DocumentExtractor,
    path: &Path,
    _document_type: &str,
) -> Result<ExtractionResult, DocumentError> {
    Err(DocumentError::Processing(format!(
        "Cannot read {}: built without the `ocr` feature",
        path.display()
    )))
}

fn render(result: &ExtractionResult, pretty: bool) -> Result<String, DocumentError> {
    let json = if pretty {
        serde_json::to_string_pretty(result)
    } else {
        serde_json::to_string(result)
    };
    json.map_err(|e| DocumentError::Processing(format!("Failed to serialize result: {}", e)))
}
