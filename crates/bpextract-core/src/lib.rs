pub mod config;
pub mod error;
pub mod export;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod status;

use config::schema::ExtractionConfig;
use error::BpError;
use extraction::PdfExtractor;
use model::Extraction;
use parsing::RecordParser;
use status::{ProcessingState, ProcessingStatus};
use std::path::Path;
use tracing::info;

/// Extract readings from PDF bytes.
///
/// Walks the pages produced by `extractor` and applies the configured
/// pattern, date formats and validation bounds to every line. The status
/// clock starts before text extraction unless the caller already started it.
pub fn extract_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    config: &ExtractionConfig,
    status: &mut ProcessingStatus,
) -> Result<Extraction, BpError> {
    let parser = RecordParser::new(config)?;
    if status.state() != ProcessingState::Processing {
        status.begin();
    }
    let pages = extractor.extract_pages(pdf_bytes)?;
    info!(
        "Extracted {} page(s) with {}",
        pages.len(),
        extractor.backend_name()
    );
    Ok(extraction::walker::walk_pages(
        &pages,
        &parser,
        config.skip_first_page,
        status,
    ))
}

/// Main API entry point: convert a report PDF into a CSV file.
///
/// The status is marked completed on success and failed (with the error
/// message) otherwise.
pub fn convert_file(
    input: &Path,
    output: &Path,
    extractor: &dyn PdfExtractor,
    config: &ExtractionConfig,
    status: &mut ProcessingStatus,
) -> Result<Extraction, BpError> {
    status.begin();
    match run_conversion(input, output, extractor, config, status) {
        Ok(extraction) => {
            status.complete();
            Ok(extraction)
        }
        Err(e) => {
            status.fail(e.to_string());
            Err(e)
        }
    }
}

fn run_conversion(
    input: &Path,
    output: &Path,
    extractor: &dyn PdfExtractor,
    config: &ExtractionConfig,
    status: &mut ProcessingStatus,
) -> Result<Extraction, BpError> {
    config::validate_config(config)?;
    let delimiter = config
        .delimiter_byte()
        .ok_or_else(|| BpError::ConfigInvalid("csv_delimiter must be one ASCII character".into()))?;

    let pdf_bytes = read_input(input)?;
    extraction::check_pdf_magic(input, &pdf_bytes)?;

    let extraction = extract_pdf(&pdf_bytes, extractor, config, status).map_err(|e| match e {
        BpError::PdftotextFailed { stderr, .. } => {
            BpError::CorruptPdf {
                path: input.to_path_buf(),
                detail: stderr,
            }
        }
        other => other,
    })?;

    export::write_csv(output, &config.csv_headers, delimiter, &extraction.readings)?;
    info!(
        "Wrote {} reading(s) to {}",
        extraction.readings.len(),
        output.display()
    );

    Ok(extraction)
}

fn read_input(input: &Path) -> Result<Vec<u8>, BpError> {
    if !input.is_file() {
        return Err(BpError::InputNotFound {
            path: input.to_path_buf(),
        });
    }
    std::fs::read(input).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => BpError::InputNotFound {
            path: input.to_path_buf(),
        },
        _ => BpError::Io(e),
    })
}
