use bpextract_core::config::ConfigManager;
use bpextract_core::error::BpError;
use bpextract_core::extraction::pdftotext::PdftotextExtractor;
use bpextract_core::status::ProcessingStatus;
use std::path::PathBuf;

use crate::output::progress::BarObserver;

pub struct ExtractArgs {
    pub input_pdf: PathBuf,
    pub output_csv: PathBuf,
    pub config: Option<PathBuf>,
    pub show_status: bool,
    pub no_progress: bool,
    pub include_first_page: bool,
}

pub fn run(args: ExtractArgs) -> Result<(), BpError> {
    let mut config = ConfigManager::new(args.config.as_deref()).load()?;
    if args.include_first_page {
        config.skip_first_page = false;
    }

    let mut status = if config.progress_bar && !args.no_progress {
        ProcessingStatus::with_observer(Box::new(BarObserver::new()))
    } else {
        ProcessingStatus::new()
    };

    let extractor = PdftotextExtractor::new();
    let result = bpextract_core::convert_file(
        &args.input_pdf,
        &args.output_csv,
        &extractor,
        &config,
        &mut status,
    );

    if let Ok(extraction) = &result {
        eprintln!(
            "CSV file saved successfully: {} ({} reading(s))",
            args.output_csv.display(),
            extraction.readings.len()
        );
        if !extraction.skipped_lines.is_empty() {
            eprintln!(
                "  {} line(s) skipped during parsing",
                extraction.skipped_lines.len()
            );
        }
    }

    // The report is printed for failed runs too
    if args.show_status {
        println!("\nFinal Status Report:");
        println!("{}", status.report());
    }

    result.map(|_| ())
}
