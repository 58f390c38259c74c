use crate::extraction::PageContent;
use crate::model::{Extraction, SkippedLine};
use crate::parsing::{LineOutcome, RecordParser};
use crate::status::ProcessingStatus;
use tracing::{debug, warn};

/// Feed every line of every page to `parser`, collecting readings in
/// document order.
///
/// Lines that match but fail date parsing or validation are logged and
/// recorded in `skipped_lines`; they never stop the walk.
pub fn walk_pages(
    pages: &[PageContent],
    parser: &RecordParser,
    skip_first_page: bool,
    status: &mut ProcessingStatus,
) -> Extraction {
    let skip = usize::from(skip_first_page && !pages.is_empty());
    let selected = &pages[skip..];
    status.set_total_pages(selected.len());

    let mut extraction = Extraction::default();

    for (done, page) in selected.iter().enumerate() {
        let before = extraction.readings.len();

        for line in &page.lines {
            match parser.parse_line(line) {
                LineOutcome::NoMatch => {}
                LineOutcome::Reading(reading) => extraction.readings.push(reading),
                LineOutcome::Skipped(reason) => {
                    warn!(
                        "Page {}: skipping line '{}': {}",
                        page.page_number,
                        line.trim(),
                        reason
                    );
                    extraction.skipped_lines.push(SkippedLine {
                        page_number: page.page_number,
                        line: line.trim().to_string(),
                        reason: reason.to_string(),
                    });
                }
            }
        }

        debug!(
            "Page {}: {} reading(s)",
            page.page_number,
            extraction.readings.len() - before
        );
        extraction.pages_processed = done + 1;
        status.update(done + 1, extraction.readings.len());
    }

    extraction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ExtractionConfig;

    fn parser() -> RecordParser {
        RecordParser::new(&ExtractionConfig::default()).unwrap()
    }

    fn page(number: usize, lines: &[&str]) -> PageContent {
        PageContent {
            page_number: number,
            lines: lines.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_first_page_skipped() {
        let pages = vec![
            page(1, &["Summary", "25 June, 25 09:00 118 77 60"]),
            page(2, &["25 June, 25 14:30 120 80 65"]),
        ];
        let mut status = ProcessingStatus::new();
        let out = walk_pages(&pages, &parser(), true, &mut status);

        assert_eq!(out.readings.len(), 1);
        assert_eq!(out.readings[0].timestamp, "06/25/25 14:30");
        assert_eq!(out.pages_processed, 1);
        assert_eq!(status.total_pages(), 1);
        assert_eq!(status.current_page(), 1);
    }

    #[test]
    fn test_first_page_included_when_configured() {
        let pages = vec![
            page(1, &["25 June, 25 09:00 118 77 60"]),
            page(2, &["25 June, 25 14:30 120 80 65"]),
        ];
        let mut status = ProcessingStatus::new();
        let out = walk_pages(&pages, &parser(), false, &mut status);
        assert_eq!(out.readings.len(), 2);
        assert_eq!(out.readings[0].timestamp, "06/25/25 09:00");
        assert_eq!(status.records_found(), 2);
    }

    #[test]
    fn test_order_preserved_and_bad_lines_recorded() {
        let pages = vec![
            page(1, &["cover"]),
            page(
                2,
                &[
                    "Date Time SBP DBP HR",
                    "26 June, 25 07:00 130 85 70",
                    "26 June, 25 12:00 120 80 10",
                ],
            ),
            page(3, &["27 Jume, 25 07:00 125 82 66", "27 June, 25 19:45 119 79 61"]),
        ];
        let mut status = ProcessingStatus::new();
        let out = walk_pages(&pages, &parser(), true, &mut status);

        let stamps: Vec<&str> = out.readings.iter().map(|r| r.timestamp.as_str()).collect();
        assert_eq!(stamps, vec!["06/26/25 07:00", "06/27/25 19:45"]);
        assert_eq!(out.skipped_lines.len(), 2);
        assert_eq!(out.skipped_lines[0].page_number, 2);
        assert_eq!(out.skipped_lines[1].page_number, 3);
        assert_eq!(status.current_page(), 2);
    }

    #[test]
    fn test_empty_document() {
        let mut status = ProcessingStatus::new();
        let out = walk_pages(&[], &parser(), true, &mut status);
        assert!(out.readings.is_empty());
        assert_eq!(status.total_pages(), 0);
    }
}
