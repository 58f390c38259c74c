pub mod dates;
pub mod pattern;

use crate::config::schema::{BoundsViolation, ExtractionConfig, ValidationBounds};
use crate::error::BpError;
use crate::model::{Field, Reading};
use pattern::{compile_pattern, GroupLayout};
use regex::Regex;

/// Why a matching line was dropped instead of becoming a reading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("could not parse date '{text}' with format '{format}'")]
    InvalidDate { text: String, format: String },

    #[error("{field} value '{text}' is not a valid integer")]
    InvalidNumber { field: Field, text: String },

    #[error("{0}")]
    OutOfRange(BoundsViolation),

    #[error("timestamp cannot be rendered with output format '{format}'")]
    Unrenderable { format: String },
}

/// Outcome of feeding one line to the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Not a reading line. Headers, footers, prose.
    NoMatch,
    Reading(Reading),
    Skipped(SkipReason),
}

/// Turns report lines into readings using a configured pattern.
#[derive(Debug, Clone)]
pub struct RecordParser {
    pattern: Regex,
    layout: GroupLayout,
    input_date_format: String,
    output_date_format: String,
    bounds: Option<ValidationBounds>,
}

impl RecordParser {
    pub fn new(config: &ExtractionConfig) -> Result<Self, BpError> {
        let (pattern, layout) = compile_pattern(&config.bp_data_pattern)?;
        Ok(RecordParser {
            pattern,
            layout,
            input_date_format: config.input_date_format.clone(),
            output_date_format: config.output_date_format.clone(),
            bounds: config.validation,
        })
    }

    /// Try to parse a single line as a reading.
    ///
    /// Whitespace runs are collapsed to single spaces first, since
    /// layout-preserving text extraction pads table columns. The pattern
    /// must then match at the start of the line.
    pub fn parse_line(&self, line: &str) -> LineOutcome {
        let line = normalize_ws(line);
        let caps = match self.pattern.captures(&line) {
            Some(c) if c.get(0).map(|m| m.start()) == Some(0) => c,
            _ => return LineOutcome::NoMatch,
        };
        let Some([date, time, sys, dia, hr]) = self.layout.fields(&caps) else {
            return LineOutcome::NoMatch;
        };

        match self.build_reading(date, time, sys, dia, hr) {
            Ok(reading) => LineOutcome::Reading(reading),
            Err(reason) => LineOutcome::Skipped(reason),
        }
    }

    fn build_reading(
        &self,
        date: &str,
        time: &str,
        sys: &str,
        dia: &str,
        hr: &str,
    ) -> Result<Reading, SkipReason> {
        let ts = dates::parse_timestamp(date, time, &self.input_date_format).ok_or_else(|| {
            SkipReason::InvalidDate {
                text: format!("{} {}", date.trim(), time.trim()),
                format: self.input_date_format.clone(),
            }
        })?;

        let systolic = parse_int(Field::Systolic, sys)?;
        let diastolic = parse_int(Field::Diastolic, dia)?;
        let heart_rate = parse_int(Field::HeartRate, hr)?;

        if let Some(bounds) = &self.bounds {
            bounds
                .check(systolic, diastolic, heart_rate)
                .map_err(SkipReason::OutOfRange)?;
        }

        let timestamp = dates::format_timestamp(&ts, &self.output_date_format).ok_or_else(|| {
            SkipReason::Unrenderable {
                format: self.output_date_format.clone(),
            }
        })?;

        Ok(Reading {
            timestamp,
            systolic,
            diastolic,
            heart_rate,
        })
    }
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_int(field: Field, s: &str) -> Result<u32, SkipReason> {
    let s = s.trim();
    s.parse().map_err(|_| SkipReason::InvalidNumber {
        field,
        text: s.to_string(),
    })
}
