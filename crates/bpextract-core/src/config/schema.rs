use crate::model::Field;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_INPUT_DATE_FORMAT: &str = "%d %B, %y %H:%M";
pub const DEFAULT_OUTPUT_DATE_FORMAT: &str = "%m/%d/%y %H:%M";
pub const DEFAULT_BP_DATA_PATTERN: &str =
    r"(\d{1,2}\s\w+,\s\d{2})\s(\d{2}:\d{2})\s+(\d+)\s+(\d+)\s+(\d+)";
pub const DEFAULT_CSV_HEADERS: [&str; 4] = ["Date/Time", "Systolic", "Diastolic", "Pulse"];

/// Settings for one extraction run.
///
/// Every field may be omitted from a config file and falls back to its
/// default. Set `validation` to `null` to turn range checks off. Files may
/// also carry the flat `min_systolic` .. `max_heart_rate` keys; see
/// [`ConfigFile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ConfigFile")]
pub struct ExtractionConfig {
    /// strftime format of the report's `date time` text.
    pub input_date_format: String,
    /// strftime format written to the CSV timestamp column.
    pub output_date_format: String,
    /// Regex with five capture groups: date, time, systolic, diastolic, heart rate.
    pub bp_data_pattern: String,
    pub csv_headers: Vec<String>,
    pub csv_delimiter: String,
    /// The first page of the report is a summary and holds no readings.
    pub skip_first_page: bool,
    pub progress_bar: bool,
    pub validation: Option<ValidationBounds>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        ExtractionConfig {
            input_date_format: DEFAULT_INPUT_DATE_FORMAT.into(),
            output_date_format: DEFAULT_OUTPUT_DATE_FORMAT.into(),
            bp_data_pattern: DEFAULT_BP_DATA_PATTERN.into(),
            csv_headers: DEFAULT_CSV_HEADERS.iter().map(|h| h.to_string()).collect(),
            csv_delimiter: ",".into(),
            skip_first_page: true,
            progress_bar: true,
            validation: Some(ValidationBounds::default()),
        }
    }
}

/// On-disk shape of [`ExtractionConfig`].
///
/// Accepts both the nested `validation` map and the six flat bound keys
/// written by older versions of the tool. Flat keys override the matching
/// nested value; any flat key turns range checks on even when `validation`
/// is `null`.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    input_date_format: String,
    output_date_format: String,
    bp_data_pattern: String,
    csv_headers: Vec<String>,
    csv_delimiter: String,
    skip_first_page: bool,
    progress_bar: bool,
    validation: Option<ValidationBounds>,
    min_systolic: Option<u32>,
    max_systolic: Option<u32>,
    min_diastolic: Option<u32>,
    max_diastolic: Option<u32>,
    min_heart_rate: Option<u32>,
    max_heart_rate: Option<u32>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        let config = ExtractionConfig::default();
        ConfigFile {
            input_date_format: config.input_date_format,
            output_date_format: config.output_date_format,
            bp_data_pattern: config.bp_data_pattern,
            csv_headers: config.csv_headers,
            csv_delimiter: config.csv_delimiter,
            skip_first_page: config.skip_first_page,
            progress_bar: config.progress_bar,
            validation: config.validation,
            min_systolic: None,
            max_systolic: None,
            min_diastolic: None,
            max_diastolic: None,
            min_heart_rate: None,
            max_heart_rate: None,
        }
    }
}

impl ConfigFile {
    fn has_flat_bounds(&self) -> bool {
        [
            self.min_systolic,
            self.max_systolic,
            self.min_diastolic,
            self.max_diastolic,
            self.min_heart_rate,
            self.max_heart_rate,
        ]
        .iter()
        .any(Option::is_some)
    }
}

impl From<ConfigFile> for ExtractionConfig {
    fn from(file: ConfigFile) -> Self {
        let validation = if file.has_flat_bounds() {
            let mut bounds = file.validation.unwrap_or_default();
            for (range, min, max) in [
                (&mut bounds.systolic, file.min_systolic, file.max_systolic),
                (&mut bounds.diastolic, file.min_diastolic, file.max_diastolic),
                (&mut bounds.heart_rate, file.min_heart_rate, file.max_heart_rate),
            ] {
                if let Some(min) = min {
                    range.min = min;
                }
                if let Some(max) = max {
                    range.max = max;
                }
            }
            Some(bounds)
        } else {
            file.validation
        };

        ExtractionConfig {
            input_date_format: file.input_date_format,
            output_date_format: file.output_date_format,
            bp_data_pattern: file.bp_data_pattern,
            csv_headers: file.csv_headers,
            csv_delimiter: file.csv_delimiter,
            skip_first_page: file.skip_first_page,
            progress_bar: file.progress_bar,
            validation,
        }
    }
}

impl ExtractionConfig {
    /// The delimiter as a byte, if it is a single ASCII character.
    pub fn delimiter_byte(&self) -> Option<u8> {
        match self.csv_delimiter.as_bytes() {
            [b] if b.is_ascii() => Some(*b),
            _ => None,
        }
    }
}

/// Inclusive `[min, max]` range for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub min: u32,
    pub max: u32,
}

impl Range {
    pub const fn new(min: u32, max: u32) -> Self {
        Range { min, max }
    }

    pub fn contains(&self, value: u32) -> bool {
        self.min <= value && value <= self.max
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Plausibility limits for systolic, diastolic and heart-rate values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationBounds {
    pub systolic: Range,
    pub diastolic: Range,
    pub heart_rate: Range,
}

impl Default for ValidationBounds {
    fn default() -> Self {
        ValidationBounds {
            systolic: Range::new(50, 300),
            diastolic: Range::new(30, 200),
            heart_rate: Range::new(30, 250),
        }
    }
}

/// A value that fell outside its configured range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundsViolation {
    pub field: Field,
    pub value: u32,
    pub range: Range,
}

impl fmt::Display for BoundsViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} outside valid range {}",
            self.field, self.value, self.range
        )
    }
}

impl ValidationBounds {
    /// Check the three values in field order, reporting the first violation.
    pub fn check(
        &self,
        systolic: u32,
        diastolic: u32,
        heart_rate: u32,
    ) -> Result<(), BoundsViolation> {
        let checks = [
            (Field::Systolic, systolic, self.systolic),
            (Field::Diastolic, diastolic, self.diastolic),
            (Field::HeartRate, heart_rate, self.heart_rate),
        ];
        for (field, value, range) in checks {
            if !range.contains(value) {
                return Err(BoundsViolation {
                    field,
                    value,
                    range,
                });
            }
        }
        Ok(())
    }

    pub(crate) fn ranges(&self) -> [(Field, Range); 3] {
        [
            (Field::Systolic, self.systolic),
            (Field::Diastolic, self.diastolic),
            (Field::HeartRate, self.heart_rate),
        ]
    }
}
