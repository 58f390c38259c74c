use serde::{Deserialize, Serialize};
use std::fmt;

/// One validated blood-pressure reading extracted from a report line.
///
/// `timestamp` is already rendered in the configured output date format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    pub timestamp: String,
    pub systolic: u32,
    pub diastolic: u32,
    pub heart_rate: u32,
}

impl Reading {
    /// Row cells in CSV column order.
    pub fn to_record(&self) -> [String; 4] {
        [
            self.timestamp.clone(),
            self.systolic.to_string(),
            self.diastolic.to_string(),
            self.heart_rate.to_string(),
        ]
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}/{} mmHg, {} bpm",
            self.timestamp, self.systolic, self.diastolic, self.heart_rate
        )
    }
}

/// Physiological field checked against validation bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Systolic,
    Diastolic,
    HeartRate,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Systolic => write!(f, "systolic"),
            Field::Diastolic => write!(f, "diastolic"),
            Field::HeartRate => write!(f, "heart rate"),
        }
    }
}

/// A line that matched the extraction pattern but was dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedLine {
    pub page_number: usize,
    pub line: String,
    pub reason: String,
}

/// Result of walking every page of a report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Extraction {
    pub readings: Vec<Reading>,
    pub skipped_lines: Vec<SkippedLine>,
    pub pages_processed: usize,
}
