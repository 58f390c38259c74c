use crate::error::BpError;
use crate::model::Reading;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Write a header row and one row per reading to `writer`.
///
/// Rows end in CRLF.
pub fn write_readings<W: Write>(
    writer: W,
    headers: &[String],
    delimiter: u8,
    readings: &[Reading],
) -> io::Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    csv_writer.write_record(headers).map_err(io::Error::from)?;
    for reading in readings {
        csv_writer
            .write_record(reading.to_record())
            .map_err(io::Error::from)?;
    }

    // Surface flush errors instead of losing them on drop.
    csv_writer.flush()
}

/// Write readings to a CSV file, creating its directory if needed.
pub fn write_csv(
    path: &Path,
    headers: &[String],
    delimiter: u8,
    readings: &[Reading],
) -> Result<(), BpError> {
    let write_err = |source| BpError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    let file = File::create(path).map_err(write_err)?;
    write_readings(file, headers, delimiter, readings).map_err(write_err)
}
