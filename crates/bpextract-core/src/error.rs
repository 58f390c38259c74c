use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum BpError {
    #[error("input file '{}' does not exist", path.display())]
    InputNotFound { path: PathBuf },

    #[error("'{}' is not a valid PDF file (first bytes: {magic:?})", path.display())]
    NotAPdf { path: PathBuf, magic: Vec<u8> },

    #[error("'{}' is not a valid PDF file: {detail}", path.display())]
    CorruptPdf { path: PathBuf, detail: String },

    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("failed to write '{}': {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load configuration from {}: {reason}", path.display())]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("unsupported configuration file format '{extension}' (expected .yaml, .yml or .json)")]
    UnsupportedConfigFormat { extension: String },

    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl BpError {
    /// Process exit status for this error. Each failure family gets its own code.
    pub fn exit_code(&self) -> i32 {
        match self {
            BpError::InputNotFound { .. } | BpError::NotAPdf { .. } => 2,
            BpError::CorruptPdf { .. }
            | BpError::Extraction(_)
            | BpError::PdftotextNotFound
            | BpError::PdftotextFailed { .. } => 3,
            BpError::OutputWrite { .. } => 4,
            BpError::ConfigLoad { .. }
            | BpError::UnsupportedConfigFormat { .. }
            | BpError::ConfigInvalid(_)
            | BpError::Pattern(_) => 5,
            BpError::Io(_) | BpError::Json(_) | BpError::Yaml(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_per_family() {
        let input = BpError::InputNotFound {
            path: PathBuf::from("a.pdf"),
        };
        let corrupt = BpError::CorruptPdf {
            path: PathBuf::from("a.pdf"),
            detail: "bad xref".into(),
        };
        let output = BpError::OutputWrite {
            path: PathBuf::from("out.csv"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        let config = BpError::ConfigInvalid("bad".into());

        let codes = [
            input.exit_code(),
            corrupt.exit_code(),
            output.exit_code(),
            config.exit_code(),
        ];
        assert_eq!(codes, [2, 3, 4, 5]);
    }

    #[test]
    fn test_input_not_found_message() {
        let e = BpError::InputNotFound {
            path: PathBuf::from("missing.pdf"),
        };
        assert_eq!(e.to_string(), "input file 'missing.pdf' does not exist");
    }
}
