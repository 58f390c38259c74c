pub mod pdftotext;
pub mod walker;

use crate::error::BpError;
use std::path::Path;

/// Content extracted from a single page of a PDF.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    /// 1-based.
    pub page_number: usize,
    pub lines: Vec<String>,
}

impl PageContent {
    pub fn from_text(page_number: usize, text: &str) -> Self {
        PageContent {
            page_number,
            lines: text.lines().map(|l| l.to_string()).collect(),
        }
    }
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text content from PDF bytes, returning one PageContent per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, BpError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Reject input that does not carry the `%PDF` signature.
pub fn check_pdf_magic(path: &Path, bytes: &[u8]) -> Result<(), BpError> {
    if bytes.starts_with(b"%PDF") {
        return Ok(());
    }
    Err(BpError::NotAPdf {
        path: path.to_path_buf(),
        magic: bytes.iter().take(4).copied().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_magic_accepted() {
        check_pdf_magic(Path::new("r.pdf"), b"%PDF-1.7\n...").unwrap();
    }

    #[test]
    fn test_non_pdf_rejected() {
        let err = check_pdf_magic(Path::new("r.pdf"), b"PK\x03\x04rest").unwrap_err();
        match err {
            BpError::NotAPdf { magic, .. } => assert_eq!(magic, b"PK\x03\x04"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_file_rejected() {
        assert!(check_pdf_magic(Path::new("r.pdf"), b"").is_err());
    }

    #[test]
    fn test_page_from_text() {
        let page = PageContent::from_text(2, "a\nb\r\nc");
        assert_eq!(page.lines, vec!["a", "b", "c"]);
    }
}
