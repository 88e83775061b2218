//! Error types for the pdf2jpeg library.
//!
//! Three error types reflect the three failure scopes of a batch run:
//!
//! * [`Pdf2JpegError`] — **Fatal**: nothing can be converted at all (the
//!   execution directory is unknown or unreadable, PDFium cannot be loaded,
//!   the configuration is out of range).
//!   Returned as `Err` from [`crate::convert::convert_directory`]; the binary
//!   exits with code 1.
//!
//! * [`DocumentError`] — **Document-level**: one PDF cannot be opened. The
//!   document is skipped and the batch moves on.
//!
//! * [`PageError`] — **Page-level**: one page failed to render, name or save.
//!   The page is skipped and the document moves on.
//!
//! Document and page errors are stored in [`crate::output::DocumentReport`]
//! so callers can inspect partial success after the run.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdf2jpeg library.
#[derive(Debug, Error)]
pub enum Pdf2JpegError {
    /// The path of the running executable could not be determined.
    #[error("Cannot determine the executable's directory: {detail}")]
    ExecutableDirUnavailable { detail: String },

    /// The execution directory exists but cannot be listed.
    #[error("Cannot read directory '{path}': {source}")]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
PDFium is looked up next to the executable, then in the cache, and is\n\
downloaded automatically when missing. If that failed, you can:\n\
  • Check your internet connection and try again.\n\
  • Place libpdfium (pdfium.dll on Windows) next to pdf2jpeg.\n\
  • Set PDFIUM_LIB_PATH=/path/to/libpdfium to use an existing copy.\n"
    )]
    PdfiumBindingFailed(String),

    /// DPI or JPEG quality outside the supported range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A PDF could not be opened; the whole document is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum DocumentError {
    /// The document is encrypted and no password is available.
    #[error("'{path}' is encrypted and requires a password")]
    PasswordRequired { path: PathBuf },

    /// Header/xref/trailer could not be parsed, or the file is not a PDF.
    #[error("cannot open '{path}': {detail}")]
    OpenFailed { path: PathBuf, detail: String },
}

/// A single page failed; the document continues with the next page.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum PageError {
    /// Rasterisation failed.
    #[error("Page {page}: render failed: {detail}")]
    RenderFailed { page: usize, detail: String },

    /// The output file name could not be derived from the input name.
    #[error("Page {page}: cannot build output path for '{input}'")]
    OutputPathUnavailable { page: usize, input: PathBuf },

    /// JPEG encoding failed.
    #[error("Page {page}: JPEG encoding failed: {detail}")]
    EncodeFailed { page: usize, detail: String },

    /// The encoded JPEG could not be written.
    #[error("Page {page}: cannot write '{path}': {detail}")]
    WriteFailed {
        page: usize,
        path: PathBuf,
        detail: String,
    },
}

impl PageError {
    /// 1-based page number the error belongs to.
    pub fn page(&self) -> usize {
        match self {
            PageError::RenderFailed { page, .. }
            | PageError::OutputPathUnavailable { page, .. }
            | PageError::EncodeFailed { page, .. }
            | PageError::WriteFailed { page, .. } => *page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_unreadable_display() {
        let e = Pdf2JpegError::DirectoryUnreadable {
            path: PathBuf::from("/opt/tools"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = e.to_string();
        assert!(msg.contains("/opt/tools"), "got: {msg}");
        assert!(msg.contains("denied"), "got: {msg}");
    }

    #[test]
    fn binding_failure_mentions_override() {
        let e = Pdf2JpegError::PdfiumBindingFailed("no such file".into());
        assert!(e.to_string().contains("PDFIUM_LIB_PATH"));
    }

    #[test]
    fn document_error_display() {
        let e = DocumentError::OpenFailed {
            path: PathBuf::from("broken.pdf"),
            detail: "FormatError".into(),
        };
        assert_eq!(e.to_string(), "cannot open 'broken.pdf': FormatError");
    }

    #[test]
    fn page_error_reports_its_page() {
        let e = PageError::WriteFailed {
            page: 7,
            path: PathBuf::from("doc_p0007.jpg"),
            detail: "disk full".into(),
        };
        assert_eq!(e.page(), 7);
        assert!(e.to_string().starts_with("Page 7:"));
    }

    #[test]
    fn page_error_serialises() {
        let e = PageError::RenderFailed {
            page: 2,
            detail: "boom".into(),
        };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("RenderFailed"), "got: {json}");
    }
}
