//! Input discovery: every `*.pdf` directly inside the execution directory.
//!
//! The match is on the file extension only, compared case-insensitively, so
//! `Scan.PDF` is found and `notes.pdf.bak` is not. Subdirectories are never
//! entered, and a directory that happens to be called `x.pdf` is skipped.

use crate::error::Pdf2JpegError;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// `true` if `path` ends in `.pdf` (any case).
pub fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(OsStr::new("pdf")))
}

/// List the PDFs directly inside `dir`, sorted by path.
///
/// Entries that vanish or cannot be inspected mid-scan are skipped with a
/// warning; only an unreadable `dir` is an error.
pub fn discover_pdfs(dir: &Path) -> Result<Vec<PathBuf>, Pdf2JpegError> {
    let entries = std::fs::read_dir(dir).map_err(|e| Pdf2JpegError::DirectoryUnreadable {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut found = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        let path = entry.path();
        if !has_pdf_extension(&path) {
            continue;
        }

        // Follows symlinks: a link to a PDF is an input, a link to a folder is not.
        match std::fs::metadata(&path) {
            Ok(meta) if meta.is_file() => found.push(path),
            Ok(_) => debug!("Skipping non-file {}", path.display()),
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }

    found.sort();
    debug!("Discovered {} PDF(s) in {}", found.len(), dir.display());
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_has_pdf_extension() {
        assert!(has_pdf_extension(Path::new("a.pdf")));
        assert!(has_pdf_extension(Path::new("A.PDF")));
        assert!(has_pdf_extension(Path::new("x/Report.final.Pdf")));
        assert!(!has_pdf_extension(Path::new("a.pdf.bak")));
        assert!(!has_pdf_extension(Path::new("pdf")));
        assert!(!has_pdf_extension(Path::new("a.pdfx")));
        assert!(!has_pdf_extension(Path::new("")));
    }

    #[test]
    fn empty_directory_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_pdfs(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn finds_pdfs_case_insensitively_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdf", "A.PDF", "notes.txt", "c.Pdf", "d.pdf.bak"] {
            fs::write(dir.path().join(name), b"%PDF-1.7").unwrap();
        }

        let found = discover_pdfs(dir.path()).unwrap();
        assert_eq!(names(&found), vec!["A.PDF", "b.pdf", "c.Pdf"]);
        assert!(found.iter().all(|p| p.starts_with(dir.path())));
    }

    #[test]
    fn skips_directories_and_does_not_recurse() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("folder.pdf")).unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("inner.pdf"), b"%PDF").unwrap();
        fs::write(dir.path().join("top.pdf"), b"%PDF").unwrap();

        let found = discover_pdfs(dir.path()).unwrap();
        assert_eq!(names(&found), vec!["top.pdf"]);
    }

    #[test]
    fn missing_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("nope");
        let err = discover_pdfs(&gone).unwrap_err();
        assert!(matches!(err, Pdf2JpegError::DirectoryUnreadable { .. }));
    }
}
