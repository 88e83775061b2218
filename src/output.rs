//! Result types of a batch run.
//!
//! A run never fails because of a single document or page; instead every
//! outcome is recorded here and summarised by [`BatchReport::any_success`].
//! All types serialise to JSON for `pdf2jpeg --json`.

use crate::error::{DocumentError, PageError};
use serde::Serialize;
use std::path::PathBuf;

/// Outcome of one page.
#[derive(Debug, Clone, Serialize)]
pub struct PageResult {
    /// 1-based page number.
    pub page_num: usize,
    /// The written JPEG, when the page succeeded.
    pub output: Option<PathBuf>,
    /// Why the page was skipped, when it failed.
    pub error: Option<PageError>,
}

impl PageResult {
    pub fn written(page_num: usize, output: PathBuf) -> Self {
        Self {
            page_num,
            output: Some(output),
            error: None,
        }
    }

    pub fn failed(error: PageError) -> Self {
        Self {
            page_num: error.page(),
            output: None,
            error: Some(error),
        }
    }

    pub fn is_written(&self) -> bool {
        self.error.is_none() && self.output.is_some()
    }
}

/// Outcome of one input PDF.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub input: PathBuf,
    /// Known once the document opened.
    pub page_count: Option<usize>,
    /// Set when the document could not be opened.
    pub error: Option<DocumentError>,
    /// One entry per attempted page, in page order.
    pub pages: Vec<PageResult>,
    pub duration_ms: u64,
}

impl DocumentReport {
    /// A document that opened counts as converted, even if pages failed.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn written_pages(&self) -> usize {
        self.pages.iter().filter(|p| p.is_written()).count()
    }

    pub fn failed_pages(&self) -> usize {
        self.pages.iter().filter(|p| p.error.is_some()).count()
    }
}

/// Two inputs whose outputs share a stem; `second` overwrites `first`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StemCollision {
    pub stem: String,
    pub first: PathBuf,
    pub second: PathBuf,
}

/// Aggregate counters for a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchStats {
    pub discovered_documents: usize,
    pub opened_documents: usize,
    pub failed_documents: usize,
    /// Sum of page counts of opened documents.
    pub total_pages: usize,
    pub written_pages: usize,
    pub failed_pages: usize,
    pub total_duration_ms: u64,
}

/// Everything a batch run produced.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// Directory scanned for inputs and receiving all outputs.
    pub directory: PathBuf,
    pub documents: Vec<DocumentReport>,
    pub stem_collisions: Vec<StemCollision>,
    pub stats: BatchStats,
    pub any_success: bool,
}

impl BatchReport {
    /// Assemble a report and derive its counters from `documents`.
    pub fn new(
        directory: PathBuf,
        documents: Vec<DocumentReport>,
        stem_collisions: Vec<StemCollision>,
        total_duration_ms: u64,
    ) -> Self {
        let opened = documents.iter().filter(|d| d.is_success()).count();
        let stats = BatchStats {
            discovered_documents: documents.len(),
            opened_documents: opened,
            failed_documents: documents.len() - opened,
            total_pages: documents.iter().filter_map(|d| d.page_count).sum(),
            written_pages: documents.iter().map(DocumentReport::written_pages).sum(),
            failed_pages: documents.iter().map(DocumentReport::failed_pages).sum(),
            total_duration_ms,
        };

        Self {
            directory,
            any_success: opened > 0,
            documents,
            stem_collisions,
            stats,
        }
    }

    /// `true` when the scan found nothing to convert.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Every JPEG written during the run, in conversion order.
    pub fn outputs(&self) -> impl Iterator<Item = &PathBuf> {
        self.documents
            .iter()
            .flat_map(|d| d.pages.iter())
            .filter_map(|p| p.output.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opened(name: &str, pages: Vec<PageResult>) -> DocumentReport {
        DocumentReport {
            input: PathBuf::from(name),
            page_count: Some(pages.len()),
            error: None,
            pages,
            duration_ms: 1,
        }
    }

    fn unopened(name: &str) -> DocumentReport {
        DocumentReport {
            input: PathBuf::from(name),
            page_count: None,
            error: Some(DocumentError::OpenFailed {
                path: PathBuf::from(name),
                detail: "bad xref".into(),
            }),
            pages: Vec::new(),
            duration_ms: 0,
        }
    }

    #[test]
    fn empty_batch_has_no_success() {
        let r = BatchReport::new(PathBuf::from("/d"), Vec::new(), Vec::new(), 0);
        assert!(r.is_empty());
        assert!(!r.any_success);
        assert_eq!(r.stats, BatchStats::default());
    }

    #[test]
    fn opened_document_counts_even_if_every_page_failed() {
        let doc = opened(
            "a.pdf",
            vec![PageResult::failed(PageError::RenderFailed {
                page: 1,
                detail: "x".into(),
            })],
        );
        let r = BatchReport::new(PathBuf::from("/d"), vec![doc, unopened("b.pdf")], Vec::new(), 5);
        assert!(r.any_success);
        assert_eq!(r.stats.opened_documents, 1);
        assert_eq!(r.stats.failed_documents, 1);
        assert_eq!(r.stats.written_pages, 0);
        assert_eq!(r.stats.failed_pages, 1);
    }

    #[test]
    fn stats_and_outputs_follow_pages() {
        let doc = opened(
            "doc.pdf",
            vec![
                PageResult::written(1, PathBuf::from("doc_p0001.jpg")),
                PageResult::failed(PageError::RenderFailed {
                    page: 2,
                    detail: "x".into(),
                }),
                PageResult::written(3, PathBuf::from("doc_p0003.jpg")),
            ],
        );
        let r = BatchReport::new(PathBuf::from("/d"), vec![doc], Vec::new(), 5);
        assert_eq!(r.stats.total_pages, 3);
        assert_eq!(r.stats.written_pages, 2);
        let outs: Vec<_> = r.outputs().cloned().collect();
        assert_eq!(
            outs,
            vec![PathBuf::from("doc_p0001.jpg"), PathBuf::from("doc_p0003.jpg")]
        );
    }

    #[test]
    fn failed_page_result_takes_page_from_error() {
        let p = PageResult::failed(PageError::EncodeFailed {
            page: 4,
            detail: "x".into(),
        });
        assert_eq!(p.page_num, 4);
        assert!(!p.is_written());
    }

    #[test]
    fn report_serialises_to_json() {
        let r = BatchReport::new(PathBuf::from("/d"), vec![unopened("b.pdf")], Vec::new(), 0);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["any_success"], false);
        assert_eq!(json["stats"]["failed_documents"], 1);
    }
}
