//! Progress-callback trait for per-document and per-page events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to follow a
//! batch as it runs. The library only calls these hooks; how the events are
//! shown (progress bar, log file, nothing) is up to the caller.
//!
//! # Example
//!
//! ```rust
//! use pdf2jpeg::{ConversionConfig, ConversionProgressCallback};
//! use std::path::Path;
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     written: AtomicUsize,
//! }
//!
//! impl ConversionProgressCallback for CountingCallback {
//!     fn on_page_complete(&self, page_num: usize, total_pages: usize, output: &Path) {
//!         self.written.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("page {}/{} → {}", page_num, total_pages, output.display());
//!     }
//! }
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(Arc::new(CountingCallback { written: AtomicUsize::new(0) }))
//!     .build()
//!     .unwrap();
//! ```

use crate::output::BatchStats;
use std::path::Path;
use std::sync::Arc;

/// Called by the batch orchestrator as it works through the inputs.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Calls arrive sequentially from the converting
/// thread; `Send + Sync` lets the callback live inside a shareable config.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once after discovery, before the first document is opened.
    fn on_batch_start(&self, total_documents: usize) {
        let _ = total_documents;
    }

    /// Called before a document is opened.
    ///
    /// # Arguments
    /// * `doc_num`         — 1-indexed position in the batch
    /// * `total_documents` — number of discovered PDFs
    /// * `path`            — absolute input path
    fn on_document_start(&self, doc_num: usize, total_documents: usize, path: &Path) {
        let _ = (doc_num, total_documents, path);
    }

    /// Called when a document opened and its page count is known.
    fn on_document_opened(&self, path: &Path, page_count: usize) {
        let _ = (path, page_count);
    }

    /// Called when a document could not be opened and is skipped.
    fn on_document_error(&self, path: &Path, error: &str) {
        let _ = (path, error);
    }

    /// Called after a page has been written.
    ///
    /// # Arguments
    /// * `page_num`    — 1-indexed page number
    /// * `total_pages` — pages in the current document
    /// * `output`      — path of the written JPEG
    fn on_page_complete(&self, page_num: usize, total_pages: usize, output: &Path) {
        let _ = (page_num, total_pages, output);
    }

    /// Called when a page is skipped because render, naming or saving failed.
    fn on_page_error(&self, page_num: usize, total_pages: usize, error: &str) {
        let _ = (page_num, total_pages, error);
    }

    /// Called when `second` will overwrite the outputs of `first`.
    fn on_stem_collision(&self, stem: &str, first: &Path, second: &Path) {
        let _ = (stem, first, second);
    }

    /// Called once after every discovered document has been attempted.
    fn on_batch_complete(&self, stats: &BatchStats) {
        let _ = stats;
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;
