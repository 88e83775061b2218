//! # pdf2jpeg
//!
//! Render every PDF next to the executable into one JPEG per page.
//!
//! Drop `pdf2jpeg` into a folder of PDFs and run it: `report.pdf` becomes
//! `report_p0001.jpg`, `report_p0002.jpg`, … in the same folder, rendered at
//! 200 DPI and saved at JPEG quality 90. A broken document or page is logged
//! and skipped; the rest of the batch carries on.
//!
//! ## Pipeline Overview
//!
//! ```text
//! exe dir
//!  │
//!  ├─ 1. Locate    directory of the running executable
//!  ├─ 2. Discover  *.pdf in that directory (non-recursive, any case)
//!  ├─ 3. Render    pdfium, one page at a time, scale = dpi / 72, RGB
//!  ├─ 4. Name      {stem}_p{NNNN}.jpg
//!  └─ 5. Encode    JPEG at fixed quality, written beside the executable
//! ```
//!
//! ## Library use
//!
//! ```rust,no_run
//! use pdf2jpeg::{convert_directory, ConversionConfig, JpegFileEncoder, PdfiumRenderer};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pdfium = pdfium_auto::bind_pdfium(None)?;
//!     let renderer = PdfiumRenderer::new(pdfium);
//!     let config = ConversionConfig::default();
//!     let encoder = JpegFileEncoder::new(config.jpeg_quality);
//!
//!     let report = convert_directory("scans".as_ref(), &renderer, &encoder, &config)?;
//!     eprintln!("{} pages written", report.stats.written_pages);
//!     Ok(())
//! }
//! ```
//!
//! Rendering and encoding are reached only through the
//! [`DocumentRenderer`] and [`ImageEncoder`] traits, so the batch logic can
//! be exercised with in-memory fakes.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2jpeg` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, DEFAULT_DPI, DEFAULT_JPEG_QUALITY};
pub use convert::{convert_directory, convert_document};
pub use error::{DocumentError, PageError, Pdf2JpegError};
pub use output::{BatchReport, BatchStats, DocumentReport, PageResult, StemCollision};
pub use pipeline::encode::{ImageEncoder, JpegFileEncoder};
pub use pipeline::locate::executable_dir;
pub use pipeline::naming::output_file_name;
pub use pipeline::render::{DocumentRenderer, PageRaster, PdfiumRenderer, RenderedDocument};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
