//! Pipeline stages for PDF-to-JPEG conversion.
//!
//! Each submodule implements exactly one step. Rendering and encoding sit
//! behind traits so the orchestrator in [`crate::convert`] can be driven by
//! fakes in tests.
//!
//! ## Data Flow
//!
//! ```text
//! locate ──▶ discover ──▶ render ──▶ naming ──▶ encode
//! (exe dir)   (*.pdf)     (pdfium)   (_pNNNN)   (JPEG file)
//! ```
//!
//! 1. [`locate`]   — directory of the running executable
//! 2. [`discover`] — non-recursive, case-insensitive `*.pdf` listing
//! 3. [`render`]   — open a document and rasterise one page to RGB
//! 4. [`naming`]   — derive `{stem}_p{NNNN}.jpg`
//! 5. [`encode`]   — JPEG-encode a raster and write it to disk

pub mod discover;
pub mod encode;
pub mod locate;
pub mod naming;
pub mod render;
