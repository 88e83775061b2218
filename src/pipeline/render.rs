//! PDF rasterisation: open documents and render pages to RGB via pdfium.
//!
//! The orchestrator talks to the renderer only through [`DocumentRenderer`]
//! and [`RenderedDocument`], so tests can substitute canned documents.
//!
//! ## Threading
//!
//! One [`PdfiumRenderer`] holds the single pdfium session of the process.
//! It is driven from one thread; a parallel caller would need one renderer
//! per worker.

use crate::error::{DocumentError, PageError};
use image::RgbImage;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

/// An RGB pixel buffer for one rendered page.
pub type PageRaster = RgbImage;

/// Opens PDF documents.
pub trait DocumentRenderer {
    /// An open document; dropping it releases the document.
    type Document<'a>: RenderedDocument
    where
        Self: 'a;

    fn open<'a>(&'a self, path: &Path) -> Result<Self::Document<'a>, DocumentError>;
}

/// A document opened by a [`DocumentRenderer`].
pub trait RenderedDocument {
    fn page_count(&self) -> usize;

    /// Rasterise the 0-based `page_index`, scaling PDF points uniformly by `scale`.
    fn render_page(&self, page_index: usize, scale: f32) -> Result<PageRaster, PageError>;
}

/// [`DocumentRenderer`] backed by a pdfium session.
pub struct PdfiumRenderer {
    pdfium: Pdfium,
}

impl PdfiumRenderer {
    pub fn new(pdfium: Pdfium) -> Self {
        Self { pdfium }
    }

    /// The underlying session, e.g. to create documents in tests.
    pub fn pdfium(&self) -> &Pdfium {
        &self.pdfium
    }
}

/// A document loaded by [`PdfiumRenderer`].
pub struct PdfiumDocument<'a> {
    path: PathBuf,
    document: PdfDocument<'a>,
    page_count: usize,
}

impl DocumentRenderer for PdfiumRenderer {
    type Document<'a> = PdfiumDocument<'a>;

    fn open<'a>(&'a self, path: &Path) -> Result<PdfiumDocument<'a>, DocumentError> {
        let document = self.pdfium.load_pdf_from_file(path, None).map_err(|e| {
            let err_str = format!("{:?}", e);
            if err_str.contains("Password") || err_str.contains("password") {
                DocumentError::PasswordRequired {
                    path: path.to_path_buf(),
                }
            } else {
                DocumentError::OpenFailed {
                    path: path.to_path_buf(),
                    detail: err_str,
                }
            }
        })?;

        let page_count = document.pages().len() as usize;
        debug!("Loaded {}: {} pages", path.display(), page_count);

        Ok(PdfiumDocument {
            path: path.to_path_buf(),
            document,
            page_count,
        })
    }
}

impl RenderedDocument for PdfiumDocument<'_> {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn render_page(&self, page_index: usize, scale: f32) -> Result<PageRaster, PageError> {
        let page_num = page_index + 1;
        let render_failed = |detail: String| PageError::RenderFailed {
            page: page_num,
            detail,
        };

        let index = PdfPageIndex::try_from(page_index)
            .map_err(|_| render_failed(format!("page index {page_index} out of range")))?;

        let page = self
            .document
            .pages()
            .get(index)
            .map_err(|e| render_failed(format!("{:?}", e)))?;

        let render_config = PdfRenderConfig::new().scale_page_by_factor(scale);
        let bitmap = page
            .render_with_config(&render_config)
            .map_err(|e| render_failed(format!("{:?}", e)))?;

        let raster = bitmap.as_image().into_rgb8();
        debug!(
            "Rendered {} page {} → {}x{} px",
            self.path.display(),
            page_num,
            raster.width(),
            raster.height()
        );

        Ok(raster)
    }
}
