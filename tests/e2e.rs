//! End-to-end tests against a real pdfium library.
//!
//! The PDFs are generated with pdfium itself, so no fixtures are needed, but
//! the pdfium shared library is (it may be downloaded on first use). Gated
//! behind `E2E_ENABLED` so they do not run in CI unless requested.
//!
//! Run with:
//!   E2E_ENABLED=1 cargo test --test e2e -- --nocapture --test-threads=1

use pdf2jpeg::{
    convert_directory, ConversionConfig, DocumentError, DocumentRenderer, JpegFileEncoder,
    PdfiumRenderer, RenderedDocument,
};
use pdfium_render::prelude::*;
use std::path::Path;

// ── Test helpers ─────────────────────────────────────────────────────────────

macro_rules! e2e_skip_unless_enabled {
    () => {{
        if std::env::var("E2E_ENABLED").is_err() {
            println!("SKIP — set E2E_ENABLED=1 to run e2e tests");
            return;
        }
    }};
}

fn renderer() -> PdfiumRenderer {
    let pdfium = pdfium_auto::bind_pdfium(None).expect("pdfium should be available for e2e tests");
    PdfiumRenderer::new(pdfium)
}

/// Write an A4 PDF with `pages` blank pages.
fn write_blank_pdf(pdfium: &Pdfium, path: &Path, pages: usize) {
    let mut document = pdfium.create_new_pdf().expect("create pdf");
    for _ in 0..pages {
        document
            .pages_mut()
            .create_page_at_end(PdfPagePaperSize::a4())
            .expect("add page");
    }
    document.save_to_file(path).expect("save pdf");
}

fn jpegs_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".jpg"))
        .collect();
    names.sort();
    names
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn test_renders_a4_at_200_dpi() {
    e2e_skip_unless_enabled!();
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("a4.pdf");
    let renderer = renderer();
    write_blank_pdf(renderer.pdfium(), &pdf, 1);

    let doc = renderer.open(&pdf).expect("open generated pdf");
    assert_eq!(doc.page_count(), 1);

    let raster = doc
        .render_page(0, ConversionConfig::default().scale())
        .expect("render page 1");
    // A4 is 595 × 842 pt → ~1653 × 2339 px at 200 DPI.
    assert!((1650..=1656).contains(&raster.width()), "width {}", raster.width());
    assert!((2336..=2342).contains(&raster.height()), "height {}", raster.height());
}

#[test]
fn test_corrupt_and_valid_documents() {
    e2e_skip_unless_enabled!();
    let dir = tempfile::tempdir().unwrap();
    let renderer = renderer();
    write_blank_pdf(renderer.pdfium(), &dir.path().join("doc.pdf"), 3);
    std::fs::write(dir.path().join("broken.pdf"), b"%PDF-1.7 this is not a pdf").unwrap();

    let config = ConversionConfig::default();
    let encoder = JpegFileEncoder::new(config.jpeg_quality);

    let report = convert_directory(dir.path(), &renderer, &encoder, &config)
        .expect("batch should complete");

    assert!(report.any_success);
    assert_eq!(
        jpegs_in(dir.path()),
        vec!["doc_p0001.jpg", "doc_p0002.jpg", "doc_p0003.jpg"]
    );

    let broken = report
        .documents
        .iter()
        .find(|d| d.input.ends_with("broken.pdf"))
        .unwrap();
    assert!(matches!(broken.error, Some(DocumentError::OpenFailed { .. })));

    let decoded = image::open(dir.path().join("doc_p0002.jpg")).expect("valid jpeg");
    assert!(decoded.width() > 1000);
}

#[test]
fn test_out_of_range_page_is_a_page_error() {
    e2e_skip_unless_enabled!();
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("one.pdf");
    let renderer = renderer();
    write_blank_pdf(renderer.pdfium(), &pdf, 1);

    let doc = renderer.open(&pdf).unwrap();
    let err = doc.render_page(5, 1.0).unwrap_err();
    assert_eq!(err.page(), 6);
}
