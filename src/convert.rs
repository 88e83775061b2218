//! Batch orchestration: every discovered PDF, every page, one at a time.
//!
//! Failures are contained at the smallest unit that failed:
//!
//! ```text
//! discover ─▶ for each PDF ─▶ open ──✗──▶ record DocumentError, next PDF
//!                               │
//!                               ▼
//!                   for each page ─▶ render ─▶ name ─▶ save
//!                                      ✗        ✗       ✗
//!                                      └── record PageError, next page
//! ```
//!
//! Nothing is retried. Only failures before the first document (unknown or
//! unreadable directory) abort the run.

use crate::config::ConversionConfig;
use crate::error::Pdf2JpegError;
use crate::output::{BatchReport, DocumentReport, PageResult, StemCollision};
use crate::pipeline::encode::ImageEncoder;
use crate::pipeline::render::{DocumentRenderer, RenderedDocument};
use crate::pipeline::{discover, naming};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Convert every PDF in `dir` into per-page JPEGs written to `dir`.
///
/// # Returns
/// `Ok(BatchReport)` whenever the directory could be scanned, even if every
/// document failed (check [`BatchReport::any_success`]).
///
/// # Errors
/// [`Pdf2JpegError::InvalidConfig`] when `config` fails
/// [`ConversionConfig::validate`], and
/// [`Pdf2JpegError::DirectoryUnreadable`] when `dir` cannot be listed.
pub fn convert_directory<R, E>(
    dir: &Path,
    renderer: &R,
    encoder: &E,
    config: &ConversionConfig,
) -> Result<BatchReport, Pdf2JpegError>
where
    R: DocumentRenderer,
    E: ImageEncoder,
{
    config.validate()?;
    let total_start = Instant::now();
    let inputs = discover::discover_pdfs(dir)?;
    info!("Found {} PDF file(s) in {}", inputs.len(), dir.display());

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_start(inputs.len());
    }

    let stem_collisions = find_stem_collisions(&inputs);
    if config.warn_on_stem_collision {
        for c in &stem_collisions {
            warn!(
                "'{}' and '{}' share the output stem '{}'; later pages overwrite earlier ones",
                c.first.display(),
                c.second.display(),
                c.stem
            );
            if let Some(ref cb) = config.progress_callback {
                cb.on_stem_collision(&c.stem, &c.first, &c.second);
            }
        }
    }

    let total = inputs.len();
    let mut documents = Vec::with_capacity(total);
    for (i, input) in inputs.iter().enumerate() {
        if let Some(ref cb) = config.progress_callback {
            cb.on_document_start(i + 1, total, input);
        }
        documents.push(convert_document(input, dir, renderer, encoder, config));
    }

    let report = BatchReport::new(
        dir.to_path_buf(),
        documents,
        stem_collisions,
        total_start.elapsed().as_millis() as u64,
    );

    info!(
        "Batch complete: {}/{} documents opened, {} pages written, {} failed, {}ms",
        report.stats.opened_documents,
        report.stats.discovered_documents,
        report.stats.written_pages,
        report.stats.failed_pages,
        report.stats.total_duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_complete(&report.stats);
    }

    Ok(report)
}

/// Convert one PDF, writing its pages into `out_dir`.
///
/// Never fails: an unopenable document is reported through
/// [`DocumentReport::error`], failed pages through their [`PageResult`].
pub fn convert_document<R, E>(
    input: &Path,
    out_dir: &Path,
    renderer: &R,
    encoder: &E,
    config: &ConversionConfig,
) -> DocumentReport
where
    R: DocumentRenderer,
    E: ImageEncoder,
{
    let start = Instant::now();
    debug!("Converting: {}", input.display());

    let document = match renderer.open(input) {
        Ok(doc) => doc,
        Err(e) => {
            warn!("Skipping document: {}", e);
            if let Some(ref cb) = config.progress_callback {
                cb.on_document_error(input, &e.to_string());
            }
            return DocumentReport {
                input: input.to_path_buf(),
                page_count: None,
                error: Some(e),
                pages: Vec::new(),
                duration_ms: start.elapsed().as_millis() as u64,
            };
        }
    };

    let page_count = document.page_count();
    if let Some(ref cb) = config.progress_callback {
        cb.on_document_opened(input, page_count);
    }

    let scale = config.scale();
    let mut pages = Vec::with_capacity(page_count);
    for page_index in 0..page_count {
        let page_num = page_index + 1;
        let result = convert_page(&document, page_index, scale, input, out_dir, encoder);

        match &result {
            Ok(output) => {
                if let Some(ref cb) = config.progress_callback {
                    cb.on_page_complete(page_num, page_count, output);
                }
            }
            Err(e) => {
                warn!("{}: {}", input.display(), e);
                if let Some(ref cb) = config.progress_callback {
                    cb.on_page_error(page_num, page_count, &e.to_string());
                }
            }
        }

        pages.push(match result {
            Ok(output) => PageResult::written(page_num, output),
            Err(e) => PageResult::failed(e),
        });
    }

    let report = DocumentReport {
        input: input.to_path_buf(),
        page_count: Some(page_count),
        error: None,
        pages,
        duration_ms: start.elapsed().as_millis() as u64,
    };

    info!(
        "{}: {}/{} pages written in {}ms",
        input.display(),
        report.written_pages(),
        page_count,
        report.duration_ms
    );

    report
}

/// Render, name and save a single page. The raster is dropped on return.
fn convert_page<D, E>(
    document: &D,
    page_index: usize,
    scale: f32,
    input: &Path,
    out_dir: &Path,
    encoder: &E,
) -> Result<PathBuf, crate::error::PageError>
where
    D: RenderedDocument,
    E: ImageEncoder,
{
    let raster = document.render_page(page_index, scale)?;
    let output = naming::output_path(out_dir, input, page_index)?;
    encoder.encode_and_save(&raster, &output, page_index + 1)?;
    debug!("Page {} → {}", page_index + 1, output.display());
    Ok(output)
}

/// Pairs of inputs (in run order) whose outputs would overwrite each other.
///
/// Every later input is paired with the first input that claimed its stem.
pub fn find_stem_collisions(inputs: &[PathBuf]) -> Vec<StemCollision> {
    let mut owners: HashMap<&str, &PathBuf> = HashMap::new();
    let mut collisions = Vec::new();

    for input in inputs {
        let Some(name) = input.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let stem = naming::output_stem(name);
        match owners.get(stem) {
            Some(first) => collisions.push(StemCollision {
                stem: stem.to_string(),
                first: (*first).clone(),
                second: input.clone(),
            }),
            None => {
                owners.insert(stem, input);
            }
        }
    }

    collisions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_collision_for_distinct_stems() {
        let inputs = vec![PathBuf::from("/d/a.pdf"), PathBuf::from("/d/b.pdf")];
        assert!(find_stem_collisions(&inputs).is_empty());
    }

    #[test]
    fn case_variants_of_extension_collide() {
        let inputs = vec![
            PathBuf::from("/d/a.PDF"),
            PathBuf::from("/d/a.pdf"),
            PathBuf::from("/d/a.Pdf"),
        ];
        let c = find_stem_collisions(&inputs);
        assert_eq!(c.len(), 2);
        assert!(c.iter().all(|c| c.stem == "a" && c.first == inputs[0]));
        assert_eq!(c[0].second, inputs[1]);
        assert_eq!(c[1].second, inputs[2]);
    }

    #[test]
    fn stems_differing_in_case_do_not_collide() {
        let inputs = vec![PathBuf::from("/d/Doc.pdf"), PathBuf::from("/d/doc.pdf")];
        assert!(find_stem_collisions(&inputs).is_empty());
    }
}
