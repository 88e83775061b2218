//! CLI binary for pdf2jpeg.
//!
//! A thin shim over the library crate: resolve the executable's directory,
//! load pdfium, convert every PDF found there and print a summary.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2jpeg::{
    convert_directory, executable_dir, BatchStats, ConversionConfig, ConversionProgressCallback,
    JpegFileEncoder, Pdf2JpegError, PdfiumRenderer, ProgressCallback,
};
use pdfium_auto::ResolvedLibrary;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress: one `Converting:` line per document on stdout, a page
/// bar for the current document, and failure lines on stderr.
struct CliProgressCallback {
    /// `None` with `--no-progress`: plain lines only.
    bar: Option<ProgressBar>,
}

impl CliProgressCallback {
    fn new(show_bar: bool) -> Arc<Self> {
        let bar = show_bar.then(|| {
            let bar = ProgressBar::new(0);
            bar.set_style(
                ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner())
                    .tick_strings(TICKS),
            );
            bar.set_prefix("Scanning");
            bar.enable_steady_tick(Duration::from_millis(80));
            bar
        });
        Arc::new(Self { bar })
    }

    /// Print a stdout line without tearing the bar.
    fn out(&self, line: String) {
        match &self.bar {
            Some(bar) => bar.suspend(|| println!("{line}")),
            None => println!("{line}"),
        }
    }

    /// Print a stderr line without tearing the bar.
    fn err(&self, line: String) {
        match &self.bar {
            Some(bar) => bar.suspend(|| eprintln!("{line}")),
            None => eprintln!("{line}"),
        }
    }

    /// Switch to the page-counter style for a freshly opened document.
    fn activate_bar(&self, path: &Path, total: usize) {
        let Some(bar) = &self.bar else { return };
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>4}/{len} pages  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(TICKS);

        bar.set_style(style);
        bar.set_length(total as u64);
        bar.set_position(0);
        bar.set_prefix(file_label(path));
        bar.set_message("");
        bar.reset_eta();
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_document_start(&self, doc_num: usize, total: usize, path: &Path) {
        self.out(format!("Converting: {}", path.display()));
        if let Some(bar) = &self.bar {
            bar.set_message(format!("document {doc_num}/{total}"));
        }
    }

    fn on_document_opened(&self, path: &Path, page_count: usize) {
        self.activate_bar(path, page_count);
    }

    fn on_document_error(&self, path: &Path, error: &str) {
        self.err(format!(
            "{} ERROR: cannot open {}\n    {}",
            red("✗"),
            path.display(),
            dim(error)
        ));
    }

    fn on_page_complete(&self, _page_num: usize, _total: usize, output: &Path) {
        if let Some(bar) = &self.bar {
            bar.set_message(file_label(output));
            bar.inc(1);
        }
    }

    fn on_page_error(&self, page_num: usize, total: usize, error: &str) {
        self.err(format!(
            "  {} WARN: page {:>4}/{:<4} {}",
            red("✗"),
            page_num,
            total,
            red(error)
        ));
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    fn on_stem_collision(&self, stem: &str, first: &Path, second: &Path) {
        self.err(format!(
            "{} WARN: {} and {} both write {}_pNNNN.jpg; the later file wins",
            cyan("⚠"),
            file_label(first),
            file_label(second),
            bold(stem)
        ));
    }

    fn on_batch_complete(&self, _stats: &BatchStats) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

const AFTER_HELP: &str = r#"BEHAVIOUR:
  pdf2jpeg takes no input or output arguments. It converts every *.pdf
  (any letter case, not recursive) found in the directory that contains the
  pdf2jpeg executable, and writes the pages to that same directory:

    report.pdf  ->  report_p0001.jpg, report_p0002.jpg, ...

  Pages are rendered at 200 DPI and saved at JPEG quality 90. A PDF that
  cannot be opened, or a page that cannot be rendered or saved, is reported
  and skipped; the rest of the batch continues.

EXIT STATUS:
  0  the batch ran (also when no PDFs were found or nothing converted)
  1  the executable's directory or the PDF engine could not be initialised

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH         Path to an existing libpdfium — skips lookup and download
  PDFIUM_AUTO_CACHE_DIR   Override the default pdfium cache directory
  RUST_LOG                Override the log filter (e.g. pdf2jpeg=debug)

  PDFium is looked up next to the executable first, then in the cache
  (~/.cache/pdf2jpeg/pdfium-7690/), and downloaded (~30 MB) on first run
  if neither has it.
"#;

/// Convert every PDF beside this executable into one JPEG per page.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2jpeg",
    version,
    about = "Convert every PDF beside this executable into one JPEG per page",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2JPEG_VERBOSE")]
    verbose: bool,

    /// Suppress everything except failure diagnostics on stderr.
    #[arg(short, long, env = "PDF2JPEG_QUIET")]
    quiet: bool,

    /// Print plain progress lines instead of a progress bar.
    #[arg(long, env = "PDF2JPEG_NO_PROGRESS")]
    no_progress: bool,

    /// Print the batch report as JSON on stdout instead of the summary.
    #[arg(long, env = "PDF2JPEG_JSON")]
    json: bool,
}

impl Cli {
    fn show_progress(&self) -> bool {
        !self.quiet && !self.no_progress && !self.json
    }

    /// Default tracing filter when `RUST_LOG` is unset.
    ///
    /// With the progress bar the callback prints document and page failures
    /// itself, so logging drops to ERROR. Without a callback (`--quiet`,
    /// `--json`) those failures only reach stderr through WARN logs.
    fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.show_progress() {
            "error"
        } else if self.quiet || self.json {
            "warn"
        } else {
            "info"
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let show_progress = cli.show_progress();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .with_writer(io::stderr)
        .init();

    // ── Resolve the execution directory ──────────────────────────────────
    let dir = executable_dir().context("Cannot locate the directory to convert")?;

    // ── Initialise the PDF engine ────────────────────────────────────────
    let library = ensure_pdfium(show_progress)?;
    let pdfium = pdfium_auto::bind_pdfium_from_path(&library.path)
        .map_err(|e| Pdf2JpegError::PdfiumBindingFailed(e.to_string()))
        .context("Cannot initialise the PDF engine")?;
    tracing::debug!("pdfium: {} ({})", library.path.display(), library.source);
    let renderer = PdfiumRenderer::new(pdfium);

    // ── Build config ─────────────────────────────────────────────────────
    let mut config = ConversionConfig::default();
    if !cli.quiet && !cli.json {
        let cb: ProgressCallback = CliProgressCallback::new(show_progress);
        config.progress_callback = Some(cb);
    }
    let encoder = JpegFileEncoder::new(config.jpeg_quality);

    // ── Run the batch ────────────────────────────────────────────────────
    let report = convert_directory(&dir, &renderer, &encoder, &config)
        .context("Cannot scan for PDF files")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialise report")?
        );
        return Ok(());
    }

    if cli.quiet {
        return Ok(());
    }

    if report.is_empty() {
        println!("No PDF files found in: {}", dir.display());
        return Ok(());
    }

    let stats = &report.stats;
    eprintln!(
        "{}  {}/{} documents  {} pages written  {} failed  {}ms",
        if stats.failed_documents == 0 && stats.failed_pages == 0 {
            green("✔")
        } else if report.any_success {
            cyan("⚠")
        } else {
            red("✘")
        },
        stats.opened_documents,
        stats.discovered_documents,
        bold(&stats.written_pages.to_string()),
        dim(&stats.failed_pages.to_string()),
        stats.total_duration_ms,
    );

    if report.any_success {
        println!("Done.");
    } else {
        println!("Done, but no conversions succeeded.");
    }

    Ok(())
}

/// Find pdfium locally, or download it with a progress bar on first run.
fn ensure_pdfium(show_progress: bool) -> Result<ResolvedLibrary> {
    if !show_progress || pdfium_auto::is_pdfium_available_locally() {
        // Quiet or cached: resolve silently; errors still propagate.
        return pdfium_auto::ensure_pdfium_library(None)
            .map_err(|e| Pdf2JpegError::PdfiumBindingFailed(e.to_string()))
            .context("Failed to obtain the PDF engine");
    }

    let dl_bar = ProgressBar::new(0);
    dl_bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {bytes}/{total_bytes}  ETA {eta_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(TICKS),
    );
    dl_bar.set_prefix("PDF engine");
    dl_bar.set_message("Connecting…");
    dl_bar.enable_steady_tick(Duration::from_millis(80));

    let bar = dl_bar.clone();
    let library = pdfium_auto::ensure_pdfium_library(Some(&|downloaded, total| {
        if let Some(t) = total {
            if bar.length().unwrap_or(0) != t {
                bar.set_length(t);
            }
        }
        bar.set_position(downloaded);
    }))
    .map_err(|e| Pdf2JpegError::PdfiumBindingFailed(e.to_string()))
    .context("Failed to download the PDF engine")?;

    dl_bar.finish_with_message("ready ✓");
    Ok(library)
}
