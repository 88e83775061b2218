//! Configuration types for a batch conversion.
//!
//! The binary has no runtime knobs: it always runs with
//! [`ConversionConfig::default()`], i.e. [`DEFAULT_DPI`] and
//! [`DEFAULT_JPEG_QUALITY`]. The builder exists for library callers and tests.

use crate::error::Pdf2JpegError;
use crate::progress::ProgressCallback;
use std::fmt;

/// Rendering resolution in dots per inch.
pub const DEFAULT_DPI: u32 = 200;

/// JPEG quality on the 1–100 scale.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// PDF user space is defined at 72 units per inch.
pub const PDF_POINTS_PER_INCH: f32 = 72.0;

const MIN_DPI: u32 = 72;
const MAX_DPI: u32 = 600;

/// Configuration for a batch conversion.
///
/// # Example
/// ```rust
/// use pdf2jpeg::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .dpi(300)
///     .jpeg_quality(85)
///     .build()
///     .unwrap();
/// assert_eq!(config.dpi, 300);
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Rendering DPI. Range: 72–600. Default: 200.
    ///
    /// Converted into a uniform page scale of `dpi / 72` (see [`Self::scale`]).
    /// An A4 page at 200 DPI is 1654 × 2339 px.
    pub dpi: u32,

    /// JPEG quality (1–100). Default: 90. Applies to every page of the run.
    pub jpeg_quality: u8,

    /// Warn when two inputs map to the same output stem. Default: true.
    ///
    /// The later document still writes its pages; the warning only makes the
    /// overwrite visible.
    pub warn_on_stem_collision: bool,

    /// Per-document and per-page events, e.g. for a terminal progress bar.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            warn_on_stem_collision: true,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("dpi", &self.dpi)
            .field("jpeg_quality", &self.jpeg_quality)
            .field("warn_on_stem_collision", &self.warn_on_stem_collision)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Check DPI and quality ranges.
    ///
    /// The fields are public, so a hand-built config can bypass the builder's
    /// clamping; [`crate::convert::convert_directory`] calls this before
    /// touching the directory.
    pub fn validate(&self) -> Result<(), Pdf2JpegError> {
        if !(MIN_DPI..=MAX_DPI).contains(&self.dpi) {
            return Err(Pdf2JpegError::InvalidConfig(format!(
                "DPI must be {MIN_DPI}–{MAX_DPI}, got {}",
                self.dpi
            )));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(Pdf2JpegError::InvalidConfig(format!(
                "JPEG quality must be 1–100, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }

    /// Uniform scale factor from PDF points to output pixels.
    pub fn scale(&self) -> f32 {
        self.dpi as f32 / PDF_POINTS_PER_INCH
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi.clamp(MIN_DPI, MAX_DPI);
        self
    }

    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.config.jpeg_quality = quality.clamp(1, 100);
        self
    }

    pub fn warn_on_stem_collision(mut self, v: bool) -> Self {
        self.config.warn_on_stem_collision = v;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Pdf2JpegError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
