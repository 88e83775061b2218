//! Image encoding: RGB raster → JPEG file.
//!
//! The file is written to a `.tmp` sibling first and renamed into place, so
//! an interrupted write never leaves a truncated JPEG under the final name.

use crate::config::DEFAULT_JPEG_QUALITY;
use crate::error::PageError;
use crate::pipeline::render::PageRaster;
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes one rendered page to disk.
pub trait ImageEncoder {
    /// Encode `raster` and store it at `path`; `page_num` (1-based) labels errors.
    fn encode_and_save(
        &self,
        raster: &PageRaster,
        path: &Path,
        page_num: usize,
    ) -> Result<(), PageError>;
}

/// Encode an RGB raster as a baseline JPEG.
pub fn encode_jpeg(raster: &PageRaster, quality: u8) -> Result<Vec<u8>, image::ImageError> {
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100)).encode(
        raster.as_raw(),
        raster.width(),
        raster.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(buf)
}

/// [`ImageEncoder`] writing JPEG files at a fixed quality.
#[derive(Debug, Clone, Copy)]
pub struct JpegFileEncoder {
    quality: u8,
}

impl JpegFileEncoder {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }
}

impl Default for JpegFileEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_JPEG_QUALITY)
    }
}

impl ImageEncoder for JpegFileEncoder {
    fn encode_and_save(
        &self,
        raster: &PageRaster,
        path: &Path,
        page_num: usize,
    ) -> Result<(), PageError> {
        let bytes = encode_jpeg(raster, self.quality).map_err(|e| PageError::EncodeFailed {
            page: page_num,
            detail: e.to_string(),
        })?;

        let write_failed = |e: std::io::Error| PageError::WriteFailed {
            page: page_num,
            path: path.to_path_buf(),
            detail: e.to_string(),
        };

        let tmp_path = tmp_sibling(path);
        std::fs::write(&tmp_path, &bytes).map_err(write_failed)?;
        if let Err(e) = std::fs::rename(&tmp_path, path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(write_failed(e));
        }

        debug!("Wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn red_page() -> PageRaster {
        RgbImage::from_pixel(16, 12, Rgb([255, 0, 0]))
    }

    #[test]
    fn encode_small_image() {
        let bytes = encode_jpeg(&red_page(), 90).expect("encode should succeed");
        // SOI marker
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        assert_eq!(
            image::guess_format(&bytes).unwrap(),
            image::ImageFormat::Jpeg
        );
    }

    #[test]
    fn higher_quality_is_not_smaller() {
        let mut img = RgbImage::new(64, 64);
        for (x, y, px) in img.enumerate_pixels_mut() {
            *px = Rgb([(x * 4) as u8, (y * 4) as u8, ((x + y) * 2) as u8]);
        }
        let low = encode_jpeg(&img, 10).unwrap();
        let high = encode_jpeg(&img, 95).unwrap();
        assert!(high.len() >= low.len(), "{} < {}", high.len(), low.len());
    }

    #[test]
    fn quality_is_clamped() {
        assert_eq!(JpegFileEncoder::new(0).quality(), 1);
        assert_eq!(JpegFileEncoder::new(200).quality(), 100);
        assert_eq!(JpegFileEncoder::default().quality(), 90);
    }

    #[test]
    fn saves_file_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("doc_p0001.jpg");

        JpegFileEncoder::default()
            .encode_and_save(&red_page(), &out, 1)
            .expect("save should succeed");

        let written = std::fs::read(&out).unwrap();
        assert_eq!(&written[..2], &[0xFF, 0xD8]);
        assert!(!tmp_sibling(&out).exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn overwrites_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("doc_p0001.jpg");
        std::fs::write(&out, b"stale").unwrap();

        JpegFileEncoder::default()
            .encode_and_save(&red_page(), &out, 1)
            .unwrap();
        assert_ne!(std::fs::read(&out).unwrap(), b"stale");
    }

    #[test]
    fn unwritable_destination_is_a_page_error() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("missing").join("doc_p0003.jpg");

        let err = JpegFileEncoder::default()
            .encode_and_save(&red_page(), &out, 3)
            .unwrap_err();
        match err {
            PageError::WriteFailed { page, path, .. } => {
                assert_eq!(page, 3);
                assert_eq!(path, out);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
