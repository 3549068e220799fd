//! Input validation, decoding and canvas fitting

use image::imageops::{self, FilterType};
use image::ImageFormat;
use std::path::Path;
use tracing::{debug, info};

use super::types::{
    ImageIoError, Result, DEFAULT_CANVAS_MAX_HEIGHT, DEFAULT_CANVAS_MAX_WIDTH,
    DEFAULT_MAX_FILE_SIZE,
};
use crate::raster::RasterBuffer;

/// Formats accepted as input
pub const SUPPORTED_FORMATS: [ImageFormat; 4] = [
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Gif,
    ImageFormat::WebP,
];

// ============================================================
// Options
// ============================================================

/// Options for loading an image into the editor
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Reject inputs larger than this many bytes
    pub max_file_size: u64,

    /// Downscale to fit the canvas limits
    pub fit_to_canvas: bool,

    /// Canvas width limit
    pub max_width: u32,

    /// Canvas height limit
    pub max_height: u32,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            fit_to_canvas: true,
            max_width: DEFAULT_CANVAS_MAX_WIDTH,
            max_height: DEFAULT_CANVAS_MAX_HEIGHT,
        }
    }
}

impl LoadOptions {
    /// Create a builder
    pub fn builder() -> LoadOptionsBuilder {
        LoadOptionsBuilder::default()
    }

    /// Keep the decoded image at its source resolution
    pub fn original_size() -> Self {
        Self {
            fit_to_canvas: false,
            ..Default::default()
        }
    }
}

/// Builder for LoadOptions
#[derive(Debug, Default)]
pub struct LoadOptionsBuilder {
    options: LoadOptions,
}

impl LoadOptionsBuilder {
    /// Set file size limit
    #[must_use]
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.options.max_file_size = bytes;
        self
    }

    /// Enable or disable canvas fitting
    #[must_use]
    pub fn fit_to_canvas(mut self, fit: bool) -> Self {
        self.options.fit_to_canvas = fit;
        self
    }

    /// Set canvas limits (each at least 1)
    #[must_use]
    pub fn canvas_size(mut self, max_width: u32, max_height: u32) -> Self {
        self.options.max_width = max_width.max(1);
        self.options.max_height = max_height.max(1);
        self
    }

    /// Build the options
    #[must_use]
    pub fn build(self) -> LoadOptions {
        self.options
    }
}

// ============================================================
// Loaded Image
// ============================================================

/// A decoded image ready for editing
#[derive(Debug, Clone)]
pub struct LoadedImage {
    /// Pixels in canvas space
    pub buffer: RasterBuffer,

    /// Detected source format
    pub format: ImageFormat,

    /// Dimensions before fitting
    pub source_size: (u32, u32),

    /// Factor applied to source dimensions (never above 1.0)
    pub scale: f64,
}

impl LoadedImage {
    /// Check if the image was downscaled
    pub fn was_scaled(&self) -> bool {
        self.scale < 1.0
    }

    /// Map a source-space coordinate into canvas space
    pub fn to_canvas_coords(&self, x: i64, y: i64) -> (i64, i64) {
        (
            (x as f64 * self.scale).floor() as i64,
            (y as f64 * self.scale).floor() as i64,
        )
    }
}

// ============================================================
// Loader
// ============================================================

/// Image loader
pub struct ImageLoader;

impl ImageLoader {
    /// Load and validate an image file
    pub fn load(path: &Path, options: &LoadOptions) -> Result<LoadedImage> {
        if !path.exists() {
            return Err(ImageIoError::NotFound(path.to_path_buf()));
        }

        let size = std::fs::metadata(path)?.len();
        Self::check_size(size, options.max_file_size)?;

        let bytes = std::fs::read(path)?;
        let loaded = Self::load_from_memory(&bytes, options)?;

        info!(
            path = %path.display(),
            source_width = loaded.source_size.0,
            source_height = loaded.source_size.1,
            width = loaded.buffer.width(),
            height = loaded.buffer.height(),
            "Image loaded"
        );
        Ok(loaded)
    }

    /// Validate and decode an in-memory image
    pub fn load_from_memory(bytes: &[u8], options: &LoadOptions) -> Result<LoadedImage> {
        Self::check_size(bytes.len() as u64, options.max_file_size)?;

        let format = image::guess_format(bytes)
            .map_err(|_| ImageIoError::UnsupportedFormat("unrecognized image data".to_string()))?;
        if !SUPPORTED_FORMATS.contains(&format) {
            return Err(ImageIoError::UnsupportedFormat(format!("{:?}", format)));
        }

        let decoded = image::load_from_memory_with_format(bytes, format)
            .map_err(|e| ImageIoError::Decode(e.to_string()))?;
        let rgba = decoded.to_rgba8();
        let source_size = rgba.dimensions();

        let (width, height, scale) = if options.fit_to_canvas {
            Self::fit_dimensions(source_size.0, source_size.1, options.max_width, options.max_height)
        } else {
            (source_size.0, source_size.1, 1.0)
        };

        let rgba = if (width, height) != source_size {
            debug!(width, height, scale, "Fitting image to canvas");
            imageops::resize(&rgba, width, height, FilterType::Triangle)
        } else {
            rgba
        };

        Ok(LoadedImage {
            buffer: RasterBuffer::from(rgba),
            format,
            source_size,
            scale,
        })
    }

    /// Canvas dimensions and scale for an image.
    ///
    /// `scale = min(max_width / width, max_height / height, 1)`; dimensions
    /// are truncated and kept at least 1 for non-empty sources.
    pub fn fit_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32, f64) {
        if width == 0 || height == 0 {
            return (width, height, 1.0);
        }

        let scale = (max_width as f64 / width as f64)
            .min(max_height as f64 / height as f64)
            .min(1.0);

        let fitted_width = ((width as f64 * scale).floor() as u32).max(1);
        let fitted_height = ((height as f64 * scale).floor() as u32).max(1);
        (fitted_width, fitted_height, scale)
    }

    fn check_size(size: u64, limit: u64) -> Result<()> {
        if size > limit {
            return Err(ImageIoError::TooLarge { size, limit });
        }
        Ok(())
    }
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba(rgba));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_load_options_default() {
        let opts = LoadOptions::default();
        assert_eq!(opts.max_file_size, 10 * 1024 * 1024);
        assert!(opts.fit_to_canvas);
        assert_eq!(opts.max_width, 801);
        assert_eq!(opts.max_height, 601);
    }

    #[test]
    fn test_load_options_builder() {
        let opts = LoadOptions::builder()
            .max_file_size(1024)
            .fit_to_canvas(false)
            .canvas_size(0, 300)
            .build();

        assert_eq!(opts.max_file_size, 1024);
        assert!(!opts.fit_to_canvas);
        assert_eq!(opts.max_width, 1);
        assert_eq!(opts.max_height, 300);
    }

    #[test]
    fn test_fit_dimensions_small_image_untouched() {
        assert_eq!(ImageLoader::fit_dimensions(400, 300, 801, 601), (400, 300, 1.0));
    }

    #[test]
    fn test_fit_dimensions_wide_image() {
        let (w, h, scale) = ImageLoader::fit_dimensions(1602, 600, 801, 601);
        assert_eq!((w, h), (801, 300));
        assert!((scale - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_fit_dimensions_tall_image() {
        let (w, h, scale) = ImageLoader::fit_dimensions(1000, 1202, 801, 601);
        assert_eq!((w, h), (500, 601));
        assert!((scale - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_fit_dimensions_never_zero() {
        let (w, h, _) = ImageLoader::fit_dimensions(10_000, 1, 801, 601);
        assert!((800..=801).contains(&w));
        assert_eq!(h, 1);
    }

    #[test]
    fn test_load_png_from_memory() {
        let bytes = png_bytes(20, 10, [255, 255, 255, 255]);
        let loaded = ImageLoader::load_from_memory(&bytes, &LoadOptions::default()).unwrap();

        assert_eq!(loaded.format, ImageFormat::Png);
        assert_eq!(loaded.buffer.dimensions(), (20, 10));
        assert_eq!(loaded.source_size, (20, 10));
        assert!(!loaded.was_scaled());
        assert_eq!(loaded.buffer.pixel(5, 5), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_load_fits_to_canvas() {
        let bytes = png_bytes(40, 20, [10, 20, 30, 255]);
        let opts = LoadOptions::builder().canvas_size(10, 10).build();
        let loaded = ImageLoader::load_from_memory(&bytes, &opts).unwrap();

        assert_eq!(loaded.buffer.dimensions(), (10, 5));
        assert!(loaded.was_scaled());
        assert_eq!(loaded.to_canvas_coords(39, 19), (9, 4));
        // Uniform color survives bilinear resampling
        assert_eq!(loaded.buffer.pixel(3, 3), Some([10, 20, 30, 255]));
    }

    #[test]
    fn test_load_original_size() {
        let bytes = png_bytes(40, 20, [10, 20, 30, 255]);
        let opts = LoadOptions {
            max_width: 10,
            max_height: 10,
            ..LoadOptions::original_size()
        };
        let loaded = ImageLoader::load_from_memory(&bytes, &opts).unwrap();
        assert_eq!(loaded.buffer.dimensions(), (40, 20));
        assert_eq!(loaded.scale, 1.0);
    }

    #[test]
    fn test_rejects_too_large() {
        let bytes = png_bytes(4, 4, [0, 0, 0, 255]);
        let opts = LoadOptions::builder().max_file_size(8).build();
        let result = ImageLoader::load_from_memory(&bytes, &opts);
        assert!(matches!(result, Err(ImageIoError::TooLarge { limit: 8, .. })));
    }

    #[test]
    fn test_rejects_non_image() {
        let result = ImageLoader::load_from_memory(b"definitely not an image", &LoadOptions::default());
        assert!(matches!(result, Err(ImageIoError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_rejects_unsupported_format() {
        let image = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Bmp)
            .unwrap();

        let result = ImageLoader::load_from_memory(&bytes, &LoadOptions::default());
        assert!(matches!(result, Err(ImageIoError::UnsupportedFormat(f)) if f == "Bmp"));
    }

    #[test]
    fn test_image_not_found() {
        let result = ImageLoader::load(Path::new("/nonexistent/image.png"), &LoadOptions::default());
        assert!(matches!(result, Err(ImageIoError::NotFound(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.png");
        std::fs::write(&path, png_bytes(3, 3, [1, 2, 3, 255])).unwrap();

        let loaded = ImageLoader::load(&path, &LoadOptions::default()).unwrap();
        assert_eq!(loaded.buffer.pixel(2, 2), Some([1, 2, 3, 255]));
    }
}
