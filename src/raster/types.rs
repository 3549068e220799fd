//! Common types for the raster module

use thiserror::Error;

/// Bytes per RGBA8 pixel
pub const CHANNELS: usize = 4;

/// Index of the alpha channel inside a pixel
pub const ALPHA: usize = 3;

/// Raster error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RasterError {
    #[error("Pixel data length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Image dimensions overflow: {width}x{height}")]
    DimensionOverflow { width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, RasterError>;

/// Inclusive pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl Bounds {
    /// Bounds covering a single pixel
    pub fn point(x: u32, y: u32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    /// Grow to include (x, y)
    pub fn include(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    /// Grow by `ring` pixels on every side, saturating at zero
    pub fn expand(&self, ring: u32) -> Self {
        Self {
            min_x: self.min_x.saturating_sub(ring),
            min_y: self.min_y.saturating_sub(ring),
            max_x: self.max_x.saturating_add(ring),
            max_y: self.max_y.saturating_add(ring),
        }
    }
}
