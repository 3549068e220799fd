//! Owned RGBA8 pixel buffer

use image::{Rgba, RgbaImage};

use super::types::{RasterError, Result, ALPHA, CHANNELS};

/// Row-major RGBA8 raster.
///
/// The pixel vector always holds exactly `width * height * 4` bytes. A pixel
/// whose alpha is 0 counts as erased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterBuffer {
    /// Create a fully transparent buffer
    ///
    /// # Panics
    ///
    /// Panics with a capacity overflow when the byte length does not fit in
    /// `usize`. Use [`RasterBuffer::from_raw`] to get an error instead.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; Self::byte_len(width, height).unwrap_or(usize::MAX)],
        }
    }

    /// Create a buffer filled with one color
    ///
    /// # Panics
    ///
    /// Same as [`RasterBuffer::new`].
    pub fn from_pixel(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut pixels = Vec::with_capacity(Self::byte_len(width, height).unwrap_or(usize::MAX));
        for _ in 0..width as usize * height as usize {
            pixels.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Wrap raw RGBA8 bytes, checking the length invariant
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected =
            Self::byte_len(width, height).ok_or(RasterError::DimensionOverflow { width, height })?;

        if pixels.len() != expected {
            return Err(RasterError::LengthMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// `width * height * 4`, absent on overflow
    fn byte_len(width: u32, height: u32) -> Option<usize> {
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(CHANNELS))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// True when either dimension is zero
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check signed coordinates against the buffer
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    /// Byte offset of pixel (x, y); caller guarantees bounds
    #[inline]
    pub(crate) fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Read a pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Write a pixel; returns false when out of bounds
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let i = self.offset(x, y);
        self.pixels[i..i + CHANNELS].copy_from_slice(&rgba);
        true
    }

    /// Alpha of a pixel
    pub fn alpha(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.offset(x, y) + ALPHA])
    }

    /// Make a pixel fully transparent; returns false when out of bounds
    pub fn erase(&mut self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let i = self.offset(x, y) + ALPHA;
        self.pixels[i] = 0;
        true
    }

    /// Check whether a pixel is erased (alpha 0). Out-of-bounds is not erased.
    pub fn is_erased(&self, x: u32, y: u32) -> bool {
        self.alpha(x, y) == Some(0)
    }

    /// Count erased pixels
    pub fn erased_count(&self) -> usize {
        self.pixels
            .chunks_exact(CHANNELS)
            .filter(|p| p[ALPHA] == 0)
            .count()
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.pixels
    }

    pub(crate) fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    /// Copy into an `image` crate buffer
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let i = self.offset(x, y);
            Rgba([
                self.pixels[i],
                self.pixels[i + 1],
                self.pixels[i + 2],
                self.pixels[i + 3],
            ])
        })
    }
}

impl From<RgbaImage> for RasterBuffer {
    fn from(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            pixels: image.into_raw(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_transparent() {
        let buffer = RasterBuffer::new(3, 2);
        assert_eq!(buffer.as_raw().len(), 3 * 2 * 4);
        assert_eq!(buffer.erased_count(), 6);
        assert!(!buffer.is_empty());
    }

    #[test]
    fn test_from_raw_length_check() {
        let ok = RasterBuffer::from_raw(2, 2, vec![255; 16]);
        assert!(ok.is_ok());

        let bad = RasterBuffer::from_raw(2, 2, vec![255; 15]);
        assert_eq!(
            bad,
            Err(RasterError::LengthMismatch {
                expected: 16,
                actual: 15
            })
        );
    }

    #[test]
    fn test_from_raw_dimension_overflow() {
        let result = RasterBuffer::from_raw(u32::MAX, u32::MAX, Vec::new());
        assert_eq!(
            result,
            Err(RasterError::DimensionOverflow {
                width: u32::MAX,
                height: u32::MAX
            })
        );
    }

    #[test]
    #[should_panic]
    fn test_new_dimension_overflow_panics() {
        RasterBuffer::new(u32::MAX, u32::MAX);
    }

    #[test]
    #[should_panic]
    fn test_from_pixel_dimension_overflow_panics() {
        RasterBuffer::from_pixel(u32::MAX, u32::MAX, [255, 255, 255, 255]);
    }

    #[test]
    fn test_zero_dimension_is_empty() {
        let buffer = RasterBuffer::from_raw(0, 5, Vec::new()).unwrap();
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
    }

    #[test]
    fn test_pixel_get_set() {
        let mut buffer = RasterBuffer::from_pixel(4, 4, [255, 255, 255, 255]);
        assert!(buffer.set_pixel(2, 1, [10, 20, 30, 40]));
        assert_eq!(buffer.pixel(2, 1), Some([10, 20, 30, 40]));
        assert_eq!(buffer.pixel(1, 2), Some([255, 255, 255, 255]));
        assert_eq!(buffer.pixel(4, 0), None);
        assert!(!buffer.set_pixel(0, 4, [0, 0, 0, 0]));
    }

    #[test]
    fn test_erase() {
        let mut buffer = RasterBuffer::from_pixel(2, 2, [200, 100, 50, 255]);
        assert!(buffer.erase(1, 1));
        assert!(buffer.is_erased(1, 1));
        assert_eq!(buffer.pixel(1, 1), Some([200, 100, 50, 0]));
        assert_eq!(buffer.erased_count(), 1);
        assert!(!buffer.erase(2, 0));
        assert!(!buffer.is_erased(5, 5));
    }

    #[test]
    fn test_in_bounds_signed() {
        let buffer = RasterBuffer::new(4, 3);
        assert!(buffer.in_bounds(0, 0));
        assert!(buffer.in_bounds(3, 2));
        assert!(!buffer.in_bounds(-1, 0));
        assert!(!buffer.in_bounds(0, -1));
        assert!(!buffer.in_bounds(4, 0));
        assert!(!buffer.in_bounds(0, 3));
    }

    #[test]
    fn test_rgba_image_conversion() {
        let mut image = RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 4]));
        image.put_pixel(2, 1, Rgba([9, 8, 7, 6]));

        let buffer = RasterBuffer::from(image.clone());
        assert_eq!(buffer.dimensions(), (3, 2));
        assert_eq!(buffer.pixel(2, 1), Some([9, 8, 7, 6]));

        let back = buffer.to_rgba_image();
        assert_eq!(back, image);
    }
}
