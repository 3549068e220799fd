//! Seed-based connected region erasure
//!
//! # Algorithm
//!
//! 1. Start an explicit stack at the seed (no recursion, so large regions
//!    cannot overflow the call stack)
//! 2. On pop, skip visited or non strict-white pixels
//! 3. Otherwise erase the pixel and push its 8 neighbors
//!
//! Whiteness is checked on pop; the visited grid is the only de-duplication.
//! Non-white pixels act as walls, diagonals included.

use tracing::debug;

use super::classify::Whiteness;
use super::NEIGHBORS_8;
use crate::raster::{Bounds, RasterBuffer};

/// Outcome of one region erasure
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegionEraseResult {
    /// Pixels made transparent
    pub erased: usize,
    /// Bounding box of the erased pixels
    pub bounds: Option<Bounds>,
}

impl RegionEraseResult {
    /// Check if anything was erased
    pub fn is_empty(&self) -> bool {
        self.erased == 0
    }
}

/// Flood-fill eraser
pub struct RegionEraser;

impl RegionEraser {
    /// Erase the 8-connected strict-white region containing the seed.
    ///
    /// Seeds outside the buffer are ignored.
    pub fn erase_from_seed(buffer: &mut RasterBuffer, seed_x: i64, seed_y: i64) -> RegionEraseResult {
        if !buffer.in_bounds(seed_x, seed_y) {
            debug!(seed_x, seed_y, "Seed outside buffer, ignoring");
            return RegionEraseResult::default();
        }

        let (width, height) = buffer.dimensions();
        let index = |x: u32, y: u32| -> usize { y as usize * width as usize + x as usize };

        let mut visited = vec![false; buffer.len()];
        let mut stack = vec![(seed_x as u32, seed_y as u32)];
        let mut result = RegionEraseResult::default();

        while let Some((x, y)) = stack.pop() {
            let idx = index(x, y);
            if visited[idx] || !Self::is_member(buffer, x, y) {
                continue;
            }

            visited[idx] = true;
            buffer.erase(x, y);
            result.erased += 1;
            match result.bounds.as_mut() {
                Some(bounds) => bounds.include(x, y),
                None => result.bounds = Some(Bounds::point(x, y)),
            }

            for (dx, dy) in NEIGHBORS_8 {
                let nx = x as i64 + dx;
                let ny = y as i64 + dy;
                if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                    continue;
                }
                let (nx, ny) = (nx as u32, ny as u32);
                if !visited[index(nx, ny)] {
                    stack.push((nx, ny));
                }
            }
        }

        debug!(
            seed_x,
            seed_y,
            erased = result.erased,
            "Region erasure finished"
        );
        result
    }

    /// Flood-fill membership test
    fn is_member(buffer: &RasterBuffer, x: u32, y: u32) -> bool {
        buffer
            .pixel(x, y)
            .is_some_and(|rgba| Whiteness::Strict.matches(rgba))
    }
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const BLACK: [u8; 4] = [0, 0, 0, 255];

    fn white(width: u32, height: u32) -> RasterBuffer {
        RasterBuffer::from_pixel(width, height, WHITE)
    }

    #[test]
    fn test_fully_white_buffer() {
        let mut buffer = white(4, 4);
        let result = RegionEraser::erase_from_seed(&mut buffer, 0, 0);

        assert_eq!(result.erased, 16);
        assert_eq!(buffer.erased_count(), 16);
        assert_eq!(
            result.bounds,
            Some(Bounds { min_x: 0, min_y: 0, max_x: 3, max_y: 3 })
        );
    }

    #[test]
    fn test_black_column_wall() {
        let mut buffer = white(4, 4);
        for y in 0..4 {
            buffer.set_pixel(2, y, BLACK);
        }

        let result = RegionEraser::erase_from_seed(&mut buffer, 0, 0);
        assert_eq!(result.erased, 8);

        for y in 0..4 {
            assert!(buffer.is_erased(0, y));
            assert!(buffer.is_erased(1, y));
            assert!(!buffer.is_erased(2, y));
            assert!(!buffer.is_erased(3, y));
        }

        // A second click on the far side clears the remaining column
        let result = RegionEraser::erase_from_seed(&mut buffer, 3, 2);
        assert_eq!(result.erased, 4);
        assert_eq!(
            result.bounds,
            Some(Bounds { min_x: 3, min_y: 0, max_x: 3, max_y: 3 })
        );
    }

    #[test]
    fn test_seed_out_of_bounds() {
        let mut buffer = white(4, 4);
        let before = buffer.clone();

        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 4), (i64::MAX, 2)] {
            let result = RegionEraser::erase_from_seed(&mut buffer, x, y);
            assert!(result.is_empty());
            assert_eq!(result.bounds, None);
        }
        assert_eq!(buffer, before);
    }

    #[test]
    fn test_non_white_seed() {
        let mut buffer = white(3, 3);
        buffer.set_pixel(1, 1, [200, 200, 200, 255]);

        let result = RegionEraser::erase_from_seed(&mut buffer, 1, 1);
        assert!(result.is_empty());
        assert_eq!(buffer.erased_count(), 0);
    }

    #[test]
    fn test_already_erased_seed() {
        let mut buffer = white(3, 3);
        buffer.erase(1, 1);

        let result = RegionEraser::erase_from_seed(&mut buffer, 1, 1);
        assert!(result.is_empty());
        assert_eq!(buffer.erased_count(), 1);
    }

    #[test]
    fn test_diagonal_connectivity() {
        // White only on the main diagonal
        let mut buffer = RasterBuffer::from_pixel(4, 4, BLACK);
        for i in 0..4 {
            buffer.set_pixel(i, i, WHITE);
        }

        let result = RegionEraser::erase_from_seed(&mut buffer, 0, 0);
        assert_eq!(result.erased, 4);
        for i in 0..4 {
            assert!(buffer.is_erased(i, i));
        }
    }

    #[test]
    fn test_light_grey_is_wall() {
        // 235-grey fails the strict test and stops propagation
        let mut buffer = white(5, 1);
        buffer.set_pixel(2, 0, [235, 235, 235, 255]);

        let result = RegionEraser::erase_from_seed(&mut buffer, 0, 0);
        assert_eq!(result.erased, 2);
        assert!(!buffer.is_erased(2, 0));
        assert!(!buffer.is_erased(3, 0));
    }

    #[test]
    fn test_separate_regions_untouched() {
        // Two white blobs separated by a black frame row
        let mut buffer = white(5, 5);
        for x in 0..5 {
            buffer.set_pixel(x, 2, BLACK);
        }

        RegionEraser::erase_from_seed(&mut buffer, 4, 4);
        for x in 0..5 {
            assert!(!buffer.is_erased(x, 0));
            assert!(!buffer.is_erased(x, 1));
            assert!(buffer.is_erased(x, 3));
            assert!(buffer.is_erased(x, 4));
        }
    }

    #[test]
    fn test_color_preserved_on_erase() {
        let mut buffer = RasterBuffer::from_pixel(2, 1, [250, 245, 241, 255]);
        RegionEraser::erase_from_seed(&mut buffer, 0, 0);
        assert_eq!(buffer.pixel(1, 0), Some([250, 245, 241, 0]));
    }

    #[test]
    fn test_large_region_no_recursion_limit() {
        let mut buffer = white(600, 600);
        let result = RegionEraser::erase_from_seed(&mut buffer, 300, 300);
        assert_eq!(result.erased, 600 * 600);
    }
}
