//! Deep clean: seedless removal of bright, near-grey pixels
//!
//! Every visible pixel passing the bulk-white test becomes transparent.
//! The test reads only the pixel's own channels, so pixels are processed
//! independently and in parallel.

use rayon::prelude::*;
use tracing::info;

use super::classify::Whiteness;
use crate::raster::{RasterBuffer, ALPHA, CHANNELS};

/// Outcome of a deep clean
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkCleanResult {
    /// Pixels made transparent by this pass
    pub removed: usize,
    /// Total pixels in the buffer
    pub total_pixels: usize,
}

impl BulkCleanResult {
    /// Share of the image removed by this pass, in percent
    pub fn removed_percent(&self) -> f64 {
        if self.total_pixels == 0 {
            return 0.0;
        }
        (self.removed as f64 / self.total_pixels as f64) * 100.0
    }
}

/// Whole-image cleaner
pub struct BulkCleaner;

impl BulkCleaner {
    /// Erase every bulk-white pixel in place
    pub fn clean(buffer: &mut RasterBuffer) -> BulkCleanResult {
        let total_pixels = buffer.len();

        let removed = buffer
            .as_raw_mut()
            .par_chunks_exact_mut(CHANNELS)
            .map(|px| {
                let rgba = [px[0], px[1], px[2], px[3]];
                if rgba[ALPHA] != 0 && Whiteness::Bulk.matches(rgba) {
                    px[ALPHA] = 0;
                    1
                } else {
                    0
                }
            })
            .sum::<usize>();

        info!("Deep clean removed {} additional pixels", removed);

        BulkCleanResult {
            removed,
            total_pixels,
        }
    }
}

// ============================================================
// Tests
// ============================================================
