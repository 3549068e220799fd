//! Isolated light pixel cleanup
//!
//! After a region erasure, light pixels that sit mostly among erased
//! neighbors are stragglers of the fill. A pixel is removed when it is
//! loose-white and at least 4 of its 8 neighbors are transparent.
//!
//! Decisions are collected first and applied afterwards, so every pixel is
//! judged against the buffer as it was before the pass. Border pixels are
//! never examined.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::classify::Whiteness;
use super::NEIGHBORS_8;
use crate::raster::{Bounds, RasterBuffer};

/// Transparent neighbors needed to remove a pixel (half of 8)
pub const MIN_TRANSPARENT_NEIGHBORS: usize = 4;

/// How much of the buffer the cleanup pass scans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum IsolationScope {
    /// Every interior pixel
    #[default]
    Full,
    /// Only the last erased region's bounds plus one surrounding ring
    BoundingBox,
}

/// Outcome of one cleanup pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsolationResult {
    /// Pixels made transparent
    pub cleaned: usize,
    /// Pixels examined
    pub scanned: usize,
}

/// Straggler cleanup pass
pub struct IsolationCleaner;

impl IsolationCleaner {
    /// Run the pass with the given scope.
    ///
    /// `erased` is the bounding box from the preceding region erasure; the
    /// bounding-box scope does nothing when it is absent.
    pub fn clean(
        buffer: &mut RasterBuffer,
        scope: IsolationScope,
        erased: Option<Bounds>,
    ) -> IsolationResult {
        match scope {
            IsolationScope::Full => Self::clean_full(buffer),
            IsolationScope::BoundingBox => match erased {
                Some(bounds) => Self::clean_within(buffer, bounds.expand(1)),
                None => IsolationResult::default(),
            },
        }
    }

    /// Scan every interior pixel
    pub fn clean_full(buffer: &mut RasterBuffer) -> IsolationResult {
        match Self::interior(buffer) {
            Some(window) => Self::clean_window(buffer, window),
            None => IsolationResult::default(),
        }
    }

    /// Scan the intersection of `window` with the interior
    pub fn clean_within(buffer: &mut RasterBuffer, window: Bounds) -> IsolationResult {
        let Some(interior) = Self::interior(buffer) else {
            return IsolationResult::default();
        };

        let clipped = Bounds {
            min_x: window.min_x.max(interior.min_x),
            min_y: window.min_y.max(interior.min_y),
            max_x: window.max_x.min(interior.max_x),
            max_y: window.max_y.min(interior.max_y),
        };
        if clipped.min_x > clipped.max_x || clipped.min_y > clipped.max_y {
            return IsolationResult::default();
        }

        Self::clean_window(buffer, clipped)
    }

    /// Interior rectangle, absent for buffers thinner than 3 pixels
    fn interior(buffer: &RasterBuffer) -> Option<Bounds> {
        let (width, height) = buffer.dimensions();
        if width < 3 || height < 3 {
            return None;
        }
        Some(Bounds {
            min_x: 1,
            min_y: 1,
            max_x: width - 2,
            max_y: height - 2,
        })
    }

    fn clean_window(buffer: &mut RasterBuffer, window: Bounds) -> IsolationResult {
        let snapshot: &RasterBuffer = buffer;
        let marks: Vec<(u32, u32)> = (window.min_y..=window.max_y)
            .into_par_iter()
            .flat_map_iter(|y| {
                (window.min_x..=window.max_x)
                    .filter(move |&x| Self::is_straggler(snapshot, x, y))
                    .map(move |x| (x, y))
            })
            .collect();

        for &(x, y) in &marks {
            buffer.erase(x, y);
        }

        let result = IsolationResult {
            cleaned: marks.len(),
            scanned: window.width() as usize * window.height() as usize,
        };
        debug!(
            cleaned = result.cleaned,
            scanned = result.scanned,
            "Isolation cleanup finished"
        );
        result
    }

    /// Loose-white pixel with enough transparent neighbors.
    /// Caller guarantees (x, y) is interior.
    fn is_straggler(buffer: &RasterBuffer, x: u32, y: u32) -> bool {
        let Some(rgba) = buffer.pixel(x, y) else {
            return false;
        };
        if rgba[3] == 0 || !Whiteness::Loose.matches(rgba) {
            return false;
        }

        let transparent = NEIGHBORS_8
            .iter()
            .filter(|(dx, dy)| {
                let nx = (x as i64 + dx) as u32;
                let ny = (y as i64 + dy) as u32;
                buffer.is_erased(nx, ny)
            })
            .count();

        transparent >= MIN_TRANSPARENT_NEIGHBORS
    }
}

// ============================================================
// Tests
// ============================================================
