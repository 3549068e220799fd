//! Background erasure module
//!
//! Pixel classification and the three passes that make light background
//! pixels transparent:
//!
//! # Features
//!
//! - **Classification** ([`classify`]) - strict, loose and bulk whiteness tests
//! - **Region erasure** ([`region`]) - seed-based 8-connected flood fill
//! - **Isolation cleanup** ([`isolation`]) - removes fill stragglers next to
//!   erased pixels
//! - **Deep clean** ([`bulk`]) - seedless removal of bright, near-grey pixels
//!
//! # Example
//!
//! ```rust
//! use bg_eraser::{IsolationCleaner, IsolationScope, RasterBuffer, RegionEraser};
//!
//! let mut buffer = RasterBuffer::from_pixel(4, 4, [255, 255, 255, 255]);
//! let region = RegionEraser::erase_from_seed(&mut buffer, 0, 0);
//! IsolationCleaner::clean(&mut buffer, IsolationScope::Full, region.bounds);
//!
//! assert_eq!(buffer.erased_count(), 16);
//! ```

pub mod bulk;
pub mod classify;
pub mod isolation;
pub mod region;

// Re-export public API
pub use bulk::{BulkCleanResult, BulkCleaner};
pub use classify::{PixelClassifier, Whiteness};
pub use isolation::{IsolationCleaner, IsolationResult, IsolationScope};
pub use region::{RegionEraseResult, RegionEraser};

/// 8-connected neighbor offsets: cardinal first, then diagonal
pub(crate) const NEIGHBORS_8: [(i64, i64); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];
