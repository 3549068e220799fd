//! Raster buffer module
//!
//! Owned RGBA8 pixel storage shared by the erasure passes and the edit
//! session.
//!
//! # Layout
//!
//! Pixels are stored row-major, 4 bytes each (R, G, B, A). A pixel with
//! alpha 0 is erased and is never considered again by any erasure pass.

mod buffer;
mod types;

// Re-export public API
pub use buffer::RasterBuffer;
pub use types::{Bounds, RasterError, Result, ALPHA, CHANNELS};
