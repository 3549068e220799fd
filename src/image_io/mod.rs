//! Image I/O module
//!
//! Everything between files on disk and the in-memory editor:
//!
//! - **Loading** ([`loader`]) - size and format validation, decoding to
//!   RGBA8, downscaling to the editing canvas
//! - **Export** ([`export`]) - PNG encoding and seed preview markers
//!
//! The erasure passes and the edit session never touch the file system;
//! they only see [`RasterBuffer`](crate::RasterBuffer)s handed over from here.

pub mod export;
pub mod loader;
mod types;

// Re-export public API
pub use export::PngExporter;
pub use loader::{ImageLoader, LoadOptions, LoadOptionsBuilder, LoadedImage, SUPPORTED_FORMATS};
pub use types::{
    ImageIoError, Result, DEFAULT_CANVAS_MAX_HEIGHT, DEFAULT_CANVAS_MAX_WIDTH,
    DEFAULT_MAX_FILE_SIZE, DEFAULT_OUTPUT_FILE_NAME, SEED_MARKER_COLOR, SEED_MARKER_RADIUS,
};
