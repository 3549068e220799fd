//! bg-eraser - seed-based white background removal
//!
//! Load an image, click on light background areas, and the connected
//! white region becomes transparent. Two follow-up passes mop up what the
//! flood fill leaves behind.
//!
//! # Modules
//!
//! - [`raster`] - owned RGBA8 pixel buffer
//! - [`erase`] - whiteness tests, flood fill, isolation cleanup, deep clean
//! - [`session`] - original/current buffers and the edit operations
//! - [`image_io`] - file validation, decoding, canvas fitting, PNG export
//! - [`config`] - TOML configuration with CLI overrides
//! - [`cli`] / [`report`] - command-line front-end
//!
//! # Example
//!
//! ```rust
//! use bg_eraser::{EditSession, RasterBuffer};
//!
//! let mut session = EditSession::new();
//! session.load(RasterBuffer::from_pixel(4, 4, [255, 255, 255, 255])).unwrap();
//!
//! let outcome = session.click(0, 0).unwrap();
//! assert_eq!(outcome.erased, 16);
//!
//! session.reset().unwrap();
//! assert_eq!(session.current(), session.original());
//! ```

pub mod cli;
pub mod config;
pub mod erase;
pub mod image_io;
pub mod raster;
pub mod report;
pub mod session;

// Re-export public API
pub use cli::{Cli, Commands, EraseArgs};
pub use config::{CliOverrides, Config, ConfigError, EraserConfig};
pub use erase::{
    BulkCleanResult, BulkCleaner, IsolationCleaner, IsolationResult, IsolationScope,
    PixelClassifier, RegionEraseResult, RegionEraser, Whiteness,
};
pub use image_io::{ImageIoError, ImageLoader, LoadOptions, LoadedImage, PngExporter};
pub use raster::{Bounds, RasterBuffer, RasterError};
pub use report::{EraseReport, SeedReport};
pub use session::{ClickOutcome, EditSession, SessionError, SessionOptions, SessionState};

/// Process exit codes
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// Unspecified failure
    pub const GENERAL_ERROR: i32 = 1;
    /// Bad command-line arguments or configuration
    pub const INVALID_ARGS: i32 = 2;
    /// Input file does not exist
    pub const INPUT_NOT_FOUND: i32 = 3;
    /// Input exists but cannot be used (size, format, decoding, empty image)
    pub const INVALID_INPUT: i32 = 4;
}
