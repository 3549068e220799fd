//! Common types for the image I/O module

use std::path::PathBuf;
use thiserror::Error;

// ============================================================
// Constants
// ============================================================

/// Largest accepted input file (10 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Editing canvas width limit
pub const DEFAULT_CANVAS_MAX_WIDTH: u32 = 801;

/// Editing canvas height limit
pub const DEFAULT_CANVAS_MAX_HEIGHT: u32 = 601;

/// File name used when the output path is a directory
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "processed-image.png";

/// Seed marker radius in pixels
pub const SEED_MARKER_RADIUS: i32 = 5;

/// Seed marker color (#ff0000)
pub const SEED_MARKER_COLOR: [u8; 4] = [255, 0, 0, 255];

// ============================================================
// Error Types
// ============================================================

/// Image I/O error types
#[derive(Debug, Error)]
pub enum ImageIoError {
    #[error("Image not found: {0}")]
    NotFound(PathBuf),

    #[error("File size {size} bytes exceeds limit of {limit} bytes")]
    TooLarge { size: u64, limit: u64 },

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ImageIoError>;
