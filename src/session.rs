//! Edit session
//!
//! Holds the loaded image as an immutable original plus a mutable working
//! copy, and routes user operations to the erasure passes.
//!
//! # States
//!
//! - `Empty` - nothing loaded; only `load` and `new_image` are accepted
//! - `Editing` - original + current buffers present
//!
//! Every operation runs to completion before returning. The session owns
//! both buffers exclusively, so no two operations can touch them at once.

use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

use crate::erase::{BulkCleanResult, BulkCleaner, IsolationCleaner, IsolationScope, RegionEraser};
use crate::image_io::{ImageIoError, PngExporter};
use crate::raster::{Bounds, RasterBuffer};

// ============================================================
// Error Types
// ============================================================

/// Session error types
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Cannot {operation}: no image loaded")]
    InvalidState { operation: &'static str },

    #[error("Export failed: {0}")]
    Encode(#[from] ImageIoError),
}

pub type Result<T> = std::result::Result<T, SessionError>;

// ============================================================
// Types
// ============================================================

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Empty,
    Editing,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Empty => write!(f, "Empty"),
            SessionState::Editing => write!(f, "Editing"),
        }
    }
}

/// Session behavior options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Scan scope of the cleanup pass after each click
    pub isolation_scope: IsolationScope,
}

impl SessionOptions {
    /// Set the isolation cleanup scope
    pub fn with_isolation_scope(mut self, scope: IsolationScope) -> Self {
        self.isolation_scope = scope;
        self
    }
}

/// Result of one click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickOutcome {
    /// Seed in buffer coordinates
    pub seed: (i64, i64),
    /// False when the seed fell outside the buffer
    pub in_bounds: bool,
    /// Pixels removed by the flood fill
    pub erased: usize,
    /// Pixels removed by the isolation cleanup
    pub cleaned: usize,
    /// Bounding box of the flood fill
    pub bounds: Option<Bounds>,
}

impl ClickOutcome {
    fn ignored(seed: (i64, i64)) -> Self {
        Self {
            seed,
            in_bounds: false,
            erased: 0,
            cleaned: 0,
            bounds: None,
        }
    }

    /// Pixels removed by both passes
    pub fn total_removed(&self) -> usize {
        self.erased + self.cleaned
    }
}

struct Images {
    original: RasterBuffer,
    current: RasterBuffer,
}

// ============================================================
// Session
// ============================================================

/// Single-image editing session
#[derive(Default)]
pub struct EditSession {
    images: Option<Images>,
    options: SessionOptions,
}

impl EditSession {
    /// Create an empty session with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session with the given options
    pub fn with_options(options: SessionOptions) -> Self {
        Self {
            images: None,
            options,
        }
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn state(&self) -> SessionState {
        if self.images.is_some() {
            SessionState::Editing
        } else {
            SessionState::Empty
        }
    }

    pub fn is_editing(&self) -> bool {
        self.images.is_some()
    }

    /// Working buffer, if an image is loaded
    pub fn current(&self) -> Option<&RasterBuffer> {
        self.images.as_ref().map(|i| &i.current)
    }

    /// Snapshot taken at load time, if an image is loaded
    pub fn original(&self) -> Option<&RasterBuffer> {
        self.images.as_ref().map(|i| &i.original)
    }

    /// Start editing `buffer`, replacing any image already loaded.
    ///
    /// Zero-sized buffers are rejected and leave the session unchanged.
    pub fn load(&mut self, buffer: RasterBuffer) -> Result<()> {
        if buffer.is_empty() {
            return Err(SessionError::InvalidInput(format!(
                "image has zero dimension ({}x{})",
                buffer.width(),
                buffer.height()
            )));
        }

        if self.images.is_some() {
            debug!("Replacing previously loaded image");
        }
        info!(width = buffer.width(), height = buffer.height(), "Session loaded");

        self.images = Some(Images {
            current: buffer.clone(),
            original: buffer,
        });
        Ok(())
    }

    /// Erase the white region under the seed, then clean up stragglers.
    ///
    /// Out-of-bounds seeds are ignored.
    pub fn click(&mut self, x: i64, y: i64) -> Result<ClickOutcome> {
        let scope = self.options.isolation_scope;
        let images = self.images_mut("click")?;
        let current = &mut images.current;

        if !current.in_bounds(x, y) {
            debug!(x, y, "Click outside image ignored");
            return Ok(ClickOutcome::ignored((x, y)));
        }

        let region = RegionEraser::erase_from_seed(current, x, y);
        if region.is_empty() {
            debug!(x, y, "Seed pixel is not background, nothing erased");
        }
        let isolation = IsolationCleaner::clean(current, scope, region.bounds);

        let outcome = ClickOutcome {
            seed: (x, y),
            in_bounds: true,
            erased: region.erased,
            cleaned: isolation.cleaned,
            bounds: region.bounds,
        };
        debug!(
            x,
            y,
            erased = outcome.erased,
            cleaned = outcome.cleaned,
            "Click processed"
        );
        Ok(outcome)
    }

    /// Remove every bright, near-grey pixel regardless of connectivity
    pub fn deep_clean(&mut self) -> Result<BulkCleanResult> {
        let images = self.images_mut("deep clean")?;
        Ok(BulkCleaner::clean(&mut images.current))
    }

    /// Restore the working buffer from the original snapshot
    pub fn reset(&mut self) -> Result<()> {
        let images = self.images_mut("reset")?;
        images.current = images.original.clone();
        debug!("Working buffer restored from original");
        Ok(())
    }

    /// Drop both buffers and return to `Empty`
    pub fn new_image(&mut self) {
        if self.images.take().is_some() {
            debug!("Session cleared");
        }
    }

    /// Copy of the working buffer
    pub fn export(&self) -> Result<RasterBuffer> {
        self.images("export")
            .map(|images| images.current.clone())
    }

    /// Working buffer encoded as PNG
    pub fn export_png(&self) -> Result<Vec<u8>> {
        let images = self.images("export")?;
        Ok(PngExporter::encode(&images.current)?)
    }

    fn images(&self, operation: &'static str) -> Result<&Images> {
        self.images
            .as_ref()
            .ok_or(SessionError::InvalidState { operation })
    }

    fn images_mut(&mut self, operation: &'static str) -> Result<&mut Images> {
        self.images
            .as_mut()
            .ok_or(SessionError::InvalidState { operation })
    }
}

// ============================================================
// Tests
// ============================================================
