//! PNG export and seed preview rendering

use image::{ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_circle_mut;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::info;

use super::types::{ImageIoError, Result, SEED_MARKER_COLOR, SEED_MARKER_RADIUS};
use crate::raster::RasterBuffer;

/// PNG encoder for edited buffers
pub struct PngExporter;

impl PngExporter {
    /// Encode a buffer as PNG bytes
    pub fn encode(buffer: &RasterBuffer) -> Result<Vec<u8>> {
        Self::encode_image(&buffer.to_rgba_image())
    }

    /// Encode a buffer and write it to `path`.
    ///
    /// The file is always PNG, whatever its extension says.
    pub fn save(buffer: &RasterBuffer, path: &Path) -> Result<()> {
        let bytes = Self::encode(buffer)?;
        std::fs::write(path, &bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "PNG written");
        Ok(())
    }

    /// Resolve the output file: directories get `file_name` appended
    pub fn resolve_output_path(output: &Path, file_name: &str) -> PathBuf {
        if output.is_dir() {
            output.join(file_name)
        } else {
            output.to_path_buf()
        }
    }

    /// Copy of `buffer` with a red dot at every seed
    pub fn render_seed_preview(buffer: &RasterBuffer, seeds: &[(i64, i64)]) -> RgbaImage {
        let mut image = buffer.to_rgba_image();
        for &(x, y) in seeds {
            draw_filled_circle_mut(
                &mut image,
                (Self::to_i32(x), Self::to_i32(y)),
                SEED_MARKER_RADIUS,
                Rgba(SEED_MARKER_COLOR),
            );
        }
        image
    }

    /// Render the seed preview and write it as PNG
    pub fn save_seed_preview(buffer: &RasterBuffer, seeds: &[(i64, i64)], path: &Path) -> Result<()> {
        let bytes = Self::encode_image(&Self::render_seed_preview(buffer, seeds))?;
        std::fs::write(path, &bytes)?;
        info!(path = %path.display(), seeds = seeds.len(), "Seed preview written");
        Ok(())
    }

    fn encode_image(image: &RgbaImage) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| ImageIoError::Encode(e.to_string()))?;
        Ok(bytes)
    }

    fn to_i32(v: i64) -> i32 {
        v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }
}

// ============================================================
// Tests
// ============================================================
