//! Configuration file support
//!
//! Settings come from a TOML file, searched in order:
//!
//! 1. `./bg-eraser.toml`
//! 2. `<config_dir>/bg-eraser/config.toml`
//!
//! Missing files fall back to defaults. Command-line values override the
//! file only when given explicitly.
//!
//! ```toml
//! [canvas]
//! max_width = 801
//! max_height = 601
//! fit = true
//!
//! [input]
//! max_file_size = 10485760
//!
//! [processing]
//! isolation_scope = "full"   # or "bounding-box"
//! deep_clean = false
//! threads = 4
//!
//! [output]
//! file_name = "processed-image.png"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::erase::IsolationScope;
use crate::image_io::{
    LoadOptions, DEFAULT_CANVAS_MAX_HEIGHT, DEFAULT_CANVAS_MAX_WIDTH, DEFAULT_MAX_FILE_SIZE,
    DEFAULT_OUTPUT_FILE_NAME,
};
use crate::session::SessionOptions;

/// Local config file name
pub const LOCAL_CONFIG_FILE: &str = "bg-eraser.toml";

/// Directory under the user config dir
pub const CONFIG_DIR_NAME: &str = "bg-eraser";

/// File name inside the user config dir
pub const USER_CONFIG_FILE: &str = "config.toml";

// ============================================================
// Error Types
// ============================================================

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

// ============================================================
// File Sections
// ============================================================

/// `[canvas]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub max_width: u32,
    pub max_height: u32,
    pub fit: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_CANVAS_MAX_WIDTH,
            max_height: DEFAULT_CANVAS_MAX_HEIGHT,
            fit: true,
        }
    }
}

/// `[input]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub max_file_size: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

/// `[processing]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    pub isolation_scope: IsolationScope,
    pub deep_clean: bool,
    pub threads: Option<usize>,
}

/// `[output]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub file_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_OUTPUT_FILE_NAME.to_string(),
        }
    }
}

/// Configuration file contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub canvas: CanvasConfig,
    pub input: InputConfig,
    pub processing: ProcessingConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Load from the first config file found, or defaults
    pub fn load() -> Result<Self> {
        for path in Self::search_paths() {
            if path.is_file() {
                debug!(path = %path.display(), "Loading config");
                return Self::load_from_path(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load from an explicit file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Candidate config files in priority order
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join(CONFIG_DIR_NAME).join(USER_CONFIG_FILE));
        }
        paths
    }

    /// Apply command-line overrides (CLI wins)
    pub fn merge_with_cli(&self, cli: &CliOverrides) -> EraserConfig {
        EraserConfig {
            max_width: cli.max_width.unwrap_or(self.canvas.max_width).max(1),
            max_height: cli.max_height.unwrap_or(self.canvas.max_height).max(1),
            fit_to_canvas: cli.fit.unwrap_or(self.canvas.fit),
            max_file_size: self.input.max_file_size,
            isolation_scope: cli.isolation_scope.unwrap_or(self.processing.isolation_scope),
            deep_clean: cli.deep_clean.unwrap_or(self.processing.deep_clean),
            threads: cli.threads.or(self.processing.threads),
            output_file_name: self.output.file_name.clone(),
        }
    }
}

// ============================================================
// CLI Overrides
// ============================================================

/// Values explicitly set on the command line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub fit: Option<bool>,
    pub isolation_scope: Option<IsolationScope>,
    pub deep_clean: Option<bool>,
    pub threads: Option<usize>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================
// Effective Configuration
// ============================================================

/// Effective settings after merging file and CLI
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EraserConfig {
    pub max_width: u32,
    pub max_height: u32,
    pub fit_to_canvas: bool,
    pub max_file_size: u64,
    pub isolation_scope: IsolationScope,
    pub deep_clean: bool,
    pub threads: Option<usize>,
    pub output_file_name: String,
}

impl Default for EraserConfig {
    fn default() -> Self {
        Config::default().merge_with_cli(&CliOverrides::default())
    }
}

impl EraserConfig {
    /// Loader options for these settings
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions::builder()
            .max_file_size(self.max_file_size)
            .fit_to_canvas(self.fit_to_canvas)
            .canvas_size(self.max_width, self.max_height)
            .build()
    }

    /// Session options for these settings
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions::default().with_isolation_scope(self.isolation_scope)
    }
}

// ============================================================
// Tests
// ============================================================
