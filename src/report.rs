//! Erase run report
//!
//! Collected by the CLI after processing and printed either as a short text
//! summary or as JSON.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::EraserConfig;
use crate::erase::BulkCleanResult;
use crate::raster::RasterBuffer;
use crate::session::ClickOutcome;

/// Per-seed entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub x: i64,
    pub y: i64,
    pub in_bounds: bool,
    pub erased: usize,
    pub cleaned: usize,
}

impl From<&ClickOutcome> for SeedReport {
    fn from(outcome: &ClickOutcome) -> Self {
        Self {
            x: outcome.seed.0,
            y: outcome.seed.1,
            in_bounds: outcome.in_bounds,
            erased: outcome.erased,
            cleaned: outcome.cleaned,
        }
    }
}

/// Summary of one erase run
#[derive(Debug, Clone, Serialize)]
pub struct EraseReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub source_size: (u32, u32),
    pub canvas_size: (u32, u32),
    pub scale: f64,
    pub seeds: Vec<SeedReport>,
    pub deep_clean_removed: Option<usize>,
    pub transparent_pixels: usize,
    pub total_pixels: usize,
    pub elapsed_seconds: f64,
    pub config: EraserConfig,
}

impl EraseReport {
    /// Start a report for an input/output pair
    pub fn new(input: &Path, output: &Path, config: &EraserConfig) -> Self {
        Self {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            source_size: (0, 0),
            canvas_size: (0, 0),
            scale: 1.0,
            seeds: Vec::new(),
            deep_clean_removed: None,
            transparent_pixels: 0,
            total_pixels: 0,
            elapsed_seconds: 0.0,
            config: config.clone(),
        }
    }

    /// Record a click
    pub fn add_click(&mut self, outcome: &ClickOutcome) {
        self.seeds.push(SeedReport::from(outcome));
    }

    /// Record a deep clean
    pub fn set_deep_clean(&mut self, result: &BulkCleanResult) {
        self.deep_clean_removed = Some(result.removed);
    }

    /// Record the final buffer
    pub fn set_result(&mut self, buffer: &RasterBuffer) {
        self.canvas_size = buffer.dimensions();
        self.transparent_pixels = buffer.erased_count();
        self.total_pixels = buffer.len();
    }

    /// Seeds that fell outside the canvas
    pub fn ignored_seeds(&self) -> usize {
        self.seeds.iter().filter(|s| !s.in_bounds).count()
    }

    /// Transparent share of the output, in percent
    pub fn transparent_percent(&self) -> f64 {
        if self.total_pixels == 0 {
            return 0.0;
        }
        (self.transparent_pixels as f64 / self.total_pixels as f64) * 100.0
    }

    /// Serialize as pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Human-readable summary lines
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        let (cw, ch) = self.canvas_size;
        let (sw, sh) = self.source_size;
        if self.scale < 1.0 {
            lines.push(format!(
                "Input:  {} ({}x{}, fitted from {}x{})",
                self.input.display(),
                cw,
                ch,
                sw,
                sh
            ));
        } else {
            lines.push(format!("Input:  {} ({}x{})", self.input.display(), cw, ch));
        }

        let ignored = self.ignored_seeds();
        if ignored > 0 {
            lines.push(format!("Seeds:  {} ({} outside image)", self.seeds.len(), ignored));
        } else {
            lines.push(format!("Seeds:  {}", self.seeds.len()));
        }
        for (i, seed) in self.seeds.iter().enumerate() {
            if seed.in_bounds {
                lines.push(format!(
                    "  [{}] ({}, {}): erased {}, cleaned {}",
                    i + 1,
                    seed.x,
                    seed.y,
                    seed.erased,
                    seed.cleaned
                ));
            } else {
                lines.push(format!("  [{}] ({}, {}): ignored", i + 1, seed.x, seed.y));
            }
        }

        if let Some(removed) = self.deep_clean_removed {
            lines.push(format!("Deep clean: removed {} pixels", removed));
        }

        lines.push(format!(
            "Transparent: {}/{} ({:.1}%)",
            self.transparent_pixels,
            self.total_pixels,
            self.transparent_percent()
        ));
        lines.push(format!("Output: {}", self.output.display()));
        lines.push(format!("Total time: {:.2}s", self.elapsed_seconds));
        lines
    }

    /// Print the summary to stdout
    pub fn print_summary(&self) {
        for line in self.summary_lines() {
            println!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(seed: (i64, i64), in_bounds: bool, erased: usize, cleaned: usize) -> ClickOutcome {
        ClickOutcome {
            seed,
            in_bounds,
            erased,
            cleaned,
            bounds: None,
        }
    }

    fn sample_report() -> EraseReport {
        let mut report = EraseReport::new(
            Path::new("in.png"),
            Path::new("out.png"),
            &EraserConfig::default(),
        );
        report.source_size = (8, 4);
        report.add_click(&outcome((0, 0), true, 10, 2));
        report.add_click(&outcome((-5, 1), false, 0, 0));
        report.set_deep_clean(&BulkCleanResult {
            removed: 3,
            total_pixels: 32,
        });

        let mut buffer = RasterBuffer::from_pixel(8, 4, [0, 0, 0, 255]);
        for x in 0..8 {
            buffer.erase(x, 0);
        }
        report.set_result(&buffer);
        report
    }

    #[test]
    fn test_report_counts() {
        let report = sample_report();
        assert_eq!(report.seeds.len(), 2);
        assert_eq!(report.ignored_seeds(), 1);
        assert_eq!(report.canvas_size, (8, 4));
        assert_eq!(report.transparent_pixels, 8);
        assert_eq!(report.total_pixels, 32);
        assert!((report.transparent_percent() - 25.0).abs() < 0.001);
    }

    #[test]
    fn test_summary_lines() {
        let lines = sample_report().summary_lines();
        assert_eq!(lines[0], "Input:  in.png (8x4)");
        assert_eq!(lines[1], "Seeds:  2 (1 outside image)");
        assert_eq!(lines[2], "  [1] (0, 0): erased 10, cleaned 2");
        assert_eq!(lines[3], "  [2] (-5, 1): ignored");
        assert_eq!(lines[4], "Deep clean: removed 3 pixels");
        assert_eq!(lines[5], "Transparent: 8/32 (25.0%)");
        assert_eq!(lines[6], "Output: out.png");
    }

    #[test]
    fn test_summary_mentions_fitting() {
        let mut report = sample_report();
        report.source_size = (16, 8);
        report.scale = 0.5;
        assert_eq!(report.summary_lines()[0], "Input:  in.png (8x4, fitted from 16x8)");
    }

    #[test]
    fn test_json_report() {
        let json = sample_report().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["seeds"][0]["erased"], 10);
        assert_eq!(value["seeds"][1]["in_bounds"], false);
        assert_eq!(value["deep_clean_removed"], 3);
        assert_eq!(value["canvas_size"][0], 8);
        assert_eq!(value["config"]["max_width"], 801);
    }

    #[test]
    fn test_empty_report_percent() {
        let report = EraseReport::new(Path::new("a"), Path::new("b"), &EraserConfig::default());
        assert_eq!(report.transparent_percent(), 0.0);
        assert!(report.summary_lines().iter().all(|l| !l.starts_with("Deep clean")));
    }
}
