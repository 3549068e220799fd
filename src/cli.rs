//! Command-line interface definitions

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::CliOverrides;
use crate::erase::IsolationScope;

/// Erase white backgrounds by clicking seed points
#[derive(Parser, Debug)]
#[command(name = "bg-eraser", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Erase light regions from an image and write a transparent PNG
    Erase(EraseArgs),
    /// Show version, config locations and classification thresholds
    Info,
}

/// Arguments for the erase command
#[derive(Args, Debug)]
pub struct EraseArgs {
    /// Input image (JPEG, PNG, GIF or WEBP)
    pub input: PathBuf,

    /// Output PNG file or directory
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Seed point, applied in order (repeatable)
    #[arg(
        short,
        long = "seed",
        value_name = "X,Y",
        value_parser = parse_seed,
        allow_hyphen_values = true
    )]
    pub seeds: Vec<(i64, i64)>,

    /// Run a deep clean after all seeds
    #[arg(long)]
    pub deep_clean: bool,

    /// Seeds are given in source image pixels instead of canvas pixels
    #[arg(long)]
    pub source_coords: bool,

    /// Keep the source resolution instead of fitting to the canvas
    #[arg(long)]
    pub no_fit: bool,

    /// Canvas width limit
    #[arg(long)]
    pub max_width: Option<u32>,

    /// Canvas height limit
    #[arg(long)]
    pub max_height: Option<u32>,

    /// Scan scope of the cleanup pass after each seed
    #[arg(long, value_enum)]
    pub isolation_scope: Option<IsolationScope>,

    /// Worker threads for whole-image passes
    #[arg(long)]
    pub threads: Option<usize>,

    /// Also write the original image with seed markers to this path
    #[arg(long)]
    pub preview: Option<PathBuf>,

    /// Print a JSON report instead of the text summary
    #[arg(long)]
    pub json: bool,

    /// Config file (default: ./bg-eraser.toml or the user config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Show what would be done without processing
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the summary
    #[arg(short, long)]
    pub quiet: bool,
}

impl EraseArgs {
    /// Overrides for values given explicitly on the command line
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            max_width: self.max_width,
            max_height: self.max_height,
            fit: self.no_fit.then_some(false),
            isolation_scope: self.isolation_scope,
            deep_clean: self.deep_clean.then_some(true),
            threads: self.threads,
        }
    }
}

/// Parse "X,Y" into a seed coordinate
pub fn parse_seed(value: &str) -> Result<(i64, i64), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{}'", value))?;

    let x = x
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid X in '{}': {}", value, e))?;
    let y = y
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid Y in '{}': {}", value, e))?;

    Ok((x, y))
}
