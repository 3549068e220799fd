//! bg-eraser - seed-based white background removal
//!
//! CLI entry point

use anyhow::Context;
use bg_eraser::{
    erase::classify, exit_codes, image_io::SUPPORTED_FORMATS, Cli, Commands, Config, ConfigError,
    EditSession, EraseArgs, EraseReport, EraserConfig, ImageIoError, ImageLoader, PngExporter,
    SessionError,
};
use clap::Parser;
use std::path::Path;
use std::time::Instant;
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Erase(args) => {
            init_tracing(args.verbose);
            run_erase(&args)
        }
        Commands::Info => {
            init_tracing(0);
            run_info()
        }
    };

    std::process::exit(match result {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_code_for(&e)
        }
    });
}

/// Install the fmt subscriber; RUST_LOG wins over -v
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}

/// Map an error chain to a process exit code
fn exit_code_for(error: &anyhow::Error) -> i32 {
    for cause in error.chain() {
        if let Some(e) = cause.downcast_ref::<ImageIoError>() {
            return match e {
                ImageIoError::NotFound(_) => exit_codes::INPUT_NOT_FOUND,
                ImageIoError::TooLarge { .. }
                | ImageIoError::UnsupportedFormat(_)
                | ImageIoError::Decode(_) => exit_codes::INVALID_INPUT,
                _ => exit_codes::GENERAL_ERROR,
            };
        }
        if let Some(SessionError::InvalidInput(_)) = cause.downcast_ref::<SessionError>() {
            return exit_codes::INVALID_INPUT;
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return exit_codes::INVALID_ARGS;
        }
    }
    exit_codes::GENERAL_ERROR
}

// ============ Erase Command ============

fn run_erase(args: &EraseArgs) -> anyhow::Result<()> {
    let start_time = Instant::now();

    let file_config = match &args.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load().unwrap_or_else(|e| {
            warn!("Ignoring config file: {}", e);
            Config::default()
        }),
    };
    let config = file_config.merge_with_cli(&args.overrides());

    if let Some(threads) = config.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure worker threads")?;
    }

    let output_path = PngExporter::resolve_output_path(&args.output, &config.output_file_name);

    if args.dry_run {
        print_execution_plan(args, &config, &output_path);
        return Ok(());
    }

    let loaded = ImageLoader::load(&args.input, &config.load_options())
        .with_context(|| format!("Failed to load {}", args.input.display()))?;

    let seeds: Vec<(i64, i64)> = args
        .seeds
        .iter()
        .map(|&(x, y)| {
            if args.source_coords {
                loaded.to_canvas_coords(x, y)
            } else {
                (x, y)
            }
        })
        .collect();

    let mut report = EraseReport::new(&args.input, &output_path, &config);
    report.source_size = loaded.source_size;
    report.scale = loaded.scale;

    let mut session = EditSession::with_options(config.session_options());
    session.load(loaded.buffer)?;

    for &(x, y) in &seeds {
        let outcome = session.click(x, y)?;
        report.add_click(&outcome);
    }

    if config.deep_clean {
        let result = session.deep_clean()?;
        report.set_deep_clean(&result);
    }

    let png = session.export_png()?;
    std::fs::write(&output_path, &png)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    if let Some(preview_path) = &args.preview {
        if let Some(original) = session.original() {
            PngExporter::save_seed_preview(original, &seeds, preview_path)
                .with_context(|| format!("Failed to write preview {}", preview_path.display()))?;
        }
    }

    if let Some(current) = session.current() {
        report.set_result(current);
    }
    report.elapsed_seconds = start_time.elapsed().as_secs_f64();

    if args.json {
        println!("{}", report.to_json()?);
    } else if !args.quiet {
        report.print_summary();
    }

    Ok(())
}

/// Print execution plan for dry-run mode
fn print_execution_plan(args: &EraseArgs, config: &EraserConfig, output_path: &Path) {
    println!("=== Dry Run - Execution Plan ===");
    println!();
    println!("Input: {}", args.input.display());
    println!("Output: {}", output_path.display());
    println!();
    println!("Steps:");
    if config.fit_to_canvas {
        println!(
            "  1. Load and fit to canvas ({}x{})",
            config.max_width, config.max_height
        );
    } else {
        println!("  1. Load at source resolution");
    }
    if args.seeds.is_empty() {
        println!("  2. Seeds: none");
    } else {
        let space = if args.source_coords { "source" } else { "canvas" };
        println!("  2. Seeds ({} coordinates):", space);
        for (i, (x, y)) in args.seeds.iter().enumerate() {
            println!("     {}. ({}, {})", i + 1, x, y);
        }
    }
    println!("     Isolation cleanup scope: {:?}", config.isolation_scope);
    if config.deep_clean {
        println!("  3. Deep Clean: ENABLED");
    } else {
        println!("  3. Deep Clean: DISABLED");
    }
    println!("  4. Write PNG");
    if let Some(preview) = &args.preview {
        println!("     Seed preview: {}", preview.display());
    }
    println!();
    println!(
        "Threads: {}",
        config.threads.unwrap_or_else(num_cpus::get)
    );
    println!("Max input size: {} bytes", config.max_file_size);
}

// ============ Info Command ============

fn run_info() -> anyhow::Result<()> {
    println!("bg-eraser v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("System Information:");
    println!("  Platform: {}", std::env::consts::OS);
    println!("  Arch: {}", std::env::consts::ARCH);
    println!("  CPUs: {}", num_cpus::get());

    println!();
    println!("Supported Input Formats:");
    let formats: Vec<String> = SUPPORTED_FORMATS.iter().map(|f| format!("{:?}", f)).collect();
    println!("  {}", formats.join(", "));

    println!();
    println!("Whiteness Thresholds:");
    println!(
        "  Strict (flood fill): alpha > {}, brightness >= {}%, RGB >= {}",
        classify::STRICT_MIN_ALPHA,
        classify::STRICT_MIN_BRIGHTNESS,
        classify::STRICT_MIN_CHANNEL
    );
    println!(
        "  Loose (cleanup):     alpha > 0, brightness >= {}%, RGB >= {}",
        classify::LOOSE_MIN_BRIGHTNESS,
        classify::LOOSE_MIN_CHANNEL
    );
    println!(
        "  Bulk (deep clean):   alpha > 0, brightness >= {}%, RGB >= {}, variance < {}",
        classify::BULK_MIN_BRIGHTNESS,
        classify::BULK_MIN_CHANNEL,
        classify::BULK_MAX_VARIANCE
    );

    println!();
    println!("Config File Locations:");
    for path in Config::search_paths() {
        let status = if path.is_file() { "found" } else { "not found" };
        println!("  {} ({})", path.display(), status);
    }

    Ok(())
}
