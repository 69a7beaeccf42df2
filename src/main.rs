//! CLI entry point for diskuse

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use diskuse::{Analyzer, Order, OutputConfig, Report, ScanMode, WalkerConfig, print_json, print_report};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // https://no-color.org/
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "diskuse")]
#[command(about = "Summarize disk usage and report the largest files under a directory")]
#[command(version)]
struct Args {
    /// Directory to analyze
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Number of files to report
    #[arg(short = 'n', long = "top", default_value = "10")]
    top: usize,

    /// Report every file, sorted, instead of the top N
    #[arg(long = "all-files")]
    all_files: bool,

    /// Report the smallest files instead of the largest
    #[arg(long = "smallest")]
    smallest: bool,

    /// Walk the tree on demand instead of scanning it up front
    #[arg(short = 's', long = "stream")]
    stream: bool,

    /// Also list every file with its size
    #[arg(short = 'l', long = "list")]
    list: bool,

    /// Ignore entries whose name matches pattern (can be used multiple times)
    #[arg(short = 'I', long = "ignore")]
    ignore: Vec<String>,

    /// Descend only N levels deep
    #[arg(short = 'L', long = "level")]
    level: Option<usize>,

    /// Output in JSON format
    #[arg(long = "json")]
    json: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,
}

/// Log to stderr, filtered by `DISKUSE_LOG` (default `warn`).
fn init_logger() {
    let filter = EnvFilter::try_from_env("DISKUSE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logger();

    let config = WalkerConfig {
        ignore_patterns: args.ignore.clone(),
        max_depth: args.level,
    };
    let mode = if args.stream {
        ScanMode::Streaming
    } else {
        ScanMode::Eager
    };
    let order = if args.smallest {
        Order::Smallest
    } else {
        Order::Largest
    };
    let limit = if args.all_files { None } else { Some(args.top) };

    let mut analyzer = match Analyzer::builder(&args.path).mode(mode).config(config).build() {
        Ok(analyzer) => analyzer,
        Err(e) => {
            eprintln!("diskuse: {}", e);
            process::exit(1);
        }
    };

    let report = Report::collect(&mut analyzer, limit, order, args.list);

    let result = if args.json {
        print_json(&report)
    } else {
        let output_config = OutputConfig {
            use_color: should_use_color(args.color),
            list_files: args.list,
        };
        print_report(&report, output_config)
    };

    if let Err(e) = result {
        eprintln!("diskuse: error writing output: {}", e);
        process::exit(1);
    }
}
