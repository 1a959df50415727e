use crate::scenes::Preset;
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

/// Log levels accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Render a demo scene with the Lumen path tracer.
///
/// Flags override values read from `--config`.
#[derive(Debug, Parser)]
#[command(name = "lumen", version, about)]
pub struct Args {
    /// JSON file with `camera`, `render` and `scene` sections
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Scene to render
    #[arg(short, long, value_enum)]
    pub scene: Option<Preset>,

    /// Output image (.ppm, or any format the image crate writes such as .png)
    #[arg(short, long, default_value = "output.ppm")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Samples per pixel
    #[arg(long, short = 'n')]
    pub samples: Option<u32>,

    /// Maximum ray bounces
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Worker threads (defaults to the available parallelism)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Seed for reproducible renders
    #[arg(long)]
    pub seed: Option<u64>,

    /// Render on the calling thread only
    #[arg(long)]
    pub single_threaded: bool,

    /// Logging level; RUST_LOG directives take precedence
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
