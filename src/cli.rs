//! CLI argument parsing for Trazar

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for chart data
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "trazar")]
#[command(version)]
#[command(
    about = "Measurement analysis and chart generation for 10G network tester captures",
    long_about = None
)]
pub struct Cli {
    /// Analyze the reference dataset (output_ref/) instead of output/
    #[arg(long = "ref", global = true)]
    pub reference: bool,

    /// Read captures from a specific directory (overrides --ref)
    #[arg(short = 'd', long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format for chart data on stdout
    #[arg(long = "format", value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Render the charts to a PNG file at the given path
    #[arg(long = "chart", value_name = "PATH", global = true)]
    pub chart: Option<PathBuf>,

    /// Enable debug logging to stderr
    #[arg(long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// One analysis per capture the measurement tools produce
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Inter-packet timing precision as a clock-aligned error distribution
    Precision,
    /// Maximum sustained throughput per packet size
    Throughput,
    /// Required memory bandwidth per packet size
    Membw,
    /// Latency accuracy across mean data rates
    Latency,
}
