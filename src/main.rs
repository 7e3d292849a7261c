use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;
use trazar::analysis::{self, latency, membw, precision, throughput};
use trazar::chart::Chart;
use trazar::cli::{Cli, Command, OutputFormat};
use trazar::{csv_output, dataset, json_output, plot_output, text_output};

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Everything one analysis run produces for the sinks.
struct RunOutput {
    analysis: &'static str,
    charts: Vec<Chart>,
    precision: Option<precision::PrecisionReport>,
}

fn run_analysis(command: Command, data_dir: &Path) -> analysis::Result<RunOutput> {
    match command {
        Command::Precision => {
            let report = precision::run(data_dir)?;
            Ok(RunOutput {
                analysis: "precision",
                charts: vec![report.chart.clone()],
                precision: Some(report),
            })
        }
        Command::Throughput => {
            let report = throughput::run(data_dir)?;
            Ok(RunOutput {
                analysis: "throughput",
                charts: report.charts(),
                precision: None,
            })
        }
        Command::Membw => {
            let report = membw::run(data_dir)?;
            Ok(RunOutput {
                analysis: "membw",
                charts: vec![report.chart],
                precision: None,
            })
        }
        Command::Latency => {
            let report = latency::run(data_dir)?;
            Ok(RunOutput {
                analysis: "latency",
                charts: report.charts,
                precision: None,
            })
        }
    }
}

/// Actionable guidance for the one recoverable condition: no captures yet.
fn print_missing_data_help(data_dir: &Path) {
    println!(
        "No measurement data has been found in '{}'.",
        data_dir.display()
    );
    println!("Either perform a measurement with the capture tools first,");
    println!("or pass '--ref' to analyze the reference data in 'output_ref/'.");
}

fn print_chart_data(output: &RunOutput, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            print!("{}", text_output::render(&output.charts));
        }
        OutputFormat::Json => {
            let mut document = json_output::JsonOutput::new(output.analysis, &output.charts);
            if let Some(report) = &output.precision {
                document.set_histogram(&report.histogram, &report.distribution);
            }
            println!("{}", document.to_json()?);
        }
        OutputFormat::Csv => {
            print!("{}", csv_output::CsvOutput::from_charts(&output.charts).to_csv());
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.debug);

    let data_dir = dataset::resolve_data_dir(args.data_dir.as_deref(), args.reference);

    let output = match run_analysis(args.command, &data_dir) {
        Ok(output) => output,
        Err(error) if error.is_missing_data() => {
            print_missing_data_help(&data_dir);
            return Ok(());
        }
        Err(error) => return Err(error.into()),
    };

    print_chart_data(&output, args.format)?;

    if let Some(path) = &args.chart {
        plot_output::render_png(&output.charts, path)
            .with_context(|| format!("failed to render chart to {}", path.display()))?;
        eprintln!("[trazar: chart written to {}]", path.display());
    }

    Ok(())
}
