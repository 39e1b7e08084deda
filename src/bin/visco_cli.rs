use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use visco_trainer::analysis::analyze_files;
use visco_trainer::calibration::{calibrate_torque, Spindle};
use visco_trainer::config::AnalysisConfig;
use visco_trainer::report;
use visco_trainer::trial::{parse_file_name, read_instrument_file, resolve_nominal_speed};

#[derive(Parser, Debug)]
#[command(
    name = "visco_cli",
    about = "Steady-region batch analyzer for viscometer trial logs"
)]
struct Cli {
    /// Path to a JSON config file (defaults apply when absent)
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze every trial file in a directory and write batch reports
    Analyze {
        /// Directory containing trial .txt files
        data_dir: PathBuf,
        /// Write the aggregate JSON report here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// Also write a CSV table of completed trials
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Override the configured window size
        #[arg(long)]
        window_size: Option<usize>,
        /// Override the configured steadiness threshold
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// Dump one trial's calibrated samples as JSON lines
    Inspect {
        /// Trial file to inspect
        file: PathBuf,
    },
    /// Print the effective configuration
    DumpConfig,
}

fn main() -> ExitCode {
    visco_trainer::init_logging();
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = cli
        .config
        .as_ref()
        .map(AnalysisConfig::load_from_file)
        .unwrap_or_default();

    match cli.command {
        Commands::Analyze {
            data_dir,
            output,
            csv,
            window_size,
            threshold,
        } => run_analyze(config, &data_dir, output, csv, window_size, threshold),
        Commands::Inspect { file } => run_inspect(&config, &file),
        Commands::DumpConfig => run_dump_config(&config),
    }
}

fn run_analyze(
    mut config: AnalysisConfig,
    data_dir: &Path,
    output: Option<PathBuf>,
    csv: Option<PathBuf>,
    window_size: Option<usize>,
    threshold: Option<f64>,
) -> Result<ExitCode> {
    if let Some(window_size) = window_size {
        config.steadiness.window_size = window_size;
    }
    if let Some(threshold) = threshold {
        config.steadiness.threshold = threshold;
    }

    let paths = discover_trial_files(data_dir)?;
    if paths.is_empty() {
        println!("No trial files found under {}", data_dir.display());
        return Ok(ExitCode::from(0));
    }

    let outcome = analyze_files(&paths, &config)?;

    let json = report::render_json(&outcome)?;
    if let Some(path) = output {
        std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    } else {
        println!("{json}");
    }

    if let Some(path) = csv {
        report::write_csv_report(&path, &outcome.summaries)?;
    }

    if outcome.failures.is_empty() {
        Ok(ExitCode::from(0))
    } else {
        Ok(ExitCode::from(2))
    }
}

fn run_inspect(config: &AnalysisConfig, file: &Path) -> Result<ExitCode> {
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());
    let metadata =
        parse_file_name(&name).with_context(|| format!("extracting metadata from {}", name))?;
    let samples =
        read_instrument_file(file).with_context(|| format!("reading {}", file.display()))?;
    let nominal_speed = resolve_nominal_speed(&samples)?;
    let spindle = Spindle::from_code(metadata.spindle_code)?;
    let max_viscosity = spindle.max_viscosity(nominal_speed);

    let mut index = 0usize;
    for sample in samples.iter().filter(|s| s.speed_rpm == nominal_speed) {
        let line = CalibratedSamplePayload {
            index,
            time_s: index as f64 / config.sampling.sample_rate_hz,
            viscosity_mpas: calibrate_torque(max_viscosity, sample.torque_pct),
            torque_pct: sample.torque_pct,
        };
        println!("{}", serde_json::to_string(&line)?);
        index += 1;
    }

    Ok(ExitCode::from(0))
}

fn run_dump_config(config: &AnalysisConfig) -> Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(ExitCode::from(0))
}

/// Collect .txt trial files from a directory, sorted by name for
/// deterministic report order
fn discover_trial_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("reading directory {}", dir.display()))?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().map(|ext| ext == "txt").unwrap_or(false)
        })
        .collect();
    paths.sort();
    Ok(paths)
}

#[derive(serde::Serialize)]
struct CalibratedSamplePayload {
    index: usize,
    time_s: f64,
    viscosity_mpas: f64,
    torque_pct: f64,
}
