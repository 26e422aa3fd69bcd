use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use doctext::document_processing::{expand_inputs, utils::save_json, BatchReport};
use doctext::{Config, Converter};

mod prompt;

/// Convert PDF, DOCX, DOC and TXT documents into plain-text files.
///
/// Each input `name.ext` becomes `<output dir>/name.ext.txt`. Directories are
/// expanded to the supported files they contain. With no inputs, asks for a
/// single file path on stdin.
#[derive(Parser, Debug)]
#[command(name = "doctext", author, version, about, long_about = None)]
struct Cli {
    /// Files or directories to convert.
    inputs: Vec<PathBuf>,

    /// Directory for the converted text files (default: processed_texts).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Office executable used for legacy .doc files (default: soffice).
    #[arg(long)]
    office_program: Option<PathBuf>,

    /// Seconds to wait for an office conversion before killing it.
    #[arg(long, value_name = "SECS")]
    office_timeout: Option<u64>,

    /// Only convert files directly inside directory inputs.
    #[arg(long)]
    no_recursive: bool,

    /// Write a JSON report of the run to this file.
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Exit with status 1 if any file failed to convert.
    #[arg(long)]
    strict: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from_path(path)?,
            None => Config::load_default()?,
        };

        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Some(program) = &self.office_program {
            config.office.program = program.clone();
        }
        if let Some(timeout) = self.office_timeout {
            config.office.timeout_secs = timeout;
        }
        if self.no_recursive {
            config.recursive = false;
        }

        Ok(config)
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.load_config()?;

    let inputs = if cli.inputs.is_empty() {
        vec![prompt::read_file_path()?]
    } else {
        expand_inputs(&cli.inputs, config.recursive, &config.output_dir)
    };

    let converter = Converter::from_config(&config);
    let report = converter
        .process_files(&inputs, &config.output_dir)
        .context("batch conversion failed")?;

    print_report(&report);

    if let Some(report_path) = &cli.report {
        save_json(&report, report_path, true)?;
    }

    if cli.strict && report.has_failures() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "doctext=info",
        1 => "doctext=debug",
        _ => "doctext=trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_report(report: &BatchReport) {
    for record in &report.records {
        match (record.output_path(), record.error()) {
            (Some(output), _) => println!(
                "{} {} -> {}",
                "✓".green(),
                record.source_path.display(),
                output.display()
            ),
            (None, error) => println!(
                "{} {}: {}",
                "✗".red(),
                record.source_path.display(),
                error.unwrap_or("unknown error")
            ),
        }
    }

    let converted = report.succeeded().count();
    let failed = report.failed().count();
    let summary = format!("{converted} converted, {failed} failed");
    if failed == 0 {
        println!("{}", summary.green().bold());
    } else {
        println!("{}", summary.yellow().bold());
    }
}
