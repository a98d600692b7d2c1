//! spectest - phase0 block header conformance runner
//!
//! # Usage
//!
//! ```bash
//! # Run the minimal fixtures
//! spectest --root ./consensus-spec-tests/tests --config minimal
//!
//! # Mainnet fixtures on 8 workers, JUnit report written to a file
//! SPECTEST_ROOT=./tests spectest --config mainnet --workers 8 --format junit --output report.xml
//! ```

use std::{fs, path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use beacon_common::config::ConfigName;
use beacon_spectest::{
    config::{DEFAULT_CATEGORY, ROOT_ENV},
    ReportFormat, RunReport, RunnerConfig, SpecRunner,
};
use clap::Parser;
use log::{error, info};

/// Phase0 operations conformance runner
#[derive(Parser)]
#[command(name = "spectest")]
#[command(about = "Run phase0 operations/block_header conformance fixtures")]
#[command(version)]
struct Cli {
    /// Fixture root directory
    #[arg(short, long, env = ROOT_ENV)]
    root: PathBuf,

    /// Preset of the fixtures
    #[arg(short, long, default_value = "minimal")]
    config: ConfigName,

    /// Operations category
    #[arg(long, default_value = DEFAULT_CATEGORY)]
    category: String,

    /// Number of workers, 0 runs sequentially
    #[arg(short, long, default_value = "0")]
    workers: usize,

    /// Only run cases whose name contains this
    #[arg(short, long)]
    filter: Option<String>,

    /// Report format: summary, json or junit
    #[arg(long, default_value = "summary")]
    format: ReportFormat,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level filter
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            root: self.root.clone(),
            config: self.config,
            category: self.category.clone(),
            workers: self.workers,
            filter: self.filter.clone(),
            format: self.format,
        }
    }
}

fn write_report(report: &RunReport, format: ReportFormat, output: Option<&PathBuf>) -> Result<()> {
    let rendered = match format {
        ReportFormat::Summary => {
            report.print_summary();
            return Ok(());
        }
        ReportFormat::Json => report
            .to_json()
            .context("Failed to serialize report to JSON")?,
        ReportFormat::Junit => report.to_junit_xml(),
    };

    match output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("Failed to write report to {}", path.display()))?,
        None => println!("{}", rendered),
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    let config = cli.runner_config();
    info!(
        "Running {} fixtures from {}",
        config.config,
        config.root.display()
    );

    let runner = SpecRunner::new(config);
    let report = match runner.run() {
        Ok(report) => report,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(2);
        }
    };

    if let Err(e) = write_report(&report, cli.format, cli.output.as_ref()) {
        error!("{:#}", e);
        return ExitCode::FAILURE;
    }

    if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_json_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let report = RunReport::new("minimal/block_header");

        write_report(&report, ReportFormat::Json, Some(&path)).unwrap();
        let written: RunReport = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.suite, "minimal/block_header");
    }

    #[test]
    fn test_write_report_error_is_returned() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("report.xml");
        let report = RunReport::new("minimal/block_header");

        let err = write_report(&report, ReportFormat::Junit, Some(&path)).unwrap_err();
        assert!(err.to_string().starts_with("Failed to write report"));
    }
}
