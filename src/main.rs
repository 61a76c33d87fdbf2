use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use tracing::info;

use loggator::formatters::write_summary;
use loggator::{Error, Pipeline, PipelineConfig};

mod cli;
mod config;
mod config_file;
mod logging;
mod platform;

use cli::Cli;
use config::AppConfig;
use config_file::ConfigFile;
use platform::ExitCode;

fn main() {
    // clap exits with status 2 on usage errors
    let cli = Cli::parse();

    logging::init_logging(cli.verbosity());

    if cli.show_config {
        let stdout = io::stdout();
        if ConfigFile::show_config(&mut stdout.lock()).is_err() {
            ExitCode::GeneralError.exit();
        }
        ExitCode::Success.exit();
    }

    let config_file = if cli.ignore_config {
        ConfigFile::default()
    } else {
        match ConfigFile::load_with_custom_path(cli.config_file.as_deref()) {
            Ok(config_file) => config_file,
            Err(e) => {
                eprintln!("loggator: Error: {:#}", e);
                ExitCode::InvalidUsage.exit();
            }
        }
    };

    let config = match AppConfig::from_cli(&cli, &config_file) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("loggator: Error: {:#}", e);
            ExitCode::InvalidUsage.exit();
        }
    };

    match run(&config) {
        Ok(code) => code.exit(),
        Err(e) => {
            eprintln!("loggator: Error: {:#}", e);
            ExitCode::GeneralError.exit();
        }
    }
}

fn run(config: &AppConfig) -> Result<ExitCode> {
    info!(source = %config.source, threads = config.threads, "starting");

    let source = config.source.clone().into_source();
    let mut pipeline = Pipeline::new(PipelineConfig::new().with_workers(config.threads));

    let report = match pipeline.run(source.as_ref()) {
        Ok(report) => report,
        Err(Error::NoData { source_desc }) => {
            info!(source = %source_desc, "source produced no data");
            eprintln!("loggator: No logs to process.");
            return Ok(ExitCode::GeneralError);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("cannot process logs from {}", config.source))
        }
    };

    if config.stats {
        eprintln!("{}", report.stats.format_stats());
    }

    if report.stats.records == 0 {
        eprintln!("loggator: No logs to process.");
        return Ok(ExitCode::GeneralError);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match write_summary(&mut out, &report.summary).and_then(|_| out.flush()) {
        Ok(()) => Ok(ExitCode::Success),
        // Downstream closed the pipe, e.g. `loggator app.log | head -1`
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(ExitCode::Success),
        Err(e) => Err(e).context("failed to write summary"),
    }
}
