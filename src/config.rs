//! Resolved run configuration: CLI flags layered over the config file

use anyhow::{anyhow, Context, Result};

use loggator::parallel::default_worker_count;
use loggator::readers::{SourceSpec, DEFAULT_LOG_COMMAND};

use crate::cli::Cli;
use crate::config_file::ConfigFile;

/// Everything a run needs, after precedence has been applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub source: SourceSpec,
    pub threads: usize,
    pub stats: bool,
}

impl AppConfig {
    /// Build from CLI arguments, falling back to config file values, then
    /// built-in defaults.
    pub fn from_cli(cli: &Cli, file: &ConfigFile) -> Result<Self> {
        let log_command = resolve_log_command(cli, file)?;

        let source = if let Some(path) = &cli.file {
            SourceSpec::File(path.clone())
        } else if let Some(args) = &cli.command {
            SourceSpec::command(args, &log_command)?
        } else if let Some(arg) = &cli.source {
            SourceSpec::from_arg(arg, &log_command)?
        } else {
            return Err(anyhow!(
                "no log source given; pass a .log file, '-' for stdin, or arguments for the log command"
            ));
        };

        let threads = match cli.threads.or(file.threads) {
            None | Some(0) => default_worker_count(),
            Some(n) => n,
        };

        Ok(Self {
            source,
            threads,
            stats: cli.stats,
        })
    }
}

fn resolve_log_command(cli: &Cli, file: &ConfigFile) -> Result<Vec<String>> {
    let Some(raw) = cli.log_command.as_ref().or(file.log_command.as_ref()) else {
        return Ok(DEFAULT_LOG_COMMAND.iter().map(|s| s.to_string()).collect());
    };

    let words = shell_words::split(raw)
        .with_context(|| format!("invalid log command '{}'", raw))?;
    if words.is_empty() {
        return Err(anyhow!("log command must name a program"));
    }
    Ok(words)
}
