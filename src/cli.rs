// CLI-specific types and structures
// This module contains the command-line interface definitions

use clap::{ArgAction, Parser};
use std::path::PathBuf;

// CLI structure - contains all command-line arguments and options
#[derive(Parser, Debug)]
#[command(name = "loggator")]
#[command(about = "Count log entries per level and per error message, in parallel")]
#[command(
    long_about = "Count log entries per level and per error message, in parallel\n\nLines are read as '<timestamp> <level> <message...>'. Lines with fewer than two fields are skipped.\n\nSOURCES:\n  loggator app.log            read a file (gzip and zstd are detected automatically)\n  loggator -                  read stdin\n  loggator \"--last 1h\"        anything else is passed to the log command (default: log show)\n  loggator --command '--last 1h' --log-command 'log show --style syslog'"
)]
#[command(version)]
#[command(args_override_self = true)]
pub struct Cli {
    /// Log source: a path containing ".log", "-" for stdin, or arguments for the log command
    pub source: Option<String>,

    /// Read this file, whatever its name
    #[arg(
        long = "file",
        value_name = "PATH",
        conflicts_with_all = ["source", "command"],
        help_heading = "Input Options"
    )]
    pub file: Option<PathBuf>,

    /// Run the log command with these arguments (shell-style quoting)
    #[arg(
        long = "command",
        value_name = "ARGS",
        allow_hyphen_values = true,
        conflicts_with = "source",
        help_heading = "Input Options"
    )]
    pub command: Option<String>,

    /// Program and leading arguments used to fetch logs [default: log show]
    #[arg(long = "log-command", value_name = "PROGRAM", allow_hyphen_values = true, help_heading = "Input Options")]
    pub log_command: Option<String>,

    /// Number of worker threads (0 = one per CPU)
    #[arg(short = 'j', long = "threads", value_name = "N", help_heading = "Performance Options")]
    pub threads: Option<usize>,

    /// Print processing statistics to stderr
    #[arg(short = 's', long = "stats", help_heading = "Output Options")]
    pub stats: bool,

    /// Increase diagnostic output (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, help_heading = "Logging Options")]
    pub verbose: u8,

    /// Only report errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose", help_heading = "Logging Options")]
    pub quiet: bool,

    /// Use this configuration file instead of searching for one
    #[arg(long = "config-file", value_name = "PATH", help_heading = "Configuration Options")]
    pub config_file: Option<PathBuf>,

    /// Do not load any configuration file
    #[arg(long = "ignore-config", conflicts_with = "config_file", help_heading = "Configuration Options")]
    pub ignore_config: bool,

    /// Show configuration file locations and active settings, then exit
    #[arg(long = "show-config", help_heading = "Configuration Options")]
    pub show_config: bool,
}

impl Cli {
    /// Signed verbosity: negative when quiet
    pub fn verbosity(&self) -> i8 {
        if self.quiet {
            -1
        } else {
            self.verbose.min(i8::MAX as u8) as i8
        }
    }
}
