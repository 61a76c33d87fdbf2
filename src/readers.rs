//! Log sources: files, stdin, and an external log retrieval command
//!
//! Every source reads its whole input in one call and releases the file
//! handle or child process before returning.

use std::fmt;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::decompression::{maybe_decompress, open_decompressed};
use crate::error::{Error, Result};

/// Program and leading arguments used when the source is not a file
pub const DEFAULT_LOG_COMMAND: &[&str] = &["log", "show"];

/// Anything that can hand the pipeline a block of raw log text
pub trait LogSource {
    /// Short description used in diagnostics
    fn describe(&self) -> String;

    /// Read all available text. Invalid UTF-8 is replaced, not rejected.
    fn read_text(&self) -> Result<String>;
}

fn read_lossy<R: Read>(mut reader: R) -> io::Result<String> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    })
}

/// A log file, optionally gzip or zstd compressed
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LogSource for FileSource {
    fn describe(&self) -> String {
        format!("file '{}'", self.path.display())
    }

    fn read_text(&self) -> Result<String> {
        let reader =
            open_decompressed(&self.path).map_err(|e| Error::unavailable(self.describe(), e))?;
        read_lossy(reader).map_err(|e| Error::unavailable(self.describe(), e))
    }
}

/// Standard input, optionally compressed
#[derive(Debug, Clone, Default)]
pub struct StdinSource;

impl LogSource for StdinSource {
    fn describe(&self) -> String {
        "stdin".to_string()
    }

    fn read_text(&self) -> Result<String> {
        let reader = maybe_decompress(io::stdin()).map_err(|e| Error::unavailable("stdin", e))?;
        read_lossy(reader).map_err(|e| Error::unavailable("stdin", e))
    }
}

/// Output of an external command such as `log show --last 1h`
#[derive(Debug, Clone)]
pub struct CommandSource {
    program: String,
    args: Vec<String>,
}

impl CommandSource {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl LogSource for CommandSource {
    fn describe(&self) -> String {
        let mut words = vec![self.program.as_str()];
        words.extend(self.args.iter().map(String::as_str));
        format!("command '{}'", shell_words::join(words))
    }

    fn read_text(&self) -> Result<String> {
        debug!(program = %self.program, args = ?self.args, "running log command");

        // wait_with_output reaps the child and closes both pipes on every path
        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .and_then(|child| child.wait_with_output())
            .map_err(|e| Error::unavailable(self.describe(), e))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();

        if !output.status.success() && output.stdout.is_empty() {
            let reason = if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                format!("exited with {}: {}", output.status, stderr)
            };
            return Err(Error::unavailable(self.describe(), reason));
        }

        if !stderr.is_empty() {
            warn!(command = %self.describe(), stderr, "log command wrote to stderr");
        }
        if !output.status.success() {
            warn!(command = %self.describe(), status = %output.status, "log command failed, using partial output");
        }

        read_lossy(&output.stdout[..]).map_err(|e| Error::unavailable(self.describe(), e))
    }
}

/// In-memory text, mostly useful for embedding and tests
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    text: String,
}

impl MemorySource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl LogSource for MemorySource {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    fn read_text(&self) -> Result<String> {
        Ok(self.text.clone())
    }
}

/// Where the logs come from, before anything is opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    File(PathBuf),
    Stdin,
    Command { program: String, args: Vec<String> },
}

impl SourceSpec {
    /// Interpret a positional source argument.
    ///
    /// `-` is stdin, anything containing `.log` is a file path, and any other
    /// text is split into arguments for the log command.
    pub fn from_arg(arg: &str, log_command: &[String]) -> Result<Self> {
        if arg == "-" {
            Ok(SourceSpec::Stdin)
        } else if arg.contains(".log") {
            Ok(SourceSpec::File(PathBuf::from(arg)))
        } else {
            Self::command(arg, log_command)
        }
    }

    /// Build a command source from a log command and extra shell-style arguments
    pub fn command(extra_args: &str, log_command: &[String]) -> Result<Self> {
        let mut words: Vec<String> = if log_command.is_empty() {
            DEFAULT_LOG_COMMAND.iter().map(|s| s.to_string()).collect()
        } else {
            log_command.to_vec()
        };
        let extra = shell_words::split(extra_args)
            .map_err(|e| Error::InvalidCommand(format!("cannot split '{}': {}", extra_args, e)))?;
        words.extend(extra);

        let program = words.remove(0);
        Ok(SourceSpec::Command {
            program,
            args: words,
        })
    }

    pub fn into_source(self) -> Box<dyn LogSource> {
        match self {
            SourceSpec::File(path) => Box::new(FileSource::new(path)),
            SourceSpec::Stdin => Box::new(StdinSource),
            SourceSpec::Command { program, args } => Box::new(CommandSource::new(program, args)),
        }
    }
}

impl fmt::Display for SourceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceSpec::File(path) => write!(f, "{}", path.display()),
            SourceSpec::Stdin => write!(f, "-"),
            SourceSpec::Command { program, args } => {
                let mut words = vec![program.as_str()];
                words.extend(args.iter().map(String::as_str));
                write!(f, "{}", shell_words::join(words))
            }
        }
    }
}
