// tests/common/mod.rs
// Shared test utilities for integration tests
#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use tempfile::{NamedTempFile, TempDir};

pub const SAMPLE_LOG: &str = "2024-01-01T00:00:00 INFO service started
2024-01-01T00:00:01 ERROR disk full
2024-01-01T00:00:02 ERROR disk full
2024-01-01T00:00:03 WARN low memory
badline
";

pub const SAMPLE_OUTPUT: &str = "Frequency by Level:
ERROR: 2
INFO: 1
WARN: 1

Frequent Errors:
disk full: 2
";

/// Command for the built binary with user config lookups pointed at an empty
/// directory, so the developer's own config never leaks into tests.
pub fn loggator_command(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_loggator"));
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("LOGGATOR_LOG");
    cmd
}

fn collect(output: std::process::Output) -> (String, String, i32) {
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

/// Run loggator with given arguments
pub fn run_loggator(args: &[&str]) -> (String, String, i32) {
    let home = TempDir::new().expect("Failed to create temp home");
    let output = loggator_command(home.path())
        .args(args)
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute loggator");
    collect(output)
}

/// Run loggator with given arguments and input via stdin
pub fn run_loggator_with_input(args: &[&str], input: &[u8]) -> (String, String, i32) {
    let home = TempDir::new().expect("Failed to create temp home");
    let mut child = loggator_command(home.path())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start loggator");

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(input).expect("Failed to write to stdin");
    }

    collect(child.wait_with_output().expect("Failed to read output"))
}

/// Write `content` to a temporary file whose name ends in `.log`
pub fn temp_log_file(content: &[u8]) -> NamedTempFile {
    let mut temp_file = tempfile::Builder::new()
        .suffix(".log")
        .tempfile()
        .expect("Failed to create temp file");
    temp_file
        .write_all(content)
        .expect("Failed to write to temp file");
    temp_file.flush().expect("Failed to flush temp file");
    temp_file
}

/// Run loggator with a temporary `.log` file appended as the source
pub fn run_loggator_with_file(args: &[&str], file_content: &str) -> (String, String, i32) {
    let temp_file = temp_log_file(file_content.as_bytes());
    let mut full_args = args.to_vec();
    full_args.push(temp_file.path().to_str().unwrap());
    run_loggator(&full_args)
}

/// Parse "key: count" lines of one output section into pairs
pub fn section_entries(stdout: &str, header: &str) -> Vec<(String, u64)> {
    stdout
        .lines()
        .skip_while(|line| *line != header)
        .skip(1)
        .take_while(|line| !line.is_empty())
        .map(|line| {
            let (key, count) = line.rsplit_once(": ").expect("entry should be 'key: count'");
            (key.to_string(), count.parse().expect("count should be a number"))
        })
        .collect()
}
