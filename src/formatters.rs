//! Text rendering of a final summary

use std::collections::HashMap;
use std::io::{self, Write};

use crate::summary::Summary;

/// Entries ordered by count (highest first), ties broken by key
pub fn sorted_counts(counts: &HashMap<String, u64>) -> Vec<(&str, u64)> {
    let mut entries: Vec<(&str, u64)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries
}

/// Write the level and error tables
pub fn write_summary<W: Write>(out: &mut W, summary: &Summary) -> io::Result<()> {
    writeln!(out, "Frequency by Level:")?;
    for (level, count) in sorted_counts(summary.level_counts()) {
        writeln!(out, "{}: {}", level, count)?;
    }

    writeln!(out)?;
    writeln!(out, "Frequent Errors:")?;
    for (message, count) in sorted_counts(summary.error_counts()) {
        writeln!(out, "{}: {}", message, count)?;
    }

    out.flush()
}
