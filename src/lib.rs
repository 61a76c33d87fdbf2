// Core library for the loggator log aggregator
//
// Lines are parsed into records, split into contiguous chunks, aggregated on
// one worker thread per chunk, and the partial summaries merged into one.

pub mod decompression;
pub mod error;
pub mod formatters;
pub mod parallel;
pub mod pipeline;
pub mod readers;
pub mod record;
pub mod stats;
pub mod summary;

pub use error::{Error, Result};
pub use parallel::{ParallelConfig, ParallelProcessor};
pub use pipeline::{Pipeline, PipelineConfig, PipelineReport, PipelineState};
pub use readers::{CommandSource, FileSource, LogSource, MemorySource, SourceSpec, StdinSource};
pub use record::{parse_line, parse_lines, LogRecord, ParsedLines};
pub use stats::ProcessingStats;
pub use summary::{aggregate_chunk, merge_summaries, Summary, ERROR_LEVEL};
