//! Pipeline coordinator
//!
//! Drives a run through its stages:
//!
//! ```text
//! Idle -> Reading -> Partitioning -> Dispatching -> Collecting -> Merging -> Done
//!            \
//!             -> Failed
//! ```
//!
//! Only reading can fail. Once a record sequence exists the remaining stages
//! always succeed.

use std::fmt;
use std::time::Instant;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::parallel::{ParallelConfig, ParallelProcessor};
use crate::readers::LogSource;
use crate::record::{parse_lines, LogRecord};
use crate::stats::ProcessingStats;
use crate::summary::{merge_summaries, Summary};

/// Coordinator states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Reading,
    Partitioning,
    Dispatching,
    Collecting,
    Merging,
    Done,
    Failed,
}

impl PipelineState {
    /// Whether `next` directly follows `self`
    pub fn can_transition_to(self, next: PipelineState) -> bool {
        use PipelineState::*;
        matches!(
            (self, next),
            (Idle, Reading)
                | (Reading, Partitioning)
                | (Reading, Failed)
                | (Partitioning, Dispatching)
                | (Dispatching, Collecting)
                | (Collecting, Merging)
                | (Merging, Done)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed)
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Idle => "idle",
            PipelineState::Reading => "reading",
            PipelineState::Partitioning => "partitioning",
            PipelineState::Dispatching => "dispatching",
            PipelineState::Collecting => "collecting",
            PipelineState::Merging => "merging",
            PipelineState::Done => "done",
            PipelineState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Pipeline configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineConfig {
    pub parallel: ParallelConfig,
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the worker count (0 is treated as 1)
    pub fn with_workers(mut self, num_workers: usize) -> Self {
        self.parallel = ParallelConfig::with_workers(num_workers);
        self
    }
}

/// Final output of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub summary: Summary,
    pub stats: ProcessingStats,
}

/// Runs sources through parse, partition, parallel aggregation and merge
#[derive(Debug)]
pub struct Pipeline {
    processor: ParallelProcessor,
    state: PipelineState,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            processor: ParallelProcessor::new(config.parallel),
            state: PipelineState::Idle,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Start a new run from `Idle`, whatever the previous run left behind
    fn begin(&mut self) {
        if self.state != PipelineState::Idle && !self.state.is_terminal() {
            warn!(state = %self.state, "previous run stopped before finishing");
        }
        self.state = PipelineState::Idle;
        self.advance(PipelineState::Reading);
    }

    fn advance(&mut self, next: PipelineState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal pipeline transition {} -> {}",
            self.state,
            next
        );
        debug!(from = %self.state, to = %next, "pipeline transition");
        self.state = next;
    }

    /// Read `source`, aggregate every parsed record, and return the merged
    /// summary.
    pub fn run(&mut self, source: &dyn LogSource) -> Result<PipelineReport> {
        let started = Instant::now();
        self.begin();

        let text = match source.read_text() {
            Ok(text) if text.is_empty() => {
                self.advance(PipelineState::Failed);
                return Err(Error::NoData {
                    source_desc: source.describe(),
                });
            }
            Ok(text) => text,
            Err(err) => {
                self.advance(PipelineState::Failed);
                return Err(err);
            }
        };

        let parsed = parse_lines(&text);
        drop(text);
        debug!(
            source = %source.describe(),
            lines = parsed.lines_read,
            dropped = parsed.lines_dropped,
            "source parsed"
        );

        let mut stats = ProcessingStats {
            lines_read: parsed.lines_read,
            lines_dropped: parsed.lines_dropped,
            ..ProcessingStats::new()
        };
        let summary = self.aggregate(parsed.records, &mut stats)?;
        stats.processing_time = started.elapsed();

        Ok(PipelineReport { summary, stats })
    }

    /// Run the aggregation stages over records that were parsed elsewhere
    pub fn run_records(&mut self, records: Vec<LogRecord>) -> Result<PipelineReport> {
        let started = Instant::now();
        self.begin();

        let mut stats = ProcessingStats {
            lines_read: records.len(),
            ..ProcessingStats::new()
        };
        let summary = self.aggregate(records, &mut stats)?;
        stats.processing_time = started.elapsed();

        Ok(PipelineReport { summary, stats })
    }

    fn aggregate(
        &mut self,
        records: Vec<LogRecord>,
        stats: &mut ProcessingStats,
    ) -> Result<Summary> {
        stats.records = records.len();
        stats.requested_workers = self.processor.config().num_workers;

        self.advance(PipelineState::Partitioning);
        let chunks = self.processor.split(records);
        stats.partitions = chunks.len();
        debug!(
            records = stats.records,
            requested = stats.requested_workers,
            partitions = stats.partitions,
            "records partitioned"
        );

        self.advance(PipelineState::Dispatching);
        let partials = self.processor.dispatch(chunks)?;

        self.advance(PipelineState::Collecting);
        debug!(partials = partials.len(), "partial summaries collected");

        self.advance(PipelineState::Merging);
        let summary = merge_summaries(partials);

        self.advance(PipelineState::Done);
        Ok(summary)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}
