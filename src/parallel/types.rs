//! Type definitions for parallel processing
//!
//! Contains the work units exchanged between the coordinator and workers,
//! and the pool configuration.

use crate::record::LogRecord;
use crate::summary::Summary;

/// Configuration for parallel processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Requested worker count. The pool never launches more workers than
    /// there are records.
    pub num_workers: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_workers: default_worker_count(),
        }
    }
}

impl ParallelConfig {
    pub fn with_workers(num_workers: usize) -> Self {
        Self {
            num_workers: num_workers.max(1),
        }
    }
}

/// Hardware concurrency hint, never below 1
pub fn default_worker_count() -> usize {
    num_cpus::get().max(1)
}

/// A contiguous run of records handed to one worker
#[derive(Debug)]
pub struct Chunk {
    pub id: usize,
    pub records: Vec<LogRecord>,
}

/// Result of aggregating one chunk
#[derive(Debug)]
pub struct ChunkResult {
    pub chunk_id: usize,
    pub records: usize,
    pub summary: Summary,
}
