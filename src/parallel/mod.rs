//! Parallel processing module for loggator
//!
//! This module splits the parsed records across worker threads and collects
//! one partial summary per worker.
//!
//! # Module Structure
//!
//! - `types`: Chunks, chunk results, and configuration
//! - `partition`: Contiguous, balanced partitioning with worker clamping
//! - `worker`: Worker thread aggregating one chunk
//! - `processor`: Main ParallelProcessor orchestration

mod partition;
mod processor;
mod types;
mod worker;

// Re-export public types
pub use partition::{effective_workers, partition, partition_bounds};
pub use processor::ParallelProcessor;
pub use types::{default_worker_count, Chunk, ChunkResult, ParallelConfig};
