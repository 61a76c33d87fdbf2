//! Main parallel processor
//!
//! Contains the ParallelProcessor that partitions records, runs one worker
//! per partition, and gathers the partial summaries at a single join barrier.

use crossbeam_channel::unbounded;
use std::thread;
use tracing::debug;

use crate::error::{Error, Result};
use crate::record::LogRecord;
use crate::summary::Summary;

use super::partition::partition;
use super::types::{Chunk, ChunkResult, ParallelConfig};
use super::worker::worker_thread;

/// Main parallel processor
#[derive(Debug, Clone, Default)]
pub struct ParallelProcessor {
    config: ParallelConfig,
}

impl ParallelProcessor {
    pub fn new(config: ParallelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParallelConfig {
        &self.config
    }

    /// Split `records` into chunks, one per worker
    pub fn split(&self, records: Vec<LogRecord>) -> Vec<Chunk> {
        partition(records, self.config.num_workers)
            .into_iter()
            .enumerate()
            .map(|(id, records)| Chunk { id, records })
            .collect()
    }

    /// Aggregate every chunk on its own worker thread and return the partial
    /// summaries ordered by chunk id. Blocks until all workers have finished.
    pub fn dispatch(&self, chunks: Vec<Chunk>) -> Result<Vec<Summary>> {
        if chunks.is_empty() {
            debug!("no chunks to dispatch, skipping worker launch");
            return Ok(Vec::new());
        }

        let (result_sender, result_receiver) = unbounded::<ChunkResult>();
        let mut worker_handles = Vec::with_capacity(chunks.len());

        for (worker_id, chunk) in chunks.into_iter().enumerate() {
            let result_sender = result_sender.clone();
            debug!(worker_id, records = chunk.records.len(), "starting worker");
            let handle = thread::spawn(move || worker_thread(worker_id, chunk, result_sender));
            worker_handles.push(handle);
        }

        // Drop our sender so the receiver disconnects once every worker is done
        drop(result_sender);

        let mut results: Vec<ChunkResult> = result_receiver.iter().collect();
        debug!(
            partials = results.len(),
            records = results.iter().map(|r| r.records).sum::<usize>(),
            "worker results received"
        );

        for (idx, handle) in worker_handles.into_iter().enumerate() {
            handle
                .join()
                .map_err(|_| Error::WorkerPanicked { worker: idx })?;
        }

        results.sort_by_key(|r| r.chunk_id);
        Ok(results.into_iter().map(|r| r.summary).collect())
    }
}
