//! Worker thread for parallel processing
//!
//! Each worker owns exactly one chunk, aggregates it, and reports a single
//! result on the shared result channel.

use crossbeam_channel::Sender;
use tracing::{debug, warn};

use crate::summary::aggregate_chunk;

use super::types::{Chunk, ChunkResult};

/// Worker thread: aggregate one chunk and send its partial summary
pub(crate) fn worker_thread(worker_id: usize, chunk: Chunk, result_sender: Sender<ChunkResult>) {
    let summary = aggregate_chunk(&chunk.records);
    debug!(
        worker_id,
        chunk_id = chunk.id,
        records = chunk.records.len(),
        levels = summary.level_counts().len(),
        "chunk aggregated"
    );

    let result = ChunkResult {
        chunk_id: chunk.id,
        records: chunk.records.len(),
        summary,
    };

    // Only fails if the coordinator stopped listening
    if result_sender.send(result).is_err() {
        warn!(worker_id, "result channel closed before chunk result was sent");
    }
}
