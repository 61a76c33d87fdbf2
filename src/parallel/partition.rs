//! Contiguous partitioning of the record sequence
//!
//! The requested worker count is clamped to `max(1, min(workers, len))` so
//! that no partition is ever empty. All partitions have `len / workers`
//! items except the last, which absorbs the remainder.

use std::ops::Range;

/// Number of partitions actually produced for `len` items and a requested
/// worker count. Zero only when there is nothing to process.
pub fn effective_workers(len: usize, requested: usize) -> usize {
    if len == 0 {
        return 0;
    }
    requested.clamp(1, len)
}

/// Index ranges of each partition, in order
pub fn partition_bounds(len: usize, requested: usize) -> Vec<Range<usize>> {
    let workers = effective_workers(len, requested);
    if workers == 0 {
        return Vec::new();
    }

    let base = len / workers;
    (0..workers)
        .map(|i| {
            let start = i * base;
            let end = if i + 1 == workers { len } else { start + base };
            start..end
        })
        .collect()
}

/// Split `items` into owned contiguous partitions without cloning.
pub fn partition<T>(mut items: Vec<T>, requested: usize) -> Vec<Vec<T>> {
    let bounds = partition_bounds(items.len(), requested);
    let mut chunks = Vec::with_capacity(bounds.len());

    // Peel partitions off the back so each split_off is a plain move
    for range in bounds.into_iter().rev() {
        chunks.push(items.split_off(range.start));
    }
    chunks.reverse();
    chunks
}
