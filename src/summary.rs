//! Frequency summaries: per-chunk aggregation and the merge reducer

use std::collections::HashMap;
use std::ops::AddAssign;

use crate::record::LogRecord;

/// Level whose messages are counted in [`Summary::error_counts`]. Matching is
/// exact and case-sensitive.
pub const ERROR_LEVEL: &str = "ERROR";

/// Counts per level and per error message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    level_counts: HashMap<String, u64>,
    error_counts: HashMap<String, u64>,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level_counts(&self) -> &HashMap<String, u64> {
        &self.level_counts
    }

    pub fn error_counts(&self) -> &HashMap<String, u64> {
        &self.error_counts
    }

    pub fn level_count(&self, level: &str) -> u64 {
        self.level_counts.get(level).copied().unwrap_or(0)
    }

    pub fn error_count(&self, message: &str) -> u64 {
        self.error_counts.get(message).copied().unwrap_or(0)
    }

    /// Total number of records counted
    pub fn total(&self) -> u64 {
        self.level_counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.level_counts.is_empty()
    }

    /// Count one record
    pub fn record(&mut self, record: &LogRecord) {
        bump(&mut self.level_counts, record.level(), 1);
        if record.level() == ERROR_LEVEL {
            bump(&mut self.error_counts, record.message(), 1);
        }
    }

    /// Fold another summary into this one by summing counts key-wise
    pub fn merge(&mut self, other: Summary) {
        merge_counts(&mut self.level_counts, other.level_counts);
        merge_counts(&mut self.error_counts, other.error_counts);
    }
}

fn bump(counts: &mut HashMap<String, u64>, key: &str, by: u64) {
    // Avoid allocating a key for the common already-present case
    match counts.get_mut(key) {
        Some(count) => *count += by,
        None => {
            counts.insert(key.to_string(), by);
        }
    }
}

fn merge_counts(into: &mut HashMap<String, u64>, from: HashMap<String, u64>) {
    if into.is_empty() {
        *into = from;
        return;
    }
    for (key, count) in from {
        *into.entry(key).or_insert(0) += count;
    }
}

impl AddAssign for Summary {
    fn add_assign(&mut self, other: Self) {
        self.merge(other);
    }
}

impl Extend<Summary> for Summary {
    fn extend<I: IntoIterator<Item = Summary>>(&mut self, iter: I) {
        for partial in iter {
            self.merge(partial);
        }
    }
}

impl FromIterator<Summary> for Summary {
    fn from_iter<I: IntoIterator<Item = Summary>>(iter: I) -> Self {
        merge_summaries(iter)
    }
}

/// Reduce one chunk of records to a partial summary
pub fn aggregate_chunk(records: &[LogRecord]) -> Summary {
    let mut summary = Summary::new();
    for record in records {
        summary.record(record);
    }
    summary
}

/// Merge any number of partial summaries. The result does not depend on the
/// order of `partials`.
pub fn merge_summaries<I>(partials: I) -> Summary
where
    I: IntoIterator<Item = Summary>,
{
    let mut total = Summary::new();
    total.extend(partials);
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rec(level: &str, message: &str) -> LogRecord {
        LogRecord::new("2024-01-01T00:00:00", level, message)
    }

    #[test]
    fn test_aggregate_counts_levels_and_errors() {
        let records = vec![
            rec("INFO", "service started"),
            rec("ERROR", "disk full"),
            rec("ERROR", "disk full"),
            rec("WARN", "low memory"),
        ];
        let summary = aggregate_chunk(&records);

        assert_eq!(summary.level_count("INFO"), 1);
        assert_eq!(summary.level_count("ERROR"), 2);
        assert_eq!(summary.level_count("WARN"), 1);
        assert_eq!(summary.level_counts().len(), 3);
        assert_eq!(summary.error_count("disk full"), 2);
        assert_eq!(summary.error_counts().len(), 1);
        assert_eq!(summary.total(), 4);
    }

    #[test]
    fn test_error_match_is_case_sensitive() {
        let records = vec![rec("error", "lower"), rec("Error", "mixed"), rec("ERROR ", "x")];
        let summary = aggregate_chunk(&records);

        assert!(summary.error_counts().is_empty());
        assert_eq!(summary.level_counts().len(), 3);
    }

    #[test]
    fn test_empty_error_message_is_a_key() {
        let summary = aggregate_chunk(&[rec("ERROR", ""), rec("ERROR", "")]);
        assert_eq!(summary.error_count(""), 2);
    }

    #[test]
    fn test_aggregate_empty_chunk() {
        let summary = aggregate_chunk(&[]);
        assert!(summary.is_empty());
        assert!(summary.error_counts().is_empty());
    }

    #[test]
    fn test_merge_sums_overlapping_keys() {
        let a = aggregate_chunk(&[rec("INFO", "a"), rec("ERROR", "boom")]);
        let b = aggregate_chunk(&[rec("ERROR", "boom"), rec("DEBUG", "b")]);

        let merged = merge_summaries(vec![a, b]);
        assert_eq!(merged.level_count("INFO"), 1);
        assert_eq!(merged.level_count("ERROR"), 2);
        assert_eq!(merged.level_count("DEBUG"), 1);
        assert_eq!(merged.error_count("boom"), 2);
    }

    #[test]
    fn test_merge_with_empty_is_identity() {
        let original = aggregate_chunk(&[rec("INFO", "a"), rec("ERROR", "boom")]);

        let mut left = original.clone();
        left += Summary::new();
        assert_eq!(left, original);

        let mut right = Summary::new();
        right += original.clone();
        assert_eq!(right, original);
    }

    #[test]
    fn test_merge_no_partials() {
        assert_eq!(merge_summaries(Vec::new()), Summary::new());
    }

    #[test]
    fn test_collect_into_summary() {
        let merged: Summary = vec![
            aggregate_chunk(&[rec("WARN", "w")]),
            aggregate_chunk(&[rec("WARN", "w")]),
        ]
        .into_iter()
        .collect();
        assert_eq!(merged.level_count("WARN"), 2);
    }

    fn arb_record() -> impl Strategy<Value = LogRecord> {
        (
            prop::sample::select(vec!["INFO", "WARN", "ERROR", "DEBUG", "error"]),
            prop::sample::select(vec!["disk full", "timeout", "", "oom"]),
        )
            .prop_map(|(level, message)| rec(level, message))
    }

    fn arb_partials() -> impl Strategy<Value = Vec<Summary>> {
        prop::collection::vec(
            prop::collection::vec(arb_record(), 0..20).prop_map(|rs| aggregate_chunk(&rs)),
            0..6,
        )
    }

    proptest! {
        #[test]
        fn prop_merge_is_order_independent(partials in arb_partials(), seed in any::<u64>()) {
            let forward = merge_summaries(partials.clone());

            let mut reversed = partials.clone();
            reversed.reverse();
            prop_assert_eq!(&merge_summaries(reversed), &forward);

            // Rotate by an arbitrary amount for a different permutation
            let mut rotated = partials.clone();
            if !rotated.is_empty() {
                let by = (seed as usize) % rotated.len();
                rotated.rotate_left(by);
            }
            prop_assert_eq!(&merge_summaries(rotated), &forward);
        }

        #[test]
        fn prop_merge_is_associative(a in arb_partials(), b in arb_partials()) {
            let flat = merge_summaries(a.iter().cloned().chain(b.iter().cloned()));
            let grouped = merge_summaries(vec![merge_summaries(a), merge_summaries(b)]);
            prop_assert_eq!(grouped, flat);
        }

        #[test]
        fn prop_aggregation_matches_direct_count(records in prop::collection::vec(arb_record(), 0..60)) {
            let summary = aggregate_chunk(&records);

            for level in summary.level_counts().keys() {
                let expected = records.iter().filter(|r| r.level() == level.as_str()).count() as u64;
                prop_assert_eq!(summary.level_count(level), expected);
            }
            for message in summary.error_counts().keys() {
                let expected = records
                    .iter()
                    .filter(|r| r.level() == ERROR_LEVEL && r.message() == message.as_str())
                    .count() as u64;
                prop_assert_eq!(summary.error_count(message), expected);
            }
            prop_assert_eq!(summary.total(), records.len() as u64);
        }
    }
}
