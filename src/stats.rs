use std::time::Duration;

/// Statistics collected during a pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingStats {
    pub lines_read: usize,
    pub lines_dropped: usize,
    pub records: usize,
    pub requested_workers: usize,
    pub partitions: usize,
    pub processing_time: Duration,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format_stats(&self) -> String {
        let mut output = format!(
            "Lines processed: {} total, {} parsed, {} dropped",
            self.lines_read, self.records, self.lines_dropped
        );

        if self.partitions == 0 {
            output.push_str("; no workers started");
        } else {
            output.push_str(&format!(
                "; {} workers ({} requested)",
                self.partitions, self.requested_workers
            ));
        }

        let processing_time_ms = self.processing_time.as_millis();
        output.push_str(&format!(" in {}ms", processing_time_ms));

        if processing_time_ms > 0 && self.lines_read > 0 {
            let lines_per_sec = (self.lines_read as f64 * 1000.0) / processing_time_ms as f64;
            output.push_str(&format!(" ({:.0} lines/s)", lines_per_sec));
        }

        output
    }
}
