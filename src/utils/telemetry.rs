// file: src/utils/telemetry.rs
// description: timing helpers for pipeline stages
// reference: structured tracing fields for stage durations

use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Times one operation and logs its stages as they complete.
pub struct OperationTimer {
    operation: String,
    start: Instant,
    last_checkpoint: Instant,
}

impl OperationTimer {
    pub fn new(operation: &str) -> Self {
        debug!("Starting operation: {}", operation);
        let now = Instant::now();
        Self {
            operation: operation.to_string(),
            start: now,
            last_checkpoint: now,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Logs the time spent since the previous checkpoint.
    pub fn checkpoint(&mut self, stage: &str) {
        let now = Instant::now();
        debug!(
            operation = %self.operation,
            stage = %stage,
            stage_ms = now.duration_since(self.last_checkpoint).as_millis() as u64,
            total_ms = now.duration_since(self.start).as_millis() as u64,
            "Stage complete"
        );
        self.last_checkpoint = now;
    }

    pub fn warn_if_slow(&self, threshold: Duration) {
        let elapsed = self.elapsed();
        if elapsed > threshold {
            warn!(
                "Slow operation [{}]: took {:.2}s (threshold: {:.2}s)",
                self.operation,
                elapsed.as_secs_f64(),
                threshold.as_secs_f64()
            );
        }
    }

    pub fn finish(self) -> Duration {
        let elapsed = self.elapsed();
        info!(
            "Completed operation: {} in {:.2}s",
            self.operation,
            elapsed.as_secs_f64()
        );
        elapsed
    }
}
