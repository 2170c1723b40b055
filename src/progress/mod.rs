//! Progress snapshots and reporting
//!
//! After every aggregated outcome the reporter builds an immutable snapshot
//! of the run's totals and pushes it to a sink. Sinks must be non-blocking:
//! the reporter runs inside the serial outcome-handling section and must
//! never delay dispatch scheduling. Slow or remote sinks are handled by
//! throttling, but the final snapshot is always emitted so observers never
//! miss completion.

use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Immutable point-in-time summary of a warmup run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// URL of the outcome that just completed
    pub current_url: String,

    /// Number of targets processed so far (success + failure)
    pub processed: usize,

    /// Total number of targets in this run, fixed before dispatch
    pub total: usize,

    /// Number of successfully warmed targets
    pub success: usize,

    /// Number of failed targets
    pub failure: usize,
}

impl ProgressSnapshot {
    pub fn is_final(&self) -> bool {
        self.processed == self.total
    }
}

/// Destination for progress snapshots
///
/// `publish` must not block; snapshots are fire-and-forget and the sink owns
/// any retention.
pub trait ProgressSink: Send + Sync {
    fn publish(&self, snapshot: &ProgressSnapshot);
}

/// Sink that logs progress via tracing
pub struct LogSink;

impl ProgressSink for LogSink {
    fn publish(&self, snapshot: &ProgressSnapshot) {
        tracing::info!(
            "Progress: {}/{} processed ({} ok, {} failed), current: {}",
            snapshot.processed,
            snapshot.total,
            snapshot.success,
            snapshot.failure,
            snapshot.current_url
        );
    }
}

/// Sink that forwards snapshots over an unbounded channel
///
/// Backs live streaming consumers (e.g. an SSE endpoint draining the
/// receiver). The unbounded send keeps publishing non-blocking; a dropped
/// receiver simply discards further snapshots.
pub struct ChannelSink {
    sender: mpsc::UnboundedSender<ProgressSnapshot>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ProgressSnapshot>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl ProgressSink for ChannelSink {
    fn publish(&self, snapshot: &ProgressSnapshot) {
        let _ = self.sender.send(snapshot.clone());
    }
}

/// Sink that discards all snapshots
pub struct NullSink;

impl ProgressSink for NullSink {
    fn publish(&self, _snapshot: &ProgressSnapshot) {}
}

/// Throttled snapshot emitter
///
/// Coalesces intermediate snapshots: one is emitted when at least
/// `emit_every` outcomes arrived since the last emission and at least
/// `min_interval` elapsed. The final snapshot bypasses both gates.
pub struct ProgressReporter<'a> {
    sink: &'a dyn ProgressSink,
    emit_every: usize,
    min_interval: Duration,
    since_last_emit: usize,
    last_emit: Option<Instant>,
}

impl<'a> ProgressReporter<'a> {
    /// Creates a reporter that publishes every snapshot unthrottled
    pub fn unthrottled(sink: &'a dyn ProgressSink) -> Self {
        Self::throttled(sink, 1, Duration::ZERO)
    }

    /// Creates a throttled reporter
    ///
    /// # Arguments
    ///
    /// * `sink` - Where snapshots go
    /// * `emit_every` - Minimum outcomes between emissions (clamped to >= 1)
    /// * `min_interval` - Minimum time between emissions
    pub fn throttled(sink: &'a dyn ProgressSink, emit_every: usize, min_interval: Duration) -> Self {
        Self {
            sink,
            emit_every: emit_every.max(1),
            min_interval,
            since_last_emit: 0,
            last_emit: None,
        }
    }

    /// Reports one aggregated outcome, publishing if the throttle allows
    ///
    /// The final snapshot (`processed == total`) is always published.
    pub fn report(&mut self, snapshot: ProgressSnapshot) {
        self.since_last_emit += 1;

        if snapshot.is_final() {
            self.emit(&snapshot);
            return;
        }

        if self.since_last_emit < self.emit_every {
            return;
        }

        if let Some(last) = self.last_emit {
            if last.elapsed() < self.min_interval {
                return;
            }
        }

        self.emit(&snapshot);
    }

    fn emit(&mut self, snapshot: &ProgressSnapshot) {
        self.sink.publish(snapshot);
        self.since_last_emit = 0;
        self.last_emit = Some(Instant::now());
    }
}
