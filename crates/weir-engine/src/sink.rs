//! In-process snapshot sinks.
//!
//! [`VecSink`] collects owned copies in memory. [`ChannelSink`] hands
//! them to another thread through a bounded channel without ever
//! blocking the solver; a full channel rejects the sample.

use crossbeam_channel::{Receiver, Sender, TrySendError};
use weir_arena::OwnedSnapshot;
use weir_core::{SinkError, SnapshotSink, StateView};

// ── VecSink ────────────────────────────────────────────────────────

/// Collects every accepted sample in memory.
#[derive(Clone, Debug, Default)]
pub struct VecSink {
    frames: Vec<OwnedSnapshot>,
    capacity: Option<usize>,
}

impl VecSink {
    /// Unbounded sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink that rejects samples with `Backpressure` once it holds
    /// `capacity` frames.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frames: Vec::with_capacity(capacity),
            capacity: Some(capacity),
        }
    }

    /// Collected frames in acceptance order.
    pub fn frames(&self) -> &[OwnedSnapshot] {
        &self.frames
    }

    /// Consume the sink, returning its frames.
    pub fn into_frames(self) -> Vec<OwnedSnapshot> {
        self.frames
    }

    /// Number of collected frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether no frame has been collected.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl SnapshotSink for VecSink {
    fn accept(&mut self, snapshot: &dyn StateView) -> Result<(), SinkError> {
        if self.capacity.is_some_and(|cap| self.frames.len() >= cap) {
            return Err(SinkError::Backpressure);
        }
        self.frames.push(OwnedSnapshot::capture(snapshot));
        Ok(())
    }
}

// ── ChannelSink ────────────────────────────────────────────────────

/// Sends owned snapshots over a bounded `crossbeam-channel`.
#[derive(Clone, Debug)]
pub struct ChannelSink {
    tx: Sender<OwnedSnapshot>,
}

impl ChannelSink {
    /// Create a sink and the receiver for its consumer.
    ///
    /// `capacity` is the number of samples that may be in flight.
    pub fn bounded(capacity: usize) -> (Self, Receiver<OwnedSnapshot>) {
        let (tx, rx) = crossbeam_channel::bounded(capacity);
        (Self { tx }, rx)
    }
}

impl SnapshotSink for ChannelSink {
    fn accept(&mut self, snapshot: &dyn StateView) -> Result<(), SinkError> {
        match self.tx.try_send(OwnedSnapshot::capture(snapshot)) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(SinkError::Backpressure),
            Err(TrySendError::Disconnected(_)) => Err(SinkError::Disconnected),
        }
    }
}

// ── NullSink ───────────────────────────────────────────────────────

/// Discards every sample.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl SnapshotSink for NullSink {
    fn accept(&mut self, _snapshot: &dyn StateView) -> Result<(), SinkError> {
        Ok(())
    }
}
