//! Test utilities and mock types for Weir development.
//!
//! Provides a mock [`StateView`], sinks that misbehave on purpose, and
//! the standard scenario fixtures in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use weir_core::{SinkError, SnapshotSink, StateView, StepId};

/// Mock implementation of [`StateView`] backed by plain vectors.
#[derive(Clone, Debug, PartialEq)]
pub struct MockState {
    pub step: StepId,
    pub time: f64,
    pub spacing: f64,
    pub depth: Vec<f64>,
    pub discharge: Vec<f64>,
}

impl MockState {
    /// Still water of uniform `depth`.
    pub fn still(node_count: usize, depth: f64, spacing: f64) -> Self {
        Self {
            step: StepId(0),
            time: 0.0,
            spacing,
            depth: vec![depth; node_count],
            discharge: vec![0.0; node_count],
        }
    }

    pub fn at(mut self, step: u64, time: f64) -> Self {
        self.step = StepId(step);
        self.time = time;
        self
    }
}

impl StateView for MockState {
    fn step_id(&self) -> StepId {
        self.step
    }

    fn time(&self) -> f64 {
        self.time
    }

    fn spacing(&self) -> f64 {
        self.spacing
    }

    fn depth(&self) -> &[f64] {
        &self.depth
    }

    fn discharge(&self) -> &[f64] {
        &self.discharge
    }
}

/// Counts offered samples and remembers their times.
#[derive(Clone, Debug, Default)]
pub struct CountingSink {
    pub times: Vec<f64>,
    pub steps: Vec<StepId>,
}

impl SnapshotSink for CountingSink {
    fn accept(&mut self, snapshot: &dyn StateView) -> Result<(), SinkError> {
        self.times.push(snapshot.time());
        self.steps.push(snapshot.step_id());
        Ok(())
    }
}

/// Rejects every sample after the first `accept_count` with a fixed error.
#[derive(Clone, Debug)]
pub struct FailingSink {
    pub accept_count: usize,
    pub error: SinkError,
    pub offered: usize,
}

impl FailingSink {
    pub fn new(accept_count: usize, error: SinkError) -> Self {
        Self {
            accept_count,
            error,
            offered: 0,
        }
    }
}

impl SnapshotSink for FailingSink {
    fn accept(&mut self, _snapshot: &dyn StateView) -> Result<(), SinkError> {
        self.offered += 1;
        if self.offered > self.accept_count {
            Err(self.error.clone())
        } else {
            Ok(())
        }
    }
}

/// `Σ h·Δx` of any view.
pub fn total_mass(view: &dyn StateView) -> f64 {
    view.depth().iter().sum::<f64>() * view.spacing()
}

/// Largest absolute element-wise difference between two slices.
///
/// # Panics
///
/// Panics if the lengths differ.
pub fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "length mismatch");
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}
