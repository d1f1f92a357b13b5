//! Read-only views of a published time level.
//!
//! [`Snapshot`] borrows from the published buffer of a
//! [`PingPongState`](crate::PingPongState). [`OwnedSnapshot`] copies the
//! arrays out so a sample can outlive the run or be sent to another thread.

use weir_core::{StateView, StepId};

use crate::state::State;

/// A borrowed view of the published state.
///
/// Cannot outlive the arena, and no step can begin while one is alive.
pub struct Snapshot<'a> {
    state: &'a State,
    spacing: f64,
    time: f64,
    step_id: StepId,
}

impl<'a> Snapshot<'a> {
    pub(crate) fn new(state: &'a State, spacing: f64, time: f64, step_id: StepId) -> Self {
        Self {
            state,
            spacing,
            time,
            step_id,
        }
    }

    /// The underlying state.
    pub fn state(&self) -> &'a State {
        self.state
    }
}

impl StateView for Snapshot<'_> {
    fn step_id(&self) -> StepId {
        self.step_id
    }

    fn time(&self) -> f64 {
        self.time
    }

    fn spacing(&self) -> f64 {
        self.spacing
    }

    fn depth(&self) -> &[f64] {
        self.state.depth()
    }

    fn discharge(&self) -> &[f64] {
        self.state.discharge()
    }
}

/// A sampled time level that owns its data.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnedSnapshot {
    step_id: StepId,
    time: f64,
    spacing: f64,
    depth: Vec<f64>,
    discharge: Vec<f64>,
}

impl OwnedSnapshot {
    /// Assemble a snapshot from its parts.
    pub fn new(
        step_id: StepId,
        time: f64,
        spacing: f64,
        depth: Vec<f64>,
        discharge: Vec<f64>,
    ) -> Self {
        Self {
            step_id,
            time,
            spacing,
            depth,
            discharge,
        }
    }

    /// Copy any view into an owned snapshot.
    pub fn capture(view: &dyn StateView) -> Self {
        Self::new(
            view.step_id(),
            view.time(),
            view.spacing(),
            view.depth().to_vec(),
            view.discharge().to_vec(),
        )
    }

    /// Velocity at every node.
    pub fn velocities(&self) -> Vec<f64> {
        self.depth
            .iter()
            .zip(&self.discharge)
            .map(|(h, hu)| hu / h)
            .collect()
    }

    /// `Σ h_j · Δx` for this sample.
    pub fn mass(&self) -> f64 {
        self.depth.iter().sum::<f64>() * self.spacing
    }
}

impl StateView for OwnedSnapshot {
    fn step_id(&self) -> StepId {
        self.step_id
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
