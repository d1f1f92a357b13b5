//! Core abstraction traits for reading published states.

use crate::error::SinkError;
use crate::id::StepId;

/// Read-only access to a published time level.
///
/// Implemented by the arena's borrowed and owned snapshots. Sinks,
/// writers and hashers read through `&dyn StateView` rather than
/// referencing the arena types directly.
pub trait StateView {
    /// The step that produced this state (`StepId(0)` is the initial state).
    fn step_id(&self) -> StepId;

    /// Simulated time in seconds.
    fn time(&self) -> f64;

    /// Node spacing in metres.
    fn spacing(&self) -> f64;

    /// Depth `h` per node, in metres.
    fn depth(&self) -> &[f64];

    /// Discharge per unit width `hu` per node, in m²/s.
    fn discharge(&self) -> &[f64];

    /// Number of nodes.
    fn node_count(&self) -> usize {
        self.depth().len()
    }

    /// Depth-averaged velocity `hu / h` at `node`, in m/s.
    ///
    /// Returns `None` if the node is out of range.
    fn velocity(&self, node: usize) -> Option<f64> {
        let h = *self.depth().get(node)?;
        let hu = *self.discharge().get(node)?;
        Some(hu / h)
    }
}

/// Receives periodic samples of the solver state.
///
/// The hand-off is a synchronous, bounded call: implementations copy
/// what they need out of the view and return. The driver never retries
/// a rejected sample.
pub trait SnapshotSink {
    /// Accept one sampled state.
    fn accept(&mut self, snapshot: &dyn StateView) -> Result<(), SinkError>;
}

impl<S: SnapshotSink + ?Sized> SnapshotSink for &mut S {
    fn accept(&mut self, snapshot: &dyn StateView) -> Result<(), SinkError> {
        (**self).accept(snapshot)
    }
}
