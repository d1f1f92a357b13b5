//! Two-buffer state arena with index swap on publish.
//!
//! [`PingPongState`] owns both time levels. [`advance`](PingPongState::advance)
//! hands the fill closure a [`StepGuard`] holding a shared borrow of the
//! published buffer and an exclusive borrow of the staging buffer, then
//! flips the index once the closure returns.

use weir_core::StepId;

use crate::read::{OwnedSnapshot, Snapshot};
use crate::state::State;

/// Double-buffered simulation state.
///
/// Exactly one buffer is published at any observation point. The
/// staging buffer's contents are unspecified between steps.
pub struct PingPongState {
    buffers: [State; 2],
    /// Index of the published buffer.
    current: usize,
    spacing: f64,
    time: f64,
    step_id: StepId,
}

/// Split borrow of both buffers for one step.
///
/// `previous` is the published time level and must only be read;
/// `next` is the staging buffer that the step fills.
pub struct StepGuard<'a> {
    /// Published (pre-update) state.
    pub previous: &'a State,
    /// Staging (post-update) state.
    pub next: &'a mut State,
}

impl PingPongState {
    /// Create an arena whose published buffer is `initial` at `t = 0`.
    ///
    /// The staging buffer starts as a copy so both have the same length.
    pub fn new(initial: State, spacing: f64) -> Self {
        let staging = initial.clone();
        Self {
            buffers: [initial, staging],
            current: 0,
            spacing,
            time: 0.0,
            step_id: StepId(0),
        }
    }

    /// The published state.
    pub fn current(&self) -> &State {
        &self.buffers[self.current]
    }

    /// Simulated time of the published state, seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Step that produced the published state.
    pub fn step_id(&self) -> StepId {
        self.step_id
    }

    /// Node spacing, metres.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Number of nodes per buffer.
    pub fn node_count(&self) -> usize {
        self.buffers[0].len()
    }

    fn begin_step(&mut self) -> StepGuard<'_> {
        let (first, second) = self.buffers.split_at_mut(1);
        if self.current == 0 {
            StepGuard {
                previous: &first[0],
                next: &mut second[0],
            }
        } else {
            StepGuard {
                previous: &second[0],
                next: &mut first[0],
            }
        }
    }

    fn publish(&mut self, dt: f64) {
        self.current = 1 - self.current;
        self.time += dt;
        self.step_id = self.step_id.next();
    }

    /// Run one full begin/fill/publish cycle.
    ///
    /// `fill` receives the split borrow and must write every node of
    /// `next`. The staging buffer is then published at `time + dt`, and
    /// the former published buffer becomes the next staging target.
    pub fn advance<F>(&mut self, dt: f64, fill: F)
    where
        F: FnOnce(StepGuard<'_>),
    {
        fill(self.begin_step());
        self.publish(dt);
    }

    /// Overwrite the published time without stepping.
    ///
    /// Used to land exactly on the end time after floating-point
    /// accumulation.
    pub fn set_time(&mut self, time: f64) {
        self.time = time;
    }

    /// Borrowed read-only view of the published state.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::new(self.current(), self.spacing, self.time, self.step_id)
    }

    /// Owned copy of the published state that can cross threads.
    pub fn owned_snapshot(&self) -> OwnedSnapshot {
        let state = self.current();
        OwnedSnapshot::new(
            self.step_id,
            self.time,
            self.spacing,
            state.depth().to_vec(),
            state.discharge().to_vec(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weir_core::StateView;

    fn arena() -> PingPongState {
        PingPongState::new(State::still(4, 1.0).unwrap(), 2.0)
    }

    #[test]
    fn advance_swaps_buffers() {
        let mut a = arena();
        a.advance(0.5, |guard| {
            assert_eq!(guard.previous.depth(), &[1.0; 4]);
            guard.next.fields_mut().0.fill(3.0);
        });
        assert_eq!(a.current().depth(), &[3.0; 4]);
        assert_eq!(a.time(), 0.5);
        assert_eq!(a.step_id(), StepId(1));

        // Second step writes into the original buffer.
        a.advance(0.25, |guard| {
            assert_eq!(guard.previous.depth(), &[3.0; 4]);
            assert_eq!(guard.next.depth(), &[1.0; 4]);
            guard.next.fields_mut().0.fill(2.0);
        });
        assert_eq!(a.current().depth(), &[2.0; 4]);
        assert_eq!(a.time(), 0.75);
        assert_eq!(a.step_id(), StepId(2));
    }

    #[test]
    fn advance_publishes_filled_buffer() {
        let mut a = arena();
        a.advance(0.5, |guard| {
            *guard.next = guard.previous.clone();
            guard.next.set_node(1, 4.0, 1.0);
        });
        assert_eq!(a.current().depth(), &[1.0, 4.0, 1.0, 1.0]);
        assert_eq!(a.current().discharge()[1], 4.0);
        assert_eq!(a.step_id(), StepId(1));
        assert_eq!(a.time(), 0.5);
    }

    #[test]
    fn snapshots_reflect_published_state() {
        let mut a = arena();
        a.advance(1.0, |guard| {
            *guard.next = guard.previous.clone();
            guard.next.set_node(0, 2.0, 1.0);
        });
        a.set_time(3.0);

        let snap = a.snapshot();
        assert_eq!(snap.time(), 3.0);
        assert_eq!(snap.spacing(), 2.0);
        assert_eq!(snap.depth()[0], 2.0);
        assert_eq!(snap.velocity(0), Some(1.0));

        let owned = a.owned_snapshot();
        assert_eq!(owned.discharge()[0], 2.0);
        assert_eq!(owned.step_id(), StepId(1));
        assert_eq!(owned.node_count(), 4);
    }
}
