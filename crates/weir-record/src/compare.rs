//! Run comparison for determinism checks.
//!
//! Hash-first comparison with an element-wise fallback that locates the
//! first divergent node.

use std::fmt;

use weir_core::StateView;

use crate::hash::snapshot_hash;

/// What differed between two samples.
#[derive(Clone, Debug, PartialEq)]
pub enum DivergenceKind {
    /// The runs produced different numbers of samples.
    FrameCount {
        /// Samples in the recorded run.
        recorded: usize,
        /// Samples in the replayed run.
        replayed: usize,
    },
    /// The samples have different node counts.
    NodeCount {
        /// Nodes in the recorded sample.
        recorded: usize,
        /// Nodes in the replayed sample.
        replayed: usize,
    },
    /// The sample times differ beyond tolerance.
    Time {
        /// Recorded time, seconds.
        recorded: f64,
        /// Replayed time, seconds.
        replayed: f64,
    },
    /// A depth differs beyond tolerance.
    Depth {
        /// First divergent node.
        node: usize,
        /// Recorded depth.
        recorded: f64,
        /// Replayed depth.
        replayed: f64,
    },
    /// A discharge differs beyond tolerance.
    Discharge {
        /// First divergent node.
        node: usize,
        /// Recorded discharge.
        recorded: f64,
        /// Replayed discharge.
        replayed: f64,
    },
}

/// The first point at which two runs disagree.
#[derive(Clone, Debug, PartialEq)]
pub struct Divergence {
    /// Index of the sample in sequence order.
    pub frame: usize,
    /// What differed.
    pub kind: DivergenceKind,
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sample {}: ", self.frame)?;
        match &self.kind {
            DivergenceKind::FrameCount { recorded, replayed } => {
                write!(f, "{recorded} recorded samples vs {replayed} replayed")
            }
            DivergenceKind::NodeCount { recorded, replayed } => {
                write!(f, "{recorded} recorded nodes vs {replayed} replayed")
            }
            DivergenceKind::Time { recorded, replayed } => {
                write!(f, "time {recorded} vs {replayed}")
            }
            DivergenceKind::Depth {
                node,
                recorded,
                replayed,
            } => write!(f, "depth at node {node}: {recorded} vs {replayed}"),
            DivergenceKind::Discharge {
                node,
                recorded,
                replayed,
            } => write!(f, "discharge at node {node}: {recorded} vs {replayed}"),
        }
    }
}

/// Compare two samples.
///
/// With `tolerance == 0.0` the comparison is bit-exact and short-circuits
/// on equal hashes. Otherwise values agree when `|a - b| <= tolerance`.
pub fn compare_snapshot(
    recorded: &dyn StateView,
    replayed: &dyn StateView,
    tolerance: f64,
) -> Option<DivergenceKind> {
    if tolerance == 0.0 && snapshot_hash(recorded) == snapshot_hash(replayed) {
        return None;
    }
    if recorded.node_count() != replayed.node_count() {
        return Some(DivergenceKind::NodeCount {
            recorded: recorded.node_count(),
            replayed: replayed.node_count(),
        });
    }
    let differs = |a: f64, b: f64| {
        if tolerance == 0.0 {
            a.to_bits() != b.to_bits()
        } else {
            !((a - b).abs() <= tolerance)
        }
    };
    if differs(recorded.time(), replayed.time()) {
        return Some(DivergenceKind::Time {
            recorded: recorded.time(),
            replayed: replayed.time(),
        });
    }
    let depth = recorded.depth().iter().zip(replayed.depth()).enumerate();
    for (node, (&a, &b)) in depth {
        if differs(a, b) {
            return Some(DivergenceKind::Depth {
                node,
                recorded: a,
                replayed: b,
            });
        }
    }
    let discharge = recorded
        .discharge()
        .iter()
        .zip(replayed.discharge())
        .enumerate();
    for (node, (&a, &b)) in discharge {
        if differs(a, b) {
            return Some(DivergenceKind::Discharge {
                node,
                recorded: a,
                replayed: b,
            });
        }
    }
    None
}

/// Compare two sample sequences, returning the first divergence.
pub fn compare_runs<A, B>(recorded: &[A], replayed: &[B], tolerance: f64) -> Option<Divergence>
where
    A: StateView,
    B: StateView,
{
    for (frame, (a, b)) in recorded.iter().zip(replayed).enumerate() {
        if let Some(kind) = compare_snapshot(a, b, tolerance) {
            return Some(Divergence { frame, kind });
        }
    }
    if recorded.len() != replayed.len() {
        return Some(Divergence {
            frame: recorded.len().min(replayed.len()),
            kind: DivergenceKind::FrameCount {
                recorded: recorded.len(),
                replayed: replayed.len(),
            },
        });
    }
    None
}
