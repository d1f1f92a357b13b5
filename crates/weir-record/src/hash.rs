//! Hashing utilities for snapshot comparison.
//!
//! Uses FNV-1a for fast, deterministic hashing of solver state. These
//! hashes are not cryptographically secure; they are used for fast
//! equality checks between runs.

use weir_core::StateView;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

/// Feed a u64 (as 8 LE bytes) into an FNV-1a hash state.
#[inline]
fn fnv1a_u64(mut hash: u64, v: u64) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = (hash ^ b as u64).wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Hash a state's step id, time, node count, depth and discharge.
///
/// Every `f64` is hashed through `to_bits()`, so `-0.0` and `0.0`
/// differ and any NaN payload is significant.
pub fn snapshot_hash(view: &dyn StateView) -> u64 {
    fold_snapshot(FNV_OFFSET, view)
}

/// Hash a sequence of states in order.
///
/// Returns `FNV_OFFSET` for an empty sequence.
pub fn run_hash<'a, I>(views: I) -> u64
where
    I: IntoIterator<Item = &'a dyn StateView>,
{
    views.into_iter().fold(FNV_OFFSET, fold_snapshot)
}

fn fold_snapshot(mut hash: u64, view: &dyn StateView) -> u64 {
    hash = fnv1a_u64(hash, view.step_id().0);
    hash = fnv1a_u64(hash, view.time().to_bits());
    hash = fnv1a_u64(hash, view.node_count() as u64);
    for &h in view.depth() {
        hash = fnv1a_u64(hash, h.to_bits());
    }
    for &q in view.discharge() {
        hash = fnv1a_u64(hash, q.to_bits());
    }
    hash
}
