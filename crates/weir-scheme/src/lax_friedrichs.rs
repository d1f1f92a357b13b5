//! Lax-Friedrichs interior update.
//!
//! For every interior node `j = 1 .. N-2`, both conserved components are
//! advanced as
//!
//! ```text
//! U_new[j] = ½·(U[j+1] + U[j-1]) − dt/(2·Δx) · (F[j+1] − F[j-1])
//! ```
//!
//! The neighbour average is what makes the centred flux difference
//! stable; it is also the scheme's numerical diffusion. Edge nodes are
//! never written here.

use weir_arena::State;

use crate::flux::Flux;

/// The Lax-Friedrichs updater.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LaxFriedrichs;

impl LaxFriedrichs {
    /// Write the interior of `next` from `prev` and its fluxes.
    ///
    /// `fluxes` must have been computed from `prev`. Nodes `0` and `N-1`
    /// of `next` are left as they were. No positivity check is made on the
    /// result; the next step's scan catches a collapsed node.
    ///
    /// # Panics
    ///
    /// Panics if `prev`, `fluxes` and `next` differ in length.
    pub fn update_interior(prev: &State, fluxes: &[Flux], dt: f64, spacing: f64, next: &mut State) {
        let n = prev.len();
        assert_eq!(fluxes.len(), n, "flux buffer length");
        assert_eq!(next.len(), n, "staging buffer length");

        let h = prev.depth();
        let hu = prev.discharge();
        let ratio = dt / (2.0 * spacing);
        let (h_new, hu_new) = next.fields_mut();

        for j in 1..n - 1 {
            let (l, r) = (j - 1, j + 1);
            h_new[j] = 0.5 * (h[r] + h[l]) - ratio * (fluxes[r].mass - fluxes[l].mass);
            hu_new[j] =
                0.5 * (hu[r] + hu[l]) - ratio * (fluxes[r].momentum - fluxes[l].momentum);
        }
    }
}
