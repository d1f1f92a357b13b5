//! Conserved-variable state at a single time level.

use weir_core::ConfigError;

/// Depth and discharge per node at one time level.
///
/// `h[j]` is the water depth in metres and `hu[j]` the discharge per unit
/// width in m²/s. Both vectors always have the same length. Constructors
/// validate positivity; the arena's staging buffer is overwritten in place
/// and is validated by the next step's scan instead.
#[derive(Clone, Debug, PartialEq)]
pub struct State {
    h: Vec<f64>,
    hu: Vec<f64>,
}

impl State {
    /// Build a state from depth and velocity per node.
    ///
    /// Fails if the slices differ in length or are empty, any depth is not
    /// finite and positive, or any velocity is not finite.
    pub fn from_primitive(depth: &[f64], velocity: &[f64]) -> Result<Self, ConfigError> {
        check_lengths(depth.len(), velocity.len())?;
        check_depths(depth)?;
        if let Some((j, u)) = first_non_finite(velocity) {
            return Err(ConfigError::InvalidState {
                reason: format!("velocity at node {j} is not finite ({u})"),
            });
        }
        let hu = depth.iter().zip(velocity).map(|(h, u)| h * u).collect();
        Ok(Self {
            h: depth.to_vec(),
            hu,
        })
    }

    /// Build a state directly from conserved variables.
    ///
    /// Same validation as [`from_primitive`](Self::from_primitive), applied
    /// to `hu` instead of velocity.
    pub fn from_conserved(h: Vec<f64>, hu: Vec<f64>) -> Result<Self, ConfigError> {
        check_lengths(h.len(), hu.len())?;
        check_depths(&h)?;
        if let Some((j, q)) = first_non_finite(&hu) {
            return Err(ConfigError::InvalidState {
                reason: format!("discharge at node {j} is not finite ({q})"),
            });
        }
        Ok(Self { h, hu })
    }

    /// Still water of uniform `depth` over `node_count` nodes.
    pub fn still(node_count: usize, depth: f64) -> Result<Self, ConfigError> {
        Self::from_conserved(vec![depth; node_count], vec![0.0; node_count])
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.h.len()
    }

    /// Always `false` for a validated state; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.h.is_empty()
    }

    /// Depth per node, metres.
    pub fn depth(&self) -> &[f64] {
        &self.h
    }

    /// Discharge per unit width per node, m²/s.
    pub fn discharge(&self) -> &[f64] {
        &self.hu
    }

    /// Mutable depth and discharge, borrowed together.
    pub fn fields_mut(&mut self) -> (&mut [f64], &mut [f64]) {
        (&mut self.h, &mut self.hu)
    }

    /// Velocity `hu / h` at node `j`.
    ///
    /// # Panics
    ///
    /// Panics if `j` is out of range.
    pub fn velocity(&self, j: usize) -> f64 {
        self.hu[j] / self.h[j]
    }

    /// Velocity at every node.
    pub fn velocities(&self) -> Vec<f64> {
        self.h.iter().zip(&self.hu).map(|(h, hu)| hu / h).collect()
    }

    /// Set node `j` from primitive variables.
    pub fn set_node(&mut self, j: usize, depth: f64, velocity: f64) {
        self.h[j] = depth;
        self.hu[j] = depth * velocity;
    }

    /// Copy node `src` into node `dst` (both components).
    pub fn copy_node(&mut self, src: usize, dst: usize) {
        self.h[dst] = self.h[src];
        self.hu[dst] = self.hu[src];
    }

    /// Total water volume per unit width, `Σ h_j · Δx` (m²).
    pub fn mass(&self, spacing: f64) -> f64 {
        self.h.iter().sum::<f64>() * spacing
    }

    /// Total momentum per unit width, `Σ hu_j · Δx` (m³/s).
    pub fn momentum(&self, spacing: f64) -> f64 {
        self.hu.iter().sum::<f64>() * spacing
    }
}

fn check_lengths(h: usize, other: usize) -> Result<(), ConfigError> {
    if h == 0 {
        return Err(ConfigError::InvalidState {
            reason: "state has no nodes".to_string(),
        });
    }
    if h != other {
        return Err(ConfigError::InvalidState {
            reason: format!("depth has {h} nodes but the second field has {other}"),
        });
    }
    Ok(())
}

fn check_depths(h: &[f64]) -> Result<(), ConfigError> {
    match h.iter().position(|v| !v.is_finite() || *v <= 0.0) {
        Some(node) => Err(ConfigError::NonPositiveDepth {
            node,
            value: h[node],
        }),
        None => Ok(()),
    }
}

fn first_non_finite(values: &[f64]) -> Option<(usize, f64)> {
    values
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite())
        .map(|(j, v)| (j, *v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_primitive_builds_discharge() {
        let s = State::from_primitive(&[2.0, 4.0], &[0.5, -1.0]).unwrap();
        assert_eq!(s.discharge(), &[1.0, -4.0]);
        assert_eq!(s.velocity(1), -1.0);
        assert_eq!(s.velocities(), vec![0.5, -1.0]);
    }

    #[test]
    fn rejects_non_positive_depth() {
        let err = State::from_primitive(&[1.0, 0.0, 1.0], &[0.0; 3]).unwrap_err();
        assert_eq!(err, ConfigError::NonPositiveDepth { node: 1, value: 0.0 });

        let err = State::from_conserved(vec![1.0, -2.0], vec![0.0; 2]).unwrap_err();
        assert!(matches!(err, ConfigError::NonPositiveDepth { node: 1, .. }));

        let err = State::still(4, f64::NAN).unwrap_err();
        assert!(matches!(err, ConfigError::NonPositiveDepth { node: 0, .. }));
    }

    #[test]
    fn rejects_mismatched_or_empty() {
        assert!(matches!(
            State::from_primitive(&[1.0, 1.0], &[0.0]),
            Err(ConfigError::InvalidState { .. })
        ));
        assert!(matches!(
            State::from_conserved(vec![], vec![]),
            Err(ConfigError::InvalidState { .. })
        ));
    }

    #[test]
    fn rejects_non_finite_velocity_and_discharge() {
        assert!(matches!(
            State::from_primitive(&[1.0, 1.0], &[0.0, f64::INFINITY]),
            Err(ConfigError::InvalidState { .. })
        ));
        assert!(matches!(
            State::from_conserved(vec![1.0], vec![f64::NAN]),
            Err(ConfigError::InvalidState { .. })
        ));
    }

    #[test]
    fn mass_and_momentum() {
        let s = State::from_conserved(vec![1.0, 2.0, 3.0], vec![0.5, 0.0, -1.5]).unwrap();
        assert_eq!(s.mass(10.0), 60.0);
        assert_eq!(s.momentum(2.0), -2.0);
    }

    #[test]
    fn node_helpers() {
        let mut s = State::still(3, 1.0).unwrap();
        s.set_node(2, 2.0, 3.0);
        assert_eq!(s.discharge()[2], 6.0);
        s.copy_node(2, 0);
        assert_eq!(s.depth(), &[2.0, 1.0, 2.0]);
        assert_eq!(s.discharge(), &[6.0, 0.0, 6.0]);
    }
}
