//! Gradually-varied-flow profiles.
//!
//! Marches `dy/dx = (S0 - Sf) / (1 - Fr²)` upstream from a downstream
//! control depth. Subcritical profiles only: the control must have
//! `Fr < 1`.

use crate::error::NumericsError;
use crate::manning::RectangularChannel;
use crate::ode::{march, Method};

/// Depth profile upstream of a control.
///
/// Returns `steps + 1` points `(x, depth)` in increasing `x`, spaced
/// `reach / steps` apart, with `x = 0` at the upstream end and the
/// control depth at `x = reach`. The depths line up with a grid of the
/// same length and `steps + 1` nodes.
///
/// # Errors
///
/// `InvalidInput` for a non-subcritical control or a bad reach;
/// `Divergence` if the profile reaches critical depth on the way.
pub fn backwater_profile(
    channel: &RectangularChannel,
    discharge: f64,
    gravity: f64,
    control_depth: f64,
    reach: f64,
    steps: usize,
) -> Result<Vec<(f64, f64)>, NumericsError> {
    if !(reach.is_finite() && reach > 0.0) || steps == 0 {
        return Err(NumericsError::invalid(format!(
            "reach {reach} with {steps} steps"
        )));
    }
    if !(discharge.is_finite() && discharge > 0.0 && control_depth > 0.0) {
        return Err(NumericsError::invalid(format!(
            "discharge {discharge} at control depth {control_depth}"
        )));
    }
    let control_froude = channel.froude(control_depth, discharge, gravity);
    if !(control_froude < 1.0) {
        return Err(NumericsError::invalid(format!(
            "control depth {control_depth} is not subcritical (Fr = {control_froude:.3})"
        )));
    }

    let slope = |_: f64, y: f64| {
        let fr2 = channel.froude(y, discharge, gravity).powi(2);
        if y <= 0.0 || fr2 >= 1.0 {
            return f64::NAN;
        }
        (channel.slope - channel.friction_slope(y, discharge)) / (1.0 - fr2)
    };

    let dx = reach / steps as f64;
    let mut profile = march(slope, reach, control_depth, -dx, steps, Method::RungeKutta4)
        .map_err(|e| match e {
            NumericsError::Divergence { reason } => NumericsError::diverged(format!(
                "profile reached critical depth: {reason}"
            )),
            other => other,
        })?;
    profile.reverse();
    if let Some(first) = profile.first_mut() {
        first.0 = 0.0;
    }
    log::debug!(
        "backwater profile over {reach} m: {:.4} m upstream, {control_depth} m at control",
        profile.first().map_or(control_depth, |p| p.1)
    );
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    const G: f64 = 9.81;

    fn channel() -> RectangularChannel {
        RectangularChannel::new(10.0, 0.001, 0.03).unwrap()
    }

    #[test]
    fn m1_profile_relaxes_toward_normal_depth() {
        let c = channel();
        let q = c.discharge(2.0);
        let profile = backwater_profile(&c, q, G, 3.0, 2000.0, 200).unwrap();

        assert_eq!(profile.len(), 201);
        assert_eq!(profile[0].0, 0.0);
        assert_eq!(*profile.last().unwrap(), (2000.0, 3.0));
        assert!(profile.windows(2).all(|w| w[1].0 > w[0].0));
        // Depth rises toward the control and stays above normal depth.
        assert!(profile.windows(2).all(|w| w[1].1 > w[0].1));
        assert!(profile[0].1 > 2.0 && profile[0].1 < 3.0);
    }

    #[test]
    fn normal_depth_control_stays_uniform() {
        let c = channel();
        let q = c.discharge(2.0);
        let profile = backwater_profile(&c, q, G, 2.0, 500.0, 50).unwrap();
        assert!(profile.iter().all(|&(_, y)| (y - 2.0).abs() < 1e-9));
    }

    #[test]
    fn supercritical_control_rejected() {
        let c = channel();
        let q = c.discharge(2.0);
        let yc = c.critical_depth(q, G);
        assert!(matches!(
            backwater_profile(&c, q, G, 0.5 * yc, 100.0, 10),
            Err(NumericsError::InvalidInput { .. })
        ));
    }
}
