//! Fixed-step marching of a scalar first-order ODE.

use crate::error::NumericsError;

/// Integration rule for [`march`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Method {
    /// Explicit Euler, first order.
    Euler,
    /// Classical fourth-order Runge-Kutta.
    #[default]
    RungeKutta4,
}

/// March `dy/dx = f(x, y)` from `(x0, y0)` for `count` steps of `step`.
///
/// `step` may be negative to march toward smaller `x`. Returns
/// `count + 1` points starting with `(x0, y0)`. Abscissae are computed
/// as `x0 + i·step` so they do not accumulate rounding.
///
/// # Errors
///
/// `InvalidInput` for a zero or non-finite step or start;
/// `Divergence` as soon as a slope or state is not finite.
pub fn march<F>(
    f: F,
    x0: f64,
    y0: f64,
    step: f64,
    count: usize,
    method: Method,
) -> Result<Vec<(f64, f64)>, NumericsError>
where
    F: Fn(f64, f64) -> f64,
{
    if !(step.is_finite() && step != 0.0) {
        return Err(NumericsError::invalid(format!(
            "step must be finite and non-zero, got {step}"
        )));
    }
    if !(x0.is_finite() && y0.is_finite()) {
        return Err(NumericsError::invalid(format!(
            "start ({x0}, {y0}) is not finite"
        )));
    }

    let mut points = Vec::with_capacity(count + 1);
    points.push((x0, y0));
    let mut y = y0;
    for i in 0..count {
        let x = x0 + i as f64 * step;
        let next = match method {
            Method::Euler => y + step * f(x, y),
            Method::RungeKutta4 => {
                let half = 0.5 * step;
                let k1 = f(x, y);
                let k2 = f(x + half, y + half * k1);
                let k3 = f(x + half, y + half * k2);
                let k4 = f(x + step, y + step * k3);
                y + step / 6.0 * (k1 + 2.0 * k2 + 2.0 * k3 + k4)
            }
        };
        if !next.is_finite() {
            return Err(NumericsError::diverged(format!(
                "state {next} at x = {} after {} steps",
                x + step,
                i + 1
            )));
        }
        y = next;
        points.push((x0 + (i + 1) as f64 * step, y));
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euler_growth_matches_closed_form() {
        let pts = march(|_, y| y, 0.0, 1.0, 0.1, 10, Method::Euler).unwrap();
        assert_eq!(pts.len(), 11);
        let (x, y) = pts[10];
        assert!((x - 1.0).abs() < 1e-12);
        assert!((y - 1.1f64.powi(10)).abs() < 1e-12);
    }

    #[test]
    fn rk4_exponential() {
        let pts = march(|_, y| y, 0.0, 1.0, 0.1, 10, Method::RungeKutta4).unwrap();
        assert!((pts[10].1 - std::f64::consts::E).abs() < 1e-5);
    }

    #[test]
    fn rk4_marches_backward() {
        let e = std::f64::consts::E;
        let pts = march(|_, y| y, 1.0, e, -0.1, 10, Method::RungeKutta4).unwrap();
        let (x, y) = pts[10];
        assert!(x.abs() < 1e-12);
        assert!((y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn rk4_integrates_time_dependent_slope() {
        // dy/dx = 3x², exact for a cubic.
        let pts = march(|x, _| 3.0 * x * x, 0.0, 0.0, 0.25, 8, Method::RungeKutta4).unwrap();
        assert!((pts[8].1 - 8.0).abs() < 1e-12);
    }

    #[test]
    fn non_finite_state_diverges() {
        let f = |_: f64, y: f64| if y > 2.0 { f64::NAN } else { y };
        assert!(matches!(
            march(f, 0.0, 1.0, 0.5, 20, Method::Euler),
            Err(NumericsError::Divergence { .. })
        ));
    }

    #[test]
    fn zero_step_rejected() {
        assert!(matches!(
            march(|_, y| y, 0.0, 1.0, 0.0, 5, Method::Euler),
            Err(NumericsError::InvalidInput { .. })
        ));
    }
}
