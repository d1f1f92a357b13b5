//! Scalar root finding.

use crate::error::NumericsError;

fn check_tolerance(tol: f64) -> Result<(), NumericsError> {
    if tol.is_finite() && tol > 0.0 {
        Ok(())
    } else {
        Err(NumericsError::invalid(format!(
            "tolerance must be positive and finite, got {tol}"
        )))
    }
}

/// Find a root of `f` in `[lo, hi]` by interval halving.
///
/// `f(lo)` and `f(hi)` must differ in sign (or one of them be zero).
/// Stops when the bracket is narrower than `2·tol` or `f` is exactly zero
/// at the midpoint.
///
/// # Errors
///
/// `InvalidInput` for a bad tolerance, an empty interval or a missing
/// sign change; `Convergence` if `max_iter` halvings were not enough.
///
/// ```
/// use weir_numerics::bisection;
///
/// let root = bisection(|x| x * x - 2.0, 0.0, 2.0, 1e-12, 100).unwrap();
/// assert!((root - 2f64.sqrt()).abs() < 1e-11);
/// ```
pub fn bisection<F>(f: F, lo: f64, hi: f64, tol: f64, max_iter: usize) -> Result<f64, NumericsError>
where
    F: Fn(f64) -> f64,
{
    check_tolerance(tol)?;
    if !(lo.is_finite() && hi.is_finite() && lo < hi) {
        return Err(NumericsError::invalid(format!(
            "bracket [{lo}, {hi}] is empty or not finite"
        )));
    }
    let (mut lo, mut hi) = (lo, hi);
    let mut f_lo = f(lo);
    let f_hi = f(hi);
    if f_lo == 0.0 {
        return Ok(lo);
    }
    if f_hi == 0.0 {
        return Ok(hi);
    }
    if !(f_lo.is_finite() && f_hi.is_finite()) || f_lo.signum() == f_hi.signum() {
        return Err(NumericsError::invalid(format!(
            "no sign change on [{lo}, {hi}]: f = {f_lo}, {f_hi}"
        )));
    }

    let mut mid = 0.5 * (lo + hi);
    for _ in 0..max_iter {
        mid = 0.5 * (lo + hi);
        let f_mid = f(mid);
        if f_mid == 0.0 || 0.5 * (hi - lo) < tol {
            return Ok(mid);
        }
        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }
    Err(NumericsError::Convergence {
        iterations: max_iter,
        last: mid,
    })
}

/// Find a root of `f` near `x0` by Newton-Raphson.
///
/// The derivative is a central difference with a step scaled to `|x|`.
/// Converged when an update is smaller than `tol·max(1, |x|)`.
///
/// # Errors
///
/// `Divergence` if the derivative vanishes or an iterate is not finite;
/// `Convergence` if `max_iter` updates were not enough.
pub fn newton<F>(f: F, x0: f64, tol: f64, max_iter: usize) -> Result<f64, NumericsError>
where
    F: Fn(f64) -> f64,
{
    check_tolerance(tol)?;
    let mut x = x0;
    for _ in 0..max_iter {
        let fx = f(x);
        if !fx.is_finite() {
            return Err(NumericsError::diverged(format!("f({x}) = {fx}")));
        }
        let h = 1e-6 * x.abs().max(1.0);
        let slope = (f(x + h) - f(x - h)) / (2.0 * h);
        if slope == 0.0 || !slope.is_finite() {
            return Err(NumericsError::diverged(format!(
                "derivative {slope} at x = {x}"
            )));
        }
        let dx = fx / slope;
        let next = x - dx;
        if !next.is_finite() {
            return Err(NumericsError::diverged(format!("iterate {next} after x = {x}")));
        }
        x = next;
        if dx.abs() <= tol * x.abs().max(1.0) {
            return Ok(x);
        }
    }
    Err(NumericsError::Convergence {
        iterations: max_iter,
        last: x,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn bisection_finds_sqrt_two() {
        let r = bisection(|x| x * x - 2.0, 0.0, 2.0, 1e-12, 200).unwrap();
        assert!((r - 2f64.sqrt()).abs() < 1e-11);
    }

    #[test]
    fn bisection_endpoint_root() {
        assert_eq!(bisection(|x| x - 1.0, 1.0, 3.0, 1e-9, 10).unwrap(), 1.0);
        assert_eq!(bisection(|x| x - 3.0, 1.0, 3.0, 1e-9, 10).unwrap(), 3.0);
    }

    #[test]
    fn bisection_rejects_bad_input() {
        assert!(matches!(
            bisection(|x| x * x + 1.0, -1.0, 1.0, 1e-9, 50),
            Err(NumericsError::InvalidInput { .. })
        ));
        assert!(matches!(
            bisection(|x| x, 1.0, -1.0, 1e-9, 50),
            Err(NumericsError::InvalidInput { .. })
        ));
        assert!(matches!(
            bisection(|x| x, -1.0, 1.0, 0.0, 50),
            Err(NumericsError::InvalidInput { .. })
        ));
    }

    #[test]
    fn bisection_budget() {
        match bisection(|x| x - 0.3, 0.0, 1.0, 1e-15, 3) {
            Err(NumericsError::Convergence { iterations, last }) => {
                assert_eq!(iterations, 3);
                assert!((last - 0.3).abs() < 0.25);
            }
            other => panic!("expected convergence failure, got {other:?}"),
        }
    }

    #[test]
    fn newton_fixed_point_of_cosine() {
        let r = newton(|x| x.cos() - x, 1.0, 1e-12, 50).unwrap();
        assert!((r - 0.739_085_133_215_160_6).abs() < 1e-9);
    }

    #[test]
    fn newton_flat_derivative_diverges() {
        assert!(matches!(
            newton(|x| x * x + 1.0, 0.0, 1e-9, 50),
            Err(NumericsError::Divergence { .. })
        ));
    }

    #[test]
    fn newton_budget() {
        assert!(matches!(
            newton(|x| x.cos() - x, 10.0, 1e-14, 1),
            Err(NumericsError::Convergence { iterations: 1, .. })
        ));
    }

    proptest! {
        #[test]
        fn bisection_brackets_any_linear_root(root in -10.0f64..10.0, slope in 0.1f64..10.0) {
            let r = bisection(|x| slope * (x - root), -20.0, 20.0, 1e-10, 200).unwrap();
            prop_assert!((r - root).abs() < 1e-9);
        }
    }
}
