//! Uniform flow in a rectangular channel (SI Manning formula).

use crate::error::NumericsError;
use crate::root::{bisection, newton};

const DEPTH_TOL: f64 = 1e-10;
const MAX_ITER: usize = 200;

/// A prismatic rectangular channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectangularChannel {
    /// Bed width, metres.
    pub width: f64,
    /// Bed slope `S0`, dimensionless, positive downhill.
    pub slope: f64,
    /// Manning roughness `n`, s/m^(1/3).
    pub roughness: f64,
}

impl RectangularChannel {
    /// Validate and build a channel.
    pub fn new(width: f64, slope: f64, roughness: f64) -> Result<Self, NumericsError> {
        for (name, value) in [("width", width), ("slope", slope), ("roughness", roughness)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(NumericsError::invalid(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        Ok(Self {
            width,
            slope,
            roughness,
        })
    }

    /// Flow area `b·y`.
    pub fn area(&self, depth: f64) -> f64 {
        self.width * depth
    }

    /// Wetted perimeter `b + 2y`.
    pub fn wetted_perimeter(&self, depth: f64) -> f64 {
        self.width + 2.0 * depth
    }

    /// Hydraulic radius `A / P`.
    pub fn hydraulic_radius(&self, depth: f64) -> f64 {
        self.area(depth) / self.wetted_perimeter(depth)
    }

    /// Friction slope `(n·Q)² / (A²·R^{4/3})` at `depth` carrying `discharge`.
    pub fn friction_slope(&self, depth: f64, discharge: f64) -> f64 {
        let a = self.area(depth);
        let r = self.hydraulic_radius(depth);
        (self.roughness * discharge).powi(2) / (a * a * r.powf(4.0 / 3.0))
    }

    /// Uniform-flow discharge `Q = (1/n)·A·R^{2/3}·S0^{1/2}`, m³/s.
    pub fn discharge(&self, depth: f64) -> f64 {
        self.area(depth) * self.hydraulic_radius(depth).powf(2.0 / 3.0) * self.slope.sqrt()
            / self.roughness
    }

    /// Depth at which uniform flow carries `discharge`.
    ///
    /// Newton from the wide-channel estimate first; if that diverges or
    /// lands on a non-positive depth, bisection on a bracket grown until
    /// it encloses the answer.
    pub fn normal_depth(&self, discharge: f64) -> Result<f64, NumericsError> {
        if !(discharge.is_finite() && discharge > 0.0) {
            return Err(NumericsError::invalid(format!(
                "discharge must be positive and finite, got {discharge}"
            )));
        }
        let residual = |y: f64| self.discharge(y) - discharge;
        let guess = (discharge * self.roughness / (self.width * self.slope.sqrt())).powf(0.6);

        match newton(residual, guess, DEPTH_TOL, MAX_ITER) {
            Ok(depth) if depth > 0.0 => return Ok(depth),
            Ok(depth) => log::debug!("newton reached depth {depth}, falling back to bisection"),
            Err(e) => log::debug!("newton failed for normal depth ({e}), falling back to bisection"),
        }

        let mut hi = guess.max(1.0);
        while residual(hi) < 0.0 {
            hi *= 2.0;
            if !hi.is_finite() {
                return Err(NumericsError::diverged(
                    "no depth carries the requested discharge",
                ));
            }
        }
        bisection(residual, 0.0, hi, DEPTH_TOL, MAX_ITER)
    }

    /// Depth at which the Froude number is one, `(q²/g)^{1/3}` with `q = Q/b`.
    pub fn critical_depth(&self, discharge: f64, gravity: f64) -> f64 {
        let q = discharge / self.width;
        (q * q / gravity).cbrt()
    }

    /// Froude number `V / √(g·y)` with `V = Q / A`.
    pub fn froude(&self, depth: f64, discharge: f64, gravity: f64) -> f64 {
        discharge / self.area(depth) / (gravity * depth).sqrt()
    }
}
