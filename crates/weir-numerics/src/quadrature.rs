//! Quadrature over sampled series.

use crate::error::NumericsError;

/// Trapezoid-rule integral of `values` over `times`.
///
/// Samples are paired by index; `times` must be finite and strictly
/// increasing. Fewer than two samples integrate to zero.
///
/// # Errors
///
/// `InvalidInput` on mismatched lengths, non-finite samples or times
/// that do not increase.
pub fn trapezoid(times: &[f64], values: &[f64]) -> Result<f64, NumericsError> {
    if times.len() != values.len() {
        return Err(NumericsError::invalid(format!(
            "{} times paired with {} values",
            times.len(),
            values.len()
        )));
    }
    if let Some(i) = times
        .iter()
        .zip(values)
        .position(|(t, v)| !(t.is_finite() && v.is_finite()))
    {
        return Err(NumericsError::invalid(format!("sample {i} is not finite")));
    }
    let mut total = 0.0;
    for (i, (t, v)) in times.windows(2).zip(values.windows(2)).enumerate() {
        let dt = t[1] - t[0];
        if dt <= 0.0 {
            return Err(NumericsError::invalid(format!(
                "times not increasing at sample {}: {} then {}",
                i + 1,
                t[0],
                t[1]
            )));
        }
        total += 0.5 * dt * (v[0] + v[1]);
    }
    Ok(total)
}

/// Volume of a hydrograph above a base flow.
///
/// Integrates `max(q - base_flow, 0)` with [`trapezoid`]. With times in
/// seconds and discharge in m³/s the result is in m³.
pub fn flood_volume(times: &[f64], discharge: &[f64], base_flow: f64) -> Result<f64, NumericsError> {
    if !base_flow.is_finite() {
        return Err(NumericsError::invalid(format!(
            "base flow {base_flow} is not finite"
        )));
    }
    let excess: Vec<f64> = discharge.iter().map(|q| (q - base_flow).max(0.0)).collect();
    let volume = trapezoid(times, &excess)?;
    log::debug!(
        "flood volume {volume:.3} over {} samples above base flow {base_flow}",
        times.len()
    );
    Ok(volume)
}
