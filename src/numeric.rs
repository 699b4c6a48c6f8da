//! numeric.rs — normalization and blending primitives shared by all scores.
//!
//! Everything here is pure and stateless. Raw signals may be negative or exceed
//! their typical range; normalization clamps instead of erroring. The one
//! nonlinear step (the sigmoid sharpener used by the breakout score) lives here
//! as a named transform so its pivot and steepness stay visible and tunable.

use crate::error::EngineError;

/// Pivot of the breakout sharpening step: composites at exactly this value map
/// to 0.5, below get pushed down, above get pushed up.
pub const SHARPEN_PIVOT: f64 = 0.5;

/// Steepness multiplier of the breakout sharpening step.
pub const SHARPEN_STEEPNESS: f64 = 4.0;

/// Clamp `x` into `[lo, hi]`.
pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    if x < lo {
        lo
    } else if x > hi {
        hi
    } else {
        x
    }
}

/// Clamp to [0.0, 1.0].
pub fn clamp01(x: f64) -> f64 {
    clamp(x, 0.0, 1.0)
}

/// Linearly map `x` from `[min, max]` onto [0,1], clamping values outside the
/// domain to the nearest endpoint. Monotonic non-decreasing. `min < max` is a
/// caller contract; a degenerate domain is a programming error.
pub fn normalize(x: f64, min: f64, max: f64) -> f64 {
    debug_assert!(min < max, "normalize requires min < max");
    clamp01((x - min) / (max - min))
}

/// Dot product of `values` and `weights`.
///
/// Caller contract: weights already sum to 1.0 (every weight vector in this
/// engine does). The sum is asserted in debug builds so an edited weight table
/// fails tests immediately; release builds trust the contract. Mismatched
/// lengths are always an error.
pub fn weighted_average(values: &[f64], weights: &[f64]) -> Result<f64, EngineError> {
    if values.len() != weights.len() {
        return Err(EngineError::invalid(format!(
            "weighted_average: {} values vs {} weights",
            values.len(),
            weights.len()
        )));
    }
    debug_assert!(
        (weights.iter().sum::<f64>() - 1.0).abs() < 1e-6,
        "weight vector must sum to 1.0"
    );
    Ok(values.iter().zip(weights).map(|(v, w)| v * w).sum())
}

/// Logistic curve: `1 / (1 + e^(-steepness * x))`.
pub fn sigmoid(x: f64, steepness: f64) -> f64 {
    1.0 / (1.0 + (-steepness * x).exp())
}

/// Sharpen a [0,1] composite around [`SHARPEN_PIVOT`]: mid-range values are
/// pushed toward a decisive 0/1 while the pivot itself stays at 0.5. Used by
/// the breakout score; a plain weighted average near 0.5 would under-classify
/// genuinely promising artists as "maybe".
pub fn sharpen_composite(raw: f64) -> f64 {
    clamp01(sigmoid((raw - SHARPEN_PIVOT) * SHARPEN_STEEPNESS, 1.0))
}

/// Round to 3 decimal places (output convention for all [0,1] scores).
pub fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

/// Round to 1 decimal place (percentage breakdown convention).
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Reject non-finite signal values up front instead of letting NaN propagate
/// through a composite.
pub fn ensure_finite(name: &str, x: f64) -> Result<f64, EngineError> {
    if x.is_finite() {
        Ok(x)
    } else {
        Err(EngineError::invalid(format!("{name} is not finite")))
    }
}
