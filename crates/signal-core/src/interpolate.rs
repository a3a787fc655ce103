//! Score interpolation helpers shared by the strength calculators.
//!
//! Every strength score lives on a 0-5 scale: 0 means "no signal", and an
//! active reading is mapped onto 1.0-5.0 between a floor and a ceiling
//! threshold. Callers decide what happens below the floor (some signals drop
//! to 0, earnings keeps a stepped 1.0); these helpers only handle the ramp.

/// Lowest score an active signal can have.
pub const STRENGTH_FLOOR: f64 = 1.0;

/// Highest score any signal can have.
pub const STRENGTH_CEILING: f64 = 5.0;

/// Linear ramp from `low` (1.0) to `high` (5.0), clamped to [1, 5].
///
/// Returns 0.0 when the band is empty or the value is not finite.
pub fn linear_strength(value: f64, low: f64, high: f64) -> f64 {
    if !value.is_finite() || high <= low {
        return 0.0;
    }
    let t = (value - low) / (high - low);
    ramp(t)
}

/// Logarithmic ramp from `low` (1.0) to `high` (5.0), clamped to [1, 5].
///
/// Dollar amounts span several orders of magnitude, so interpolation happens
/// on log10 of the value. Non-positive thresholds or values return 0.0.
pub fn log_strength(value: f64, low: f64, high: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 || low <= 0.0 || high <= low {
        return 0.0;
    }
    let t = (value.log10() - low.log10()) / (high.log10() - low.log10());
    ramp(t)
}

fn ramp(t: f64) -> f64 {
    (STRENGTH_FLOOR + t * (STRENGTH_CEILING - STRENGTH_FLOOR)).clamp(STRENGTH_FLOOR, STRENGTH_CEILING)
}
