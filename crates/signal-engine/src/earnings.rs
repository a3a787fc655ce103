use signal_core::interpolate::linear_strength;
use signal_core::EarningsStatus;

/// Surprises smaller than this get the flat minimum score
pub const SURPRISE_FLOOR: f64 = 0.02;
/// Surprises at or above this score 5.0
pub const SURPRISE_CEILING: f64 = 0.20;

/// Fixed score for a scheduled report of unknown magnitude
pub const UPCOMING_STRENGTH: f64 = 3.0;

/// 0-5 strength of the latest earnings event.
///
/// A reported beat or miss always scores at least 1.0: anything under a 2%
/// surprise is a flat step at 1.0, not a continuation of the ramp.
pub fn compute_earnings_strength(status: EarningsStatus, surprise_percent: f64) -> f64 {
    match status {
        EarningsStatus::Upcoming => UPCOMING_STRENGTH,
        EarningsStatus::None => 0.0,
        EarningsStatus::Beat | EarningsStatus::Miss => {
            if !surprise_percent.is_finite() {
                return 0.0;
            }
            let magnitude = surprise_percent.abs();
            if magnitude < SURPRISE_FLOOR {
                1.0
            } else {
                linear_strength(magnitude, SURPRISE_FLOOR, SURPRISE_CEILING)
            }
        }
    }
}
