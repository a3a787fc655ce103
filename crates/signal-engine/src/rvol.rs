//! Relative volume: shares traded so far versus what is normal by this time of day.

use signal_core::interpolate::{linear_strength, STRENGTH_CEILING};

/// RVOL below this is ordinary trading
pub const RVOL_FLOOR: f64 = 1.5;
/// RVOL at or above this scores 5.0
pub const RVOL_CEILING: f64 = 5.0;

/// Early in the session the baseline never drops below this fraction of a full day
pub const MIN_DAY_PROGRESS: f64 = 0.05;

pub fn relative_volume(current_volume: u64, average_volume_by_time_of_day: u64) -> f64 {
    if average_volume_by_time_of_day == 0 {
        return 0.0;
    }
    current_volume as f64 / average_volume_by_time_of_day as f64
}

/// 0-5 strength of unusual share volume.
pub fn compute_rvol_strength(current_volume: u64, average_volume_by_time_of_day: u64) -> f64 {
    let rvol = relative_volume(current_volume, average_volume_by_time_of_day);

    if rvol < RVOL_FLOOR {
        0.0
    } else if rvol >= RVOL_CEILING {
        STRENGTH_CEILING
    } else {
        linear_strength(rvol, RVOL_FLOOR, RVOL_CEILING)
    }
}

/// Expected volume at `day_progress` (0-1) through the session.
///
/// Near the open a tiny baseline would turn a handful of trades into a huge
/// RVOL, so progress at or below 5% uses 5% of the full-day average.
pub fn average_volume_by_time_of_day(average_volume: u64, day_progress: f64) -> u64 {
    let progress = if day_progress.is_nan() || day_progress <= MIN_DAY_PROGRESS {
        MIN_DAY_PROGRESS
    } else {
        day_progress.min(1.0)
    };
    (average_volume as f64 * progress).round() as u64
}
