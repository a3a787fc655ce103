use serde::{Deserialize, Serialize};

/// Option volume must exceed this before the call/put skew matters
pub const UNUSUAL_OPTION_VOLUME: u64 = 1000;
pub const SKEW_HIGH_RATIO: f64 = 2.0;
pub const SKEW_LOW_RATIO: f64 = 0.5;

/// Heavy option volume that leans hard to one side.
pub fn is_unusual_options_volume(call_volume: u64, put_volume: u64, total_volume: u64) -> bool {
    if total_volume <= UNUSUAL_OPTION_VOLUME {
        return false;
    }
    match call_put_ratio(call_volume, put_volume) {
        Some(ratio) => ratio > SKEW_HIGH_RATIO || ratio < SKEW_LOW_RATIO,
        // Calls with no puts at all
        None => call_volume > 0,
    }
}

/// Calls per put, `None` when there is no put volume.
pub fn call_put_ratio(call_volume: u64, put_volume: u64) -> Option<f64> {
    if put_volume == 0 {
        return None;
    }
    Some(call_volume as f64 / put_volume as f64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GammaRisk {
    Low,
    Moderate,
    High,
}

impl GammaRisk {
    /// Open interest relative to average daily share volume.
    pub fn classify(open_interest: u64, average_volume: u64) -> Self {
        if average_volume == 0 {
            return GammaRisk::Low;
        }
        if open_interest > average_volume.saturating_mul(2) {
            GammaRisk::High
        } else if open_interest > average_volume {
            GammaRisk::Moderate
        } else {
            GammaRisk::Low
        }
    }

    pub fn to_label(&self) -> &'static str {
        match self {
            GammaRisk::Low => "Low",
            GammaRisk::Moderate => "Moderate",
            GammaRisk::High => "High",
        }
    }
}
