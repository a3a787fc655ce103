//! Directional confidence from max-pain pull and call/put flow.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use signal_core::SignalInputs;

pub const MAGNET_WEIGHT: f64 = 0.4;
pub const FLOW_WEIGHT: f64 = 0.6;

/// Expirations this many days out (or fewer) are imminent
pub const IMMINENT_EXPIRATION_DAYS: i64 = 3;

/// Price within this fraction of max pain counts as pinned
pub const PIN_BAND: f64 = 0.015;

/// Display strength multiplier while pinned
pub const PIN_DAMPENING: f64 = 0.3;

/// Raw display strength above which an imminent expiry is a binary gamble
pub const CRITICAL_MASS_STRENGTH: f64 = 9.0;

const OPTIONS_STRENGTH_SCALE: f64 = 12.5;
const DISPLAY_STRENGTH_SCALE: f64 = 25.0;
const DISPLAY_STRENGTH_MAX: f64 = 10.0;

/// The two halves of the directional blend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalComponents {
    /// Fractional distance from price to max pain (positive = pulled up)
    pub magnet_pull: f64,
    /// (calls - puts) / total option volume
    pub flow_sentiment: f64,
    pub confidence: f64,
}

impl DirectionalComponents {
    /// Both components point the same way
    pub fn is_aligned(&self) -> bool {
        self.magnet_pull * self.flow_sentiment > 0.0
    }
}

/// Split directional confidence into its components.
///
/// Returns `None` when price, max pain or total option volume is zero, or
/// when the distance to max pain does not fit in a `Decimal`.
pub fn directional_components(
    price: Decimal,
    max_pain_price: Decimal,
    call_volume: u64,
    put_volume: u64,
    total_volume: u64,
) -> Option<DirectionalComponents> {
    if price.is_zero() || max_pain_price.is_zero() || total_volume == 0 {
        return None;
    }

    let magnet_pull = max_pain_price
        .checked_sub(price)?
        .checked_div(price)?
        .to_f64()?;
    let flow_sentiment = (call_volume as f64 - put_volume as f64) / total_volume as f64;

    Some(DirectionalComponents {
        magnet_pull,
        flow_sentiment,
        confidence: magnet_pull * MAGNET_WEIGHT + flow_sentiment * FLOW_WEIGHT,
    })
}

/// Blended bullish (+) / bearish (-) lean, 0 when data is missing.
pub fn compute_directional_confidence(
    price: Decimal,
    max_pain_price: Decimal,
    call_volume: u64,
    put_volume: u64,
    total_volume: u64,
) -> f64 {
    directional_components(price, max_pain_price, call_volume, put_volume, total_volume)
        .map_or(0.0, |c| c.confidence)
}

/// 0-5 strength of the options reading.
pub fn options_signal_strength(confidence: f64) -> f64 {
    (confidence.abs() * OPTIONS_STRENGTH_SCALE).min(signal_core::interpolate::STRENGTH_CEILING)
}

/// Undampened 0-10 display strength.
pub fn raw_display_strength(confidence: f64) -> f64 {
    (confidence.abs() * DISPLAY_STRENGTH_SCALE).min(DISPLAY_STRENGTH_MAX)
}

pub fn is_expiration_imminent(days_to_expiration: Option<i64>) -> bool {
    matches!(days_to_expiration, Some(days) if (0..=IMMINENT_EXPIRATION_DAYS).contains(&days))
}

/// Price is sitting on max pain into an imminent expiration.
pub fn is_pinned(price: Decimal, max_pain_price: Decimal, days_to_expiration: Option<i64>) -> bool {
    if !is_expiration_imminent(days_to_expiration) || price.is_zero() || max_pain_price.is_zero() {
        return false;
    }
    price
        .checked_sub(max_pain_price)
        .and_then(|gap| gap.abs().checked_div(price))
        .and_then(|distance| distance.to_f64())
        .is_some_and(|distance| distance < PIN_BAND)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionsClassification {
    Normal,
    /// Near-expiry pinning suppresses the signal
    Pinned,
    /// Extreme reading into expiry: binary outcome
    CriticalMass,
}

impl OptionsClassification {
    pub fn to_label(&self) -> &'static str {
        match self {
            OptionsClassification::Normal => "Normal",
            OptionsClassification::Pinned => "Pinned",
            OptionsClassification::CriticalMass => "Critical Mass / Binary Gamble",
        }
    }
}

/// Display-facing options strength after pinning adjustments
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionsDisplay {
    pub raw_strength: f64,
    pub strength: f64,
    pub dampened: bool,
    pub classification: OptionsClassification,
}

pub fn options_display(inputs: &SignalInputs, as_of: NaiveDate) -> OptionsDisplay {
    let confidence = compute_directional_confidence(
        inputs.price,
        inputs.max_pain_price,
        inputs.call_volume,
        inputs.put_volume,
        inputs.total_volume,
    );
    let days = inputs.days_to_expiration(as_of);
    let raw_strength = raw_display_strength(confidence);
    let dampened = is_pinned(inputs.price, inputs.max_pain_price, days);

    let strength = if dampened {
        raw_strength * PIN_DAMPENING
    } else {
        raw_strength
    };

    // Critical mass overrides pinning
    let classification = if raw_strength > CRITICAL_MASS_STRENGTH && is_expiration_imminent(days) {
        OptionsClassification::CriticalMass
    } else if dampened {
        OptionsClassification::Pinned
    } else {
        OptionsClassification::Normal
    };

    OptionsDisplay {
        raw_strength,
        strength,
        dampened,
        classification,
    }
}
