//! Plain-language explanation of the options reading.

use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use signal_core::SignalInputs;

use crate::directional::{
    directional_components, is_expiration_imminent, raw_display_strength, DirectionalComponents,
    CRITICAL_MASS_STRENGTH,
};

pub const INSUFFICIENT_DATA: &str = "Insufficient data.";

/// Projected move per unit of directional confidence
pub const PROJECTION_SCALE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NarrativeCase {
    /// Extreme reading into an imminent expiration
    CriticalMass,
    /// Imminent expiration, magnet and flow agree
    ExpiryMagnet,
    /// Imminent expiration, magnet and flow disagree (or one is flat)
    ExpiryConflict,
    AlignedBullish,
    AlignedBearish,
    Mixed,
}

pub fn classify_narrative(components: &DirectionalComponents, days_to_expiration: Option<i64>) -> NarrativeCase {
    if is_expiration_imminent(days_to_expiration) {
        if raw_display_strength(components.confidence) > CRITICAL_MASS_STRENGTH {
            NarrativeCase::CriticalMass
        } else if components.is_aligned() {
            NarrativeCase::ExpiryMagnet
        } else {
            NarrativeCase::ExpiryConflict
        }
    } else if components.is_aligned() {
        if components.flow_sentiment > 0.0 {
            NarrativeCase::AlignedBullish
        } else {
            NarrativeCase::AlignedBearish
        }
    } else {
        NarrativeCase::Mixed
    }
}

/// Which narrative applies, `None` when the inputs are insufficient.
pub fn narrative_case(inputs: &SignalInputs, as_of: NaiveDate) -> Option<NarrativeCase> {
    components_for(inputs).map(|c| classify_narrative(&c, inputs.days_to_expiration(as_of)))
}

/// Price implied by the directional lean.
///
/// Into an imminent expiration the projection cannot pass max pain in the
/// direction of the pull.
pub fn projected_price(price: Decimal, max_pain_price: Decimal, confidence: f64, imminent: bool) -> Decimal {
    let factor = Decimal::from_f64(1.0 + confidence * PROJECTION_SCALE).unwrap_or(Decimal::ONE);
    let mut target = price.checked_mul(factor).unwrap_or(price);

    if imminent {
        if max_pain_price > price {
            target = target.min(max_pain_price);
        } else if max_pain_price < price {
            target = target.max(max_pain_price);
        }
    }

    target.round_dp(2)
}

pub fn build_options_summary(inputs: &SignalInputs, as_of: NaiveDate) -> String {
    let Some(components) = components_for(inputs) else {
        return INSUFFICIENT_DATA.to_string();
    };

    let days = inputs.days_to_expiration(as_of);
    let case = classify_narrative(&components, days);
    let max_pain = inputs.max_pain_price;
    let projected = projected_price(
        inputs.price,
        max_pain,
        components.confidence,
        is_expiration_imminent(days),
    );
    let when = days.map(expiry_phrase).unwrap_or_default();
    let distance = components.magnet_pull.abs() * 100.0;

    match case {
        NarrativeCase::CriticalMass => format!(
            "CRITICAL MASS: options expire {} with an extreme {} reading (strength {:.1}/10). \
             Max Pain at ${:.2}. Binary gamble: the pin may not hold.",
            when,
            lean(components.confidence),
            raw_display_strength(components.confidence),
            max_pain,
        ),
        NarrativeCase::ExpiryMagnet => format!(
            "MAGNET: options expire {} with Max Pain at ${:.2}, {:.1}% {} price. \
             Flow and magnet are aligned {}, but hedging into expiration tends to pin price; \
             projected price capped near ${:.2}.",
            when,
            max_pain,
            distance,
            side(components.magnet_pull),
            lean(components.confidence),
            projected,
        ),
        NarrativeCase::ExpiryConflict => format!(
            "Options expire {}: flow leans {} ({:.0}% calls) while Max Pain at ${:.2} {}. \
             Expect chop around the pin; projected ${:.2}.",
            when,
            lean(components.flow_sentiment),
            call_share(inputs),
            max_pain,
            pull_phrase(components.magnet_pull),
            projected,
        ),
        NarrativeCase::AlignedBullish => format!(
            "Max Pain at ${:.2} sits {:.1}% above price and call flow leads ({:.0}% calls). \
             Magnet and flow are aligned bullish; projected ${:.2}.",
            max_pain,
            distance,
            call_share(inputs),
            projected,
        ),
        NarrativeCase::AlignedBearish => format!(
            "Max Pain at ${:.2} sits {:.1}% below price and put flow leads ({:.0}% puts). \
             Magnet and flow are aligned bearish; projected ${:.2}.",
            max_pain,
            distance,
            100.0 - call_share(inputs),
            projected,
        ),
        NarrativeCase::Mixed => format!(
            "Max Pain at ${:.2} {} while flow leans {} ({:.0}% calls). \
             Signals are mixed; net lean {} ({:+.2}).",
            max_pain,
            pull_phrase(components.magnet_pull),
            lean(components.flow_sentiment),
            call_share(inputs),
            lean(components.confidence),
            components.confidence,
        ),
    }
}

fn components_for(inputs: &SignalInputs) -> Option<DirectionalComponents> {
    directional_components(
        inputs.price,
        inputs.max_pain_price,
        inputs.call_volume,
        inputs.put_volume,
        inputs.total_volume,
    )
}

fn expiry_phrase(days: i64) -> String {
    match days {
        0 => "today".to_string(),
        1 => "in 1 day".to_string(),
        n => format!("in {} days", n),
    }
}

fn lean(value: f64) -> &'static str {
    if value > 0.0 {
        "bullish"
    } else if value < 0.0 {
        "bearish"
    } else {
        "neutral"
    }
}

fn side(magnet_pull: f64) -> &'static str {
    if magnet_pull >= 0.0 {
        "above"
    } else {
        "below"
    }
}

fn pull_phrase(magnet_pull: f64) -> &'static str {
    if magnet_pull > 0.0 {
        "pulls higher"
    } else if magnet_pull < 0.0 {
        "pulls lower"
    } else {
        "sits at the current price"
    }
}

fn call_share(inputs: &SignalInputs) -> f64 {
    if inputs.total_volume == 0 {
        return 0.0;
    }
    inputs.call_volume as f64 / inputs.total_volume as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 13).unwrap()
    }

    fn inputs(price: Decimal, max_pain: Decimal, calls: u64, puts: u64, expiry_in: Option<i64>) -> SignalInputs {
        SignalInputs {
            price,
            max_pain_price: max_pain,
            call_volume: calls,
            put_volume: puts,
            total_volume: calls + puts,
            options_impact_date: expiry_in.map(|d| today() + chrono::Duration::days(d)),
            ..Default::default()
        }
    }

    #[test]
    fn test_insufficient_data() {
        let summary = build_options_summary(&inputs(dec!(100), dec!(0), 600, 400, None), today());
        assert_eq!(summary, INSUFFICIENT_DATA);
        assert_eq!(narrative_case(&SignalInputs::default(), today()), None);
    }

    #[test]
    fn test_aligned_bullish_far_from_expiry() {
        let i = inputs(dec!(100), dec!(105), 600, 400, Some(20));
        assert_eq!(narrative_case(&i, today()), Some(NarrativeCase::AlignedBullish));

        let summary = build_options_summary(&i, today());
        assert!(summary.contains("Max Pain"), "{summary}");
        assert!(summary.contains("$105.00"), "{summary}");
        assert!(summary.contains("aligned"), "{summary}");
        assert!(!summary.contains("MAGNET"), "{summary}");
    }

    #[test]
    fn test_aligned_bearish() {
        let i = inputs(dec!(100), dec!(95), 300, 700, None);
        assert_eq!(narrative_case(&i, today()), Some(NarrativeCase::AlignedBearish));
        let summary = build_options_summary(&i, today());
        assert!(summary.contains("aligned bearish"), "{summary}");
        assert!(summary.contains("$95.00"), "{summary}");
    }

    #[test]
    fn test_expiry_magnet_caps_projection() {
        let i = inputs(dec!(100), dec!(102), 700, 300, Some(2));
        assert_eq!(narrative_case(&i, today()), Some(NarrativeCase::ExpiryMagnet));

        let summary = build_options_summary(&i, today());
        assert!(summary.contains("MAGNET"), "{summary}");
        assert!(summary.contains("pin"), "{summary}");
        assert!(summary.contains("$102.00"), "{summary}");
        // Uncapped projection would be 100 * (1 + 0.248 * 0.1) = 102.48
        assert!(summary.contains("capped near $102.00"), "{summary}");
    }

    #[test]
    fn test_expiry_conflict() {
        let i = inputs(dec!(100), dec!(97), 700, 300, Some(1));
        assert_eq!(narrative_case(&i, today()), Some(NarrativeCase::ExpiryConflict));
        let summary = build_options_summary(&i, today());
        assert!(summary.contains("in 1 day"), "{summary}");
        assert!(summary.contains("pulls lower"), "{summary}");
    }

    #[test]
    fn test_critical_mass() {
        let i = inputs(dec!(100), dec!(104), 10_000, 0, Some(0));
        assert_eq!(narrative_case(&i, today()), Some(NarrativeCase::CriticalMass));
        let summary = build_options_summary(&i, today());
        assert!(summary.starts_with("CRITICAL MASS"), "{summary}");
        assert!(summary.contains("today"), "{summary}");
    }

    #[test]
    fn test_mixed() {
        let i = inputs(dec!(100), dec!(110), 200, 800, Some(30));
        assert_eq!(narrative_case(&i, today()), Some(NarrativeCase::Mixed));
        let summary = build_options_summary(&i, today());
        assert!(summary.contains("mixed"), "{summary}");
        assert!(summary.contains("$110.00"), "{summary}");
    }

    #[test]
    fn test_flat_magnet_is_not_aligned() {
        let i = inputs(dec!(100), dec!(100), 800, 200, None);
        assert_eq!(narrative_case(&i, today()), Some(NarrativeCase::Mixed));
    }

    #[test]
    fn test_expired_date_is_not_imminent() {
        let i = inputs(dec!(100), dec!(102), 800, 200, Some(-2));
        assert_eq!(narrative_case(&i, today()), Some(NarrativeCase::AlignedBullish));
    }

    #[test]
    fn test_projected_price() {
        assert_eq!(projected_price(dec!(100), dec!(105), 0.14, false), dec!(101.40));
        assert_eq!(projected_price(dec!(100), dec!(101), 0.14, true), dec!(101.00));
        assert_eq!(projected_price(dec!(100), dec!(99), -0.3, true), dec!(99.00));
        assert_eq!(projected_price(dec!(100), dec!(99), -0.05, true), dec!(99.50));
    }

    #[test]
    fn test_summary_is_deterministic() {
        let i = inputs(dec!(42.17), dec!(45), 1234, 987, Some(2));
        assert_eq!(build_options_summary(&i, today()), build_options_summary(&i, today()));
    }
}
