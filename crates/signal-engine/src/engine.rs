//! One-shot evaluation of every signal for an instrument.

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use signal_core::{EarningsStatus, SignalInputs};
use tracing::debug;

use crate::directional::{
    directional_components, options_display, options_signal_strength, OptionsDisplay,
};
use crate::display::change_color;
use crate::earnings::compute_earnings_strength;
use crate::flags::{is_unusual_options_volume, GammaRisk};
use crate::insider::compute_insider_strength;
use crate::narrative::{build_options_summary, narrative_case, NarrativeCase};
use crate::rvol::{compute_rvol_strength, relative_volume};

/// Every derived output for one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalReport {
    pub directional_confidence: f64,
    pub magnet_pull: Option<f64>,
    pub flow_sentiment: Option<f64>,
    pub options_signal_strength: f64,
    pub options_display: OptionsDisplay,
    pub insider_signal_strength: f64,
    pub relative_volume: f64,
    pub rvol_signal_strength: f64,
    pub earnings_status: EarningsStatus,
    pub earnings_signal_strength: f64,
    pub unusual_options_volume: bool,
    pub gamma_risk: GammaRisk,
    pub days_to_expiration: Option<i64>,
    pub narrative_case: Option<NarrativeCase>,
    pub options_summary: String,
    pub change_color: String,
}

impl SignalReport {
    /// Strongest of the four 0-5 scores
    pub fn peak_strength(&self) -> f64 {
        [
            self.options_signal_strength,
            self.insider_signal_strength,
            self.rvol_signal_strength,
            self.earnings_signal_strength,
        ]
        .into_iter()
        .fold(0.0, f64::max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolReport {
    pub symbol: String,
    #[serde(flatten)]
    pub report: SignalReport,
}

/// Stateless evaluator; safe to share across threads
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalEngine;

impl SignalEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(&self, inputs: &SignalInputs, as_of: NaiveDate) -> SignalReport {
        let components = directional_components(
            inputs.price,
            inputs.max_pain_price,
            inputs.call_volume,
            inputs.put_volume,
            inputs.total_volume,
        );
        let directional_confidence = components.map_or(0.0, |c| c.confidence);

        let report = SignalReport {
            directional_confidence,
            magnet_pull: components.map(|c| c.magnet_pull),
            flow_sentiment: components.map(|c| c.flow_sentiment),
            options_signal_strength: options_signal_strength(directional_confidence),
            options_display: options_display(inputs, as_of),
            insider_signal_strength: compute_insider_strength(
                inputs.net_insider_transaction_value,
                inputs.market_cap,
            ),
            relative_volume: relative_volume(inputs.current_volume, inputs.average_volume_by_time_of_day),
            rvol_signal_strength: compute_rvol_strength(
                inputs.current_volume,
                inputs.average_volume_by_time_of_day,
            ),
            earnings_status: inputs.earnings_status,
            earnings_signal_strength: compute_earnings_strength(
                inputs.earnings_status,
                inputs.earnings_surprise_percent,
            ),
            unusual_options_volume: is_unusual_options_volume(
                inputs.call_volume,
                inputs.put_volume,
                inputs.total_volume,
            ),
            gamma_risk: GammaRisk::classify(inputs.open_interest, inputs.average_volume),
            days_to_expiration: inputs.days_to_expiration(as_of),
            narrative_case: narrative_case(inputs, as_of),
            options_summary: build_options_summary(inputs, as_of),
            change_color: change_color(inputs.change).to_string(),
        };

        debug!(
            confidence = report.directional_confidence,
            options = report.options_signal_strength,
            insider = report.insider_signal_strength,
            rvol = report.rvol_signal_strength,
            earnings = report.earnings_signal_strength,
            "Evaluated signals"
        );

        report
    }

    /// Evaluate many instruments in parallel. Output order matches input order.
    pub fn evaluate_batch(&self, instruments: &[(String, SignalInputs)], as_of: NaiveDate) -> Vec<SymbolReport> {
        instruments
            .par_iter()
            .map(|(symbol, inputs)| SymbolReport {
                symbol: symbol.clone(),
                report: self.evaluate(inputs, as_of),
            })
            .collect()
    }
}
