//! Insider transaction signal.
//!
//! Net buying is scored on a fixed dollar scale: executives spending their own
//! money is meaningful regardless of company size. Net selling is routine
//! (compensation, diversification), so its thresholds scale with market cap.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use signal_core::interpolate::{log_strength, STRENGTH_CEILING};
use signal_core::{InsiderTransaction, TransactionKind};

/// Net buying below this is noise
pub const BUY_FLOOR: f64 = 50_000.0;
/// Net buying at or above this scores 5.0
pub const BUY_CEILING: f64 = 10_000_000.0;

/// Sell ceiling as a fraction of market cap
pub const SELL_CAP_FRACTION: f64 = 0.0005;
pub const SELL_CEILING_MIN: f64 = 10_000_000.0;
pub const SELL_CEILING_MAX: f64 = 500_000_000.0;
/// Sell floor is the ceiling divided by this
pub const SELL_FLOOR_DIVISOR: f64 = 20.0;

/// Market cap assumed when none is known
pub const DEFAULT_MARKET_CAP: f64 = 100_000_000_000.0;

/// (floor, ceiling) for net selling at the given market cap.
pub fn sell_thresholds(market_cap: Decimal) -> (f64, f64) {
    let cap = market_cap
        .to_f64()
        .filter(|cap| *cap > 0.0)
        .unwrap_or(DEFAULT_MARKET_CAP);
    let ceiling = (cap * SELL_CAP_FRACTION).clamp(SELL_CEILING_MIN, SELL_CEILING_MAX);
    (ceiling / SELL_FLOOR_DIVISOR, ceiling)
}

/// 0-5 strength of net insider activity.
pub fn compute_insider_strength(net_value: Decimal, market_cap: Decimal) -> f64 {
    let Some(value) = net_value.to_f64() else {
        return 0.0;
    };

    if value > 0.0 {
        band_strength(value, BUY_FLOOR, BUY_CEILING)
    } else if value < 0.0 {
        let (floor, ceiling) = sell_thresholds(market_cap);
        band_strength(value.abs(), floor, ceiling)
    } else {
        0.0
    }
}

fn band_strength(amount: f64, floor: f64, ceiling: f64) -> f64 {
    if amount < floor {
        0.0
    } else if amount >= ceiling {
        STRENGTH_CEILING
    } else {
        log_strength(amount, floor, ceiling)
    }
}

/// Buy value minus sell value across the transactions, saturating at the
/// `Decimal` range.
pub fn net_insider_value(transactions: &[InsiderTransaction]) -> Decimal {
    transactions
        .iter()
        .fold(Decimal::ZERO, |net, tx| match tx.kind {
            TransactionKind::Buy => net.saturating_add(tx.value()),
            TransactionKind::Sell => net.saturating_sub(tx.value()),
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsiderSentiment {
    Bullish,
    Bearish,
    Neutral,
}

impl InsiderSentiment {
    /// Lopsided transaction counts: one side must outnumber the other two to one.
    pub fn from_transactions(transactions: &[InsiderTransaction]) -> Self {
        let buys = transactions
            .iter()
            .filter(|tx| tx.kind == TransactionKind::Buy)
            .count();
        let sells = transactions.len() - buys;

        if buys > sells * 2 {
            InsiderSentiment::Bullish
        } else if sells > buys * 2 {
            InsiderSentiment::Bearish
        } else {
            InsiderSentiment::Neutral
        }
    }

    pub fn to_label(&self) -> &'static str {
        match self {
            InsiderSentiment::Bullish => "Bullish",
            InsiderSentiment::Bearish => "Bearish",
            InsiderSentiment::Neutral => "Neutral",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    fn tx(kind: TransactionKind, shares: Decimal, price: Decimal) -> InsiderTransaction {
        InsiderTransaction {
            name: None,
            date: None,
            kind,
            shares,
            price,
        }
    }

    #[test]
    fn test_buy_just_below_floor() {
        for cap in [dec!(0), dec!(1000000000), dec!(3000000000000)] {
            assert_eq!(compute_insider_strength(dec!(49999), cap), 0.0);
        }
    }

    #[test]
    fn test_buy_floor_and_ceiling() {
        assert_relative_eq!(compute_insider_strength(dec!(50000), dec!(0)), 1.0, epsilon = 1e-12);
        for cap in [dec!(0), dec!(1000000000), dec!(3000000000000)] {
            assert_eq!(compute_insider_strength(dec!(10000000), cap), 5.0);
        }
        assert_eq!(compute_insider_strength(dec!(250000000), dec!(0)), 5.0);
    }

    #[test]
    fn test_buy_log_interpolation() {
        let expected = 1.0
            + (1_000_000f64.log10() - 50_000f64.log10())
                / (10_000_000f64.log10() - 50_000f64.log10())
                * 4.0;
        assert_relative_eq!(
            compute_insider_strength(dec!(1000000), dec!(0)),
            expected,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_zero_is_neutral() {
        assert_eq!(compute_insider_strength(Decimal::ZERO, dec!(5000000000)), 0.0);
    }

    #[test]
    fn test_sell_thresholds_scale_with_cap() {
        let (floor, ceiling) = sell_thresholds(dec!(100000000000));
        assert_relative_eq!(ceiling, 50_000_000.0, epsilon = 1e-6);
        assert_relative_eq!(floor, 2_500_000.0, epsilon = 1e-6);

        // Small cap clamps up to the minimum ceiling
        let (_, ceiling) = sell_thresholds(dec!(1000000000));
        assert_relative_eq!(ceiling, SELL_CEILING_MIN);

        // Mega cap clamps down to the maximum ceiling
        let (floor, ceiling) = sell_thresholds(dec!(3000000000000));
        assert_relative_eq!(ceiling, SELL_CEILING_MAX);
        assert_relative_eq!(floor, 25_000_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_missing_cap_defaults_to_hundred_billion() {
        assert_eq!(sell_thresholds(Decimal::ZERO), sell_thresholds(dec!(100000000000)));
        assert_eq!(
            compute_insider_strength(dec!(-5000000), Decimal::ZERO),
            compute_insider_strength(dec!(-5000000), dec!(100000000000))
        );
    }

    #[test]
    fn test_sell_interpolates_between_thresholds() {
        let strength = compute_insider_strength(dec!(-5000000), dec!(100000000000));
        assert!(strength > 1.0 && strength < 5.0, "strength {strength}");

        let expected = 1.0
            + (5_000_000f64.log10() - 2_500_000f64.log10())
                / (50_000_000f64.log10() - 2_500_000f64.log10())
                * 4.0;
        assert_relative_eq!(strength, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_sell_below_floor_and_above_ceiling() {
        assert_eq!(compute_insider_strength(dec!(-2000000), dec!(100000000000)), 0.0);
        assert_eq!(compute_insider_strength(dec!(-60000000), dec!(100000000000)), 5.0);
    }

    #[test]
    fn test_same_dollar_sale_weighs_less_at_larger_cap() {
        let small = compute_insider_strength(dec!(-5000000), dec!(20000000000));
        let large = compute_insider_strength(dec!(-5000000), dec!(100000000000));
        assert!(small > large);
    }

    #[test]
    fn test_net_insider_value() {
        let transactions = vec![
            tx(TransactionKind::Buy, dec!(10000), dec!(50)),
            tx(TransactionKind::Sell, dec!(2000), dec!(55)),
            tx(TransactionKind::Buy, dec!(1000), dec!(48.5)),
        ];
        assert_eq!(net_insider_value(&transactions), dec!(438500));
        assert_eq!(net_insider_value(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_net_insider_value_saturates() {
        let whale = tx(TransactionKind::Buy, Decimal::MAX, dec!(2));
        assert_eq!(whale.value(), Decimal::MAX);
        assert_eq!(net_insider_value(&[whale.clone(), whale]), Decimal::MAX);
        assert_eq!(compute_insider_strength(Decimal::MAX, Decimal::ZERO), 5.0);
    }

    #[test]
    fn test_sentiment() {
        let buy = tx(TransactionKind::Buy, dec!(1), dec!(1));
        let sell = tx(TransactionKind::Sell, dec!(1), dec!(1));

        assert_eq!(
            InsiderSentiment::from_transactions(&[buy.clone(), buy.clone(), buy.clone(), sell.clone()]),
            InsiderSentiment::Bullish
        );
        assert_eq!(
            InsiderSentiment::from_transactions(&[sell.clone(), sell.clone(), sell.clone()]),
            InsiderSentiment::Bearish
        );
        assert_eq!(
            InsiderSentiment::from_transactions(&[buy, sell]),
            InsiderSentiment::Neutral
        );
        assert_eq!(InsiderSentiment::from_transactions(&[]), InsiderSentiment::Neutral);
    }
}
