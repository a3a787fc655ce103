//! Formatting helpers for the watchlist view.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

pub const POSITIVE_COLOR: &str = "#00cc88";
pub const NEGATIVE_COLOR: &str = "#ff6699";
pub const NEUTRAL_COLOR: &str = "#888888";

/// Color for a price change by sign
pub fn change_color(change: Decimal) -> &'static str {
    if change.is_zero() {
        NEUTRAL_COLOR
    } else if change.is_sign_negative() {
        NEGATIVE_COLOR
    } else {
        POSITIVE_COLOR
    }
}

/// Bucket a 0-5 strength score
pub fn strength_label(score: f64) -> &'static str {
    match score {
        s if s >= 4.5 => "Extreme",
        s if s >= 3.5 => "Strong",
        s if s >= 2.0 => "Moderate",
        s if s > 0.0 => "Weak",
        _ => "None",
    }
}

/// Compact dollar amount: $1.2B, $3.4M, $12.5K, $123.45
pub fn format_money(value: Decimal) -> String {
    let sign = if value.is_sign_negative() && !value.is_zero() { "-" } else { "" };
    let abs = value.abs().to_f64().unwrap_or(0.0);

    if abs >= 1e9 {
        format!("{}${:.1}B", sign, abs / 1e9)
    } else if abs >= 1e6 {
        format!("{}${:.1}M", sign, abs / 1e6)
    } else if abs >= 1e3 {
        format!("{}${:.1}K", sign, abs / 1e3)
    } else {
        format!("{}${:.2}", sign, abs)
    }
}
