use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::SignalError;

/// Latest earnings report state for an instrument
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EarningsStatus {
    #[serde(alias = "beat", alias = "BEAT")]
    Beat,
    #[serde(alias = "miss", alias = "MISS")]
    Miss,
    /// Report scheduled, surprise unknown
    #[serde(alias = "upcoming", alias = "UPCOMING")]
    Upcoming,
    #[default]
    #[serde(alias = "none", alias = "NONE")]
    None,
}

impl EarningsStatus {
    pub fn to_label(&self) -> &'static str {
        match self {
            EarningsStatus::Beat => "Beat",
            EarningsStatus::Miss => "Miss",
            EarningsStatus::Upcoming => "Upcoming",
            EarningsStatus::None => "None",
        }
    }
}

impl FromStr for EarningsStatus {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beat" => Ok(EarningsStatus::Beat),
            "miss" => Ok(EarningsStatus::Miss),
            "upcoming" => Ok(EarningsStatus::Upcoming),
            "none" | "" => Ok(EarningsStatus::None),
            other => Err(SignalError::InvalidData(format!(
                "unknown earnings status '{}'",
                other
            ))),
        }
    }
}

/// Direction of an insider transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    #[serde(alias = "buy", alias = "BUY", alias = "Purchase")]
    Buy,
    #[serde(alias = "sell", alias = "SELL", alias = "Sale")]
    Sell,
}

/// A single reported insider trade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsiderTransaction {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub kind: TransactionKind,
    pub shares: Decimal,
    pub price: Decimal,
}

impl InsiderTransaction {
    /// Dollar value of the trade (always non-negative, saturating)
    pub fn value(&self) -> Decimal {
        self.shares.saturating_mul(self.price).abs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    #[serde(alias = "call", alias = "CALL")]
    Call,
    #[serde(alias = "put", alias = "PUT")]
    Put,
}

/// One option contract row from a chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    pub strike: Decimal,
    pub option_type: OptionType,
    #[serde(default)]
    pub open_interest: u64,
    #[serde(default)]
    pub volume: u64,
    #[serde(default)]
    pub expiration: Option<NaiveDate>,
}

/// Validated, immutable inputs for one evaluation of one instrument.
///
/// Volumes are unsigned so negative counts cannot be represented; the
/// remaining contract checks live in [`SignalInputs::validate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalInputs {
    pub price: Decimal,
    /// Zero when unknown
    pub max_pain_price: Decimal,
    pub call_volume: u64,
    pub put_volume: u64,
    pub total_volume: u64,
    /// Underlying shares traded so far today
    pub current_volume: u64,
    /// Expected shares traded by this time of day
    pub average_volume_by_time_of_day: u64,
    pub open_interest: u64,
    pub average_volume: u64,
    pub options_impact_date: Option<NaiveDate>,
    pub earnings_status: EarningsStatus,
    /// Signed surprise as a fraction (0.05 = 5% beat)
    pub earnings_surprise_percent: f64,
    /// Net dollars of insider buys minus sells
    pub net_insider_transaction_value: Decimal,
    /// Zero when unknown
    pub market_cap: Decimal,
    pub change: Decimal,
}

impl SignalInputs {
    /// Reject inputs that violate the engine's contract.
    pub fn validate(&self) -> Result<(), SignalError> {
        non_negative_price("price", self.price)?;
        non_negative_price("max_pain_price", self.max_pain_price)?;
        non_negative_price("market_cap", self.market_cap)?;

        if !self.earnings_surprise_percent.is_finite() {
            return Err(SignalError::InvalidData(
                "earnings_surprise_percent must be finite".to_string(),
            ));
        }

        let directional = self.call_volume.checked_add(self.put_volume);
        if directional.map_or(true, |sum| sum > self.total_volume) {
            return Err(SignalError::InconsistentVolume {
                call: self.call_volume,
                put: self.put_volume,
                total: self.total_volume,
            });
        }

        Ok(())
    }

    /// Whole days from `as_of` until the options impact date.
    ///
    /// Negative when the date is in the past, `None` when unknown.
    pub fn days_to_expiration(&self, as_of: NaiveDate) -> Option<i64> {
        self.options_impact_date
            .map(|date| (date - as_of).num_days())
    }
}

fn non_negative_price(field: &'static str, value: Decimal) -> Result<(), SignalError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(SignalError::InvalidPrice {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

fn non_negative_volume(field: &'static str, value: i64) -> Result<u64, SignalError> {
    u64::try_from(value).map_err(|_| SignalError::NegativeVolume { field, value })
}

/// Raw quote record as delivered by upstream finance APIs.
///
/// Volumes arrive signed and several fields may be missing; convert with
/// `SignalInputs::try_from` to validate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteSnapshot {
    pub price: Decimal,
    pub max_pain_price: Option<Decimal>,
    pub call_volume: i64,
    pub put_volume: i64,
    /// Defaults to call + put volume
    pub total_volume: Option<i64>,
    pub current_volume: i64,
    /// Defaults to the full-day average volume
    pub average_volume_by_time_of_day: Option<i64>,
    pub open_interest: i64,
    pub average_volume: i64,
    pub options_impact_date: Option<NaiveDate>,
    pub earnings_status: EarningsStatus,
    pub earnings_surprise_percent: Option<f64>,
    pub net_insider_transaction_value: Option<Decimal>,
    pub market_cap: Option<Decimal>,
    pub change: Decimal,
}

impl TryFrom<QuoteSnapshot> for SignalInputs {
    type Error = SignalError;

    fn try_from(raw: QuoteSnapshot) -> Result<Self, Self::Error> {
        let call_volume = non_negative_volume("call_volume", raw.call_volume)?;
        let put_volume = non_negative_volume("put_volume", raw.put_volume)?;
        let total_volume = match raw.total_volume {
            Some(total) => non_negative_volume("total_volume", total)?,
            None => call_volume.saturating_add(put_volume),
        };
        let average_volume = non_negative_volume("average_volume", raw.average_volume)?;
        let average_volume_by_time_of_day = match raw.average_volume_by_time_of_day {
            Some(baseline) => non_negative_volume("average_volume_by_time_of_day", baseline)?,
            None => average_volume,
        };

        let inputs = SignalInputs {
            price: raw.price,
            max_pain_price: raw.max_pain_price.unwrap_or_default(),
            call_volume,
            put_volume,
            total_volume,
            current_volume: non_negative_volume("current_volume", raw.current_volume)?,
            average_volume_by_time_of_day,
            open_interest: non_negative_volume("open_interest", raw.open_interest)?,
            average_volume,
            options_impact_date: raw.options_impact_date,
            earnings_status: raw.earnings_status,
            earnings_surprise_percent: raw.earnings_surprise_percent.unwrap_or(0.0),
            net_insider_transaction_value: raw.net_insider_transaction_value.unwrap_or_default(),
            market_cap: raw.market_cap.unwrap_or_default(),
            change: raw.change,
        };

        inputs.validate()?;
        Ok(inputs)
    }
}
