//! Option chain aggregation into per-strike open interest.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use signal_core::{OptionContract, OptionType};
use std::collections::{BTreeMap, BTreeSet};

use crate::max_pain::{compute_max_pain, StrikeInterest};

/// Totals for one instrument's option chain
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChainSummary {
    /// Sorted by strike so max pain is reproducible
    pub strikes: BTreeMap<Decimal, StrikeInterest>,
    pub call_volume: u64,
    pub put_volume: u64,
    pub call_open_interest: u64,
    pub put_open_interest: u64,
    pub expirations: BTreeSet<NaiveDate>,
}

impl ChainSummary {
    pub fn from_contracts(contracts: &[OptionContract]) -> Self {
        let mut summary = ChainSummary::default();

        for contract in contracts {
            let entry = summary.strikes.entry(contract.strike).or_default();
            match contract.option_type {
                OptionType::Call => {
                    entry.call_open_interest = entry.call_open_interest.saturating_add(contract.open_interest);
                    summary.call_open_interest = summary.call_open_interest.saturating_add(contract.open_interest);
                    summary.call_volume = summary.call_volume.saturating_add(contract.volume);
                }
                OptionType::Put => {
                    entry.put_open_interest = entry.put_open_interest.saturating_add(contract.open_interest);
                    summary.put_open_interest = summary.put_open_interest.saturating_add(contract.open_interest);
                    summary.put_volume = summary.put_volume.saturating_add(contract.volume);
                }
            }
            if let Some(expiration) = contract.expiration {
                summary.expirations.insert(expiration);
            }
        }

        summary
    }

    pub fn is_empty(&self) -> bool {
        self.strikes.is_empty()
    }

    pub fn max_pain(&self) -> Option<Decimal> {
        compute_max_pain(&self.strikes)
    }

    pub fn total_volume(&self) -> u64 {
        self.call_volume.saturating_add(self.put_volume)
    }

    pub fn total_open_interest(&self) -> u64 {
        self.call_open_interest.saturating_add(self.put_open_interest)
    }

    /// First expiration on or after `as_of`
    pub fn nearest_expiration(&self, as_of: NaiveDate) -> Option<NaiveDate> {
        self.expirations.range(as_of..).next().copied()
    }
}
