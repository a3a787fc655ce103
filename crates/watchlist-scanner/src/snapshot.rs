use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use signal_core::market_hours::{day_progress, market_date};
use signal_core::{InsiderTransaction, OptionContract, QuoteSnapshot, SignalError, SignalInputs};
use signal_engine::{average_volume_by_time_of_day, net_insider_value, ChainSummary};

/// One watchlist row as supplied by the upstream fetcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistSnapshot {
    pub symbol: String,
    #[serde(default)]
    pub quote: QuoteSnapshot,
    #[serde(default)]
    pub option_chain: Vec<OptionContract>,
    #[serde(default)]
    pub insider_transactions: Vec<InsiderTransaction>,
}

impl WatchlistSnapshot {
    /// Fill quote fields derivable from the chain, insider trades and the
    /// session clock, then validate.
    ///
    /// Values already present on the quote always win.
    pub fn into_inputs(self, now: DateTime<Utc>) -> Result<SignalInputs, SignalError> {
        let mut quote = self.quote;

        let chain = ChainSummary::from_contracts(&self.option_chain);
        if !chain.is_empty() {
            if quote.max_pain_price.is_none() {
                quote.max_pain_price = chain.max_pain();
            }
            if quote.call_volume == 0 && quote.put_volume == 0 && quote.total_volume.is_none() {
                quote.call_volume = to_signed(chain.call_volume);
                quote.put_volume = to_signed(chain.put_volume);
                quote.total_volume = Some(to_signed(chain.total_volume()));
            }
            if quote.open_interest == 0 {
                quote.open_interest = to_signed(chain.total_open_interest());
            }
            if quote.options_impact_date.is_none() {
                quote.options_impact_date = chain.nearest_expiration(market_date(now));
            }
        }

        if quote.net_insider_transaction_value.is_none() && !self.insider_transactions.is_empty() {
            quote.net_insider_transaction_value = Some(net_insider_value(&self.insider_transactions));
        }

        if quote.average_volume_by_time_of_day.is_none() && quote.average_volume > 0 {
            let baseline = average_volume_by_time_of_day(quote.average_volume as u64, day_progress(now));
            quote.average_volume_by_time_of_day = Some(to_signed(baseline));
        }

        SignalInputs::try_from(quote)
    }
}

fn to_signed(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
