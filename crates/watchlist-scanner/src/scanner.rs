use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use signal_core::market_hours::{is_regular_session, market_date};
use signal_engine::display::{format_money, strength_label};
use signal_engine::{InsiderSentiment, SignalEngine, SymbolReport};
use std::path::Path;

use crate::source::SnapshotSource;

/// Engine report plus the insider context only the raw snapshot carries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannedInstrument {
    #[serde(flatten)]
    pub signals: SymbolReport,
    pub net_insider_value: Decimal,
    /// `None` when the snapshot listed no insider transactions
    pub insider_sentiment: Option<InsiderSentiment>,
}

/// Result of one polling tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanOutcome {
    pub generated_at: DateTime<Utc>,
    /// Whether the scan ran inside the regular session
    pub regular_session: bool,
    pub reports: Vec<ScannedInstrument>,
    /// Snapshots that failed validation
    pub rejected: Vec<String>,
}

pub struct WatchlistScanner<S> {
    source: S,
    engine: SignalEngine,
}

impl<S: SnapshotSource> WatchlistScanner<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            engine: SignalEngine::new(),
        }
    }

    /// Fetch, validate and score every instrument once.
    pub async fn scan(&self, now: DateTime<Utc>) -> Result<ScanOutcome> {
        let snapshots = self.source.fetch().await?;

        let mut instruments = Vec::with_capacity(snapshots.len());
        let mut sentiments = Vec::with_capacity(snapshots.len());
        let mut rejected = Vec::new();

        for snapshot in snapshots {
            let symbol = snapshot.symbol.clone();
            let sentiment = (!snapshot.insider_transactions.is_empty())
                .then(|| InsiderSentiment::from_transactions(&snapshot.insider_transactions));

            match snapshot.into_inputs(now) {
                Ok(inputs) => {
                    instruments.push((symbol, inputs));
                    sentiments.push(sentiment);
                }
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", symbol, e);
                    rejected.push(symbol);
                }
            }
        }

        // evaluate_batch preserves input order
        let reports = self
            .engine
            .evaluate_batch(&instruments, market_date(now))
            .into_iter()
            .zip(instruments.iter().zip(sentiments))
            .map(|(signals, ((_, inputs), insider_sentiment))| ScannedInstrument {
                signals,
                net_insider_value: inputs.net_insider_transaction_value,
                insider_sentiment,
            })
            .collect();

        Ok(ScanOutcome {
            generated_at: now,
            regular_session: is_regular_session(now),
            reports,
            rejected,
        })
    }
}

/// One-line digest of an instrument's signals.
pub fn summary_line(entry: &ScannedInstrument) -> String {
    let report = &entry.signals.report;
    let peak = report.peak_strength();
    let insider = match entry.insider_sentiment {
        Some(sentiment) => format!("{} net, {}", format_money(entry.net_insider_value), sentiment.to_label()),
        None => format!("{} net", format_money(entry.net_insider_value)),
    };

    format!(
        "{}: {} ({:.1}) | confidence {:+.2} | options {:.1} {} | insider {:.1} ({}) | rvol {:.1} | earnings {:.1} ({}) | gamma {}{}",
        entry.signals.symbol,
        strength_label(peak),
        peak,
        report.directional_confidence,
        report.options_signal_strength,
        report.options_display.classification.to_label(),
        report.insider_signal_strength,
        insider,
        report.rvol_signal_strength,
        report.earnings_signal_strength,
        report.earnings_status.to_label(),
        report.gamma_risk.to_label(),
        if report.unusual_options_volume { " | UNUSUAL FLOW" } else { "" },
    )
}

/// Log one line per instrument.
pub fn log_outcome(outcome: &ScanOutcome) {
    for entry in &outcome.reports {
        tracing::info!("{}", summary_line(entry));
        tracing::info!("  {}", entry.signals.report.options_summary);
    }
}

pub async fn write_outcome(path: &Path, outcome: &ScanOutcome) -> Result<()> {
    let body = serde_json::to_vec_pretty(outcome)?;
    tokio::fs::write(path, body)
        .await
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::WatchlistSnapshot;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use signal_core::{InsiderTransaction, QuoteSnapshot, TransactionKind};

    struct StaticSource(Vec<WatchlistSnapshot>);

    #[async_trait]
    impl SnapshotSource for StaticSource {
        async fn fetch(&self) -> Result<Vec<WatchlistSnapshot>> {
            Ok(self.0.clone())
        }
    }

    fn snapshot(symbol: &str, quote: QuoteSnapshot) -> WatchlistSnapshot {
        WatchlistSnapshot {
            symbol: symbol.to_string(),
            quote,
            option_chain: vec![],
            insider_transactions: vec![],
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 13, 16, 45, 0).unwrap()
    }

    #[tokio::test]
    async fn test_scan_scores_valid_and_skips_invalid() {
        let good = QuoteSnapshot {
            price: dec!(100),
            max_pain_price: Some(dec!(105)),
            call_volume: 600,
            put_volume: 400,
            current_volume: 3_000_000,
            average_volume_by_time_of_day: Some(1_000_000),
            ..Default::default()
        };
        let bad = QuoteSnapshot {
            price: dec!(50),
            call_volume: -10,
            ..Default::default()
        };

        let scanner = WatchlistScanner::new(StaticSource(vec![
            snapshot("GOOD", good),
            snapshot("BAD", bad),
            snapshot("EMPTY", QuoteSnapshot::default()),
        ]));

        let outcome = scanner.scan(now()).await.unwrap();
        assert!(outcome.regular_session);
        assert_eq!(outcome.rejected, vec!["BAD".to_string()]);
        assert_eq!(outcome.reports.len(), 2);

        let good = &outcome.reports[0];
        assert_eq!(good.signals.symbol, "GOOD");
        assert!((good.signals.report.directional_confidence - 0.14).abs() < 1e-9);
        assert_eq!(good.insider_sentiment, None);

        let empty = &outcome.reports[1];
        assert_eq!(empty.signals.report.options_summary, "Insufficient data.");
    }

    #[tokio::test]
    async fn test_scan_carries_insider_context() {
        let buy = InsiderTransaction {
            name: Some("CEO".to_string()),
            date: None,
            kind: TransactionKind::Buy,
            shares: dec!(20000),
            price: dec!(60),
        };
        let sell = InsiderTransaction {
            kind: TransactionKind::Sell,
            shares: dec!(1000),
            ..buy.clone()
        };

        let mut row = snapshot(
            "ACME",
            QuoteSnapshot {
                price: dec!(60),
                ..Default::default()
            },
        );
        row.insider_transactions = vec![buy.clone(), buy.clone(), buy, sell];

        let scanner = WatchlistScanner::new(StaticSource(vec![row]));
        let outcome = scanner.scan(now()).await.unwrap();
        let entry = &outcome.reports[0];

        // 3 x 1.2M bought, 60K sold
        assert_eq!(entry.net_insider_value, dec!(3540000));
        assert_eq!(entry.insider_sentiment, Some(InsiderSentiment::Bullish));

        let line = summary_line(entry);
        assert!(line.starts_with("ACME: "), "{line}");
        assert!(line.contains("$3.5M net, Bullish"), "{line}");
        assert!(line.contains("options 0.0 Normal"), "{line}");
        assert!(line.contains("earnings 0.0 (None)"), "{line}");
        assert!(line.contains("gamma Low"), "{line}");
    }

    #[tokio::test]
    async fn test_weekend_scan_is_outside_session() {
        let saturday = Utc.with_ymd_and_hms(2024, 3, 16, 15, 0, 0).unwrap();
        let scanner = WatchlistScanner::new(StaticSource(vec![]));
        let outcome = scanner.scan(saturday).await.unwrap();
        assert!(!outcome.regular_session);
        assert!(outcome.reports.is_empty());
    }

    #[tokio::test]
    async fn test_write_outcome() {
        let scanner = WatchlistScanner::new(StaticSource(vec![snapshot(
            "ACME",
            QuoteSnapshot {
                price: dec!(20),
                ..Default::default()
            },
        )]));
        let outcome = scanner.scan(now()).await.unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        write_outcome(&path, &outcome).await.unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["reports"][0]["symbol"], "ACME");
        assert!(written["reports"][0]["insider_sentiment"].is_null());
        assert_eq!(written["rejected"].as_array().unwrap().len(), 0);
    }
}
