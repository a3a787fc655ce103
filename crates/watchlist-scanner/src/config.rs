use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    pub snapshot_path: PathBuf,       // watchlist.json
    pub scan_interval_seconds: u64,   // 60
    pub run_once: bool,               // false
    pub report_output_path: Option<PathBuf>,
}

impl ScannerConfig {
    /// Load `.env` (if present) and read the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults.
    pub fn from_vars<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            snapshot_path: get("WATCHLIST_SNAPSHOT_PATH")
                .unwrap_or_else(|| "watchlist.json".to_string())
                .into(),
            scan_interval_seconds: get("SCAN_INTERVAL")
                .unwrap_or_else(|| "60".to_string())
                .trim()
                .parse()
                .context("SCAN_INTERVAL must be a whole number of seconds")?,
            run_once: get("RUN_ONCE")
                .unwrap_or_else(|| "false".to_string())
                .trim()
                .to_ascii_lowercase()
                .parse()
                .context("RUN_ONCE must be true or false")?,
            report_output_path: get("REPORT_OUTPUT_PATH")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.scan_interval_seconds == 0 {
            bail!("SCAN_INTERVAL must be greater than zero");
        }
        if self.snapshot_path.as_os_str().is_empty() {
            bail!("WATCHLIST_SNAPSHOT_PATH must not be empty");
        }
        Ok(())
    }
}
