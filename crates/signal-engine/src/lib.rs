//! Signal Engine
//!
//! Scores options positioning, insider activity, relative volume and earnings
//! for a watchlist instrument. Every calculator is a pure function of a
//! [`signal_core::SignalInputs`] snapshot and an explicit evaluation date.

pub mod chain;
pub mod directional;
pub mod display;
pub mod earnings;
pub mod engine;
pub mod flags;
pub mod insider;
pub mod max_pain;
pub mod narrative;
pub mod rvol;

pub use chain::ChainSummary;
pub use directional::{
    compute_directional_confidence, directional_components, options_display, options_signal_strength,
    DirectionalComponents, OptionsClassification, OptionsDisplay,
};
pub use earnings::compute_earnings_strength;
pub use engine::{SignalEngine, SignalReport, SymbolReport};
pub use flags::{is_unusual_options_volume, GammaRisk};
pub use insider::{compute_insider_strength, net_insider_value, InsiderSentiment};
pub use max_pain::{compute_max_pain, StrikeInterest};
pub use narrative::{build_options_summary, NarrativeCase};
pub use rvol::{average_volume_by_time_of_day, compute_rvol_strength};
