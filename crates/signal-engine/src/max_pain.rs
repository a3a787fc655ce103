//! Max pain: the settlement price that minimizes what option writers owe.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Open interest outstanding at one strike
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrikeInterest {
    pub call_open_interest: u64,
    pub put_open_interest: u64,
}

/// Total intrinsic value owed to option holders if the underlying settles at `settle`.
///
/// Calls struck below `settle` and puts struck above it finish in the money.
/// Returns `None` if the total overflows `Decimal`.
pub fn pain_at(strikes: &BTreeMap<Decimal, StrikeInterest>, settle: Decimal) -> Option<Decimal> {
    strikes.iter().try_fold(Decimal::ZERO, |total, (&strike, interest)| {
        let owed = if strike < settle {
            settle
                .checked_sub(strike)?
                .checked_mul(Decimal::from(interest.call_open_interest))?
        } else if strike > settle {
            strike
                .checked_sub(settle)?
                .checked_mul(Decimal::from(interest.put_open_interest))?
        } else {
            Decimal::ZERO
        };
        total.checked_add(owed)
    })
}

/// Strike with the lowest total pain.
///
/// Candidates are scanned in ascending strike order and only a strictly lower
/// pain replaces the current best, so ties resolve to the lowest strike.
/// Candidates whose pain overflows are skipped. Returns `None` for an empty
/// chain or when every candidate overflows.
pub fn compute_max_pain(strikes: &BTreeMap<Decimal, StrikeInterest>) -> Option<Decimal> {
    let mut best: Option<(Decimal, Decimal)> = None;

    for &candidate in strikes.keys() {
        let Some(pain) = pain_at(strikes, candidate) else {
            continue;
        };
        match best {
            Some((_, min_pain)) if pain >= min_pain => {}
            _ => best = Some((candidate, pain)),
        }
    }

    best.map(|(strike, _)| strike)
}
