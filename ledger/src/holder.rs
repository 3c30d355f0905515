//! Per-holder accrual state.

use rebase_types::{Timestamp, PRECISION_FACTOR};
use serde::{Deserialize, Serialize};

/// Accrual metadata for a single holder.
///
/// Lightweight: the settled principal itself lives in the base fungible
/// ledger, not here. The rate is fixed at first funding and stays frozen
/// until the holder's principal returns to zero.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HolderAccount {
    /// Personal interest rate, fixed-point scaled against `PRECISION_FACTOR`.
    pub rate: u128,

    /// Last time accrued interest was folded into principal.
    pub last_settlement: Timestamp,
}

impl HolderAccount {
    pub fn new(rate: u128, at: Timestamp) -> Self {
        Self {
            rate,
            last_settlement: at,
        }
    }

    /// The linear accrual multiplier at `now`, scaled by `PRECISION_FACTOR`:
    /// `PRECISION_FACTOR + rate × elapsed`. Returns `None` on overflow.
    ///
    /// Linear, not compounding: two equal intervals yield two equal deltas.
    pub fn accrual_multiplier_checked(&self, now: Timestamp) -> Option<u128> {
        let elapsed = self.last_settlement.elapsed_since(now) as u128;
        PRECISION_FACTOR.checked_add(self.rate.checked_mul(elapsed)?)
    }

    /// Effective (principal + accrued) balance at `now`.
    ///
    /// Returns 0 for zero principal regardless of elapsed time — there is
    /// nothing to accrue on. Returns `None` on overflow.
    pub fn effective_balance_checked(&self, principal: u128, now: Timestamp) -> Option<u128> {
        if principal == 0 {
            return Some(0);
        }
        let multiplier = self.accrual_multiplier_checked(now)?;
        Some(principal.checked_mul(multiplier)? / PRECISION_FACTOR)
    }

    /// Interest accrued but not yet settled at `now`.
    pub fn pending_interest_checked(&self, principal: u128, now: Timestamp) -> Option<u128> {
        let effective = self.effective_balance_checked(principal, now)?;
        Some(effective - principal)
    }
}
