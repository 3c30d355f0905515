//! The accrual engine — settlement, funding, withdrawal, value movement.

use crate::base::BaseLedger;
use crate::error::LedgerError;
use crate::holder::HolderAccount;
use rebase_types::{Address, Timestamp, FULL_BALANCE, INITIAL_GLOBAL_RATE};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Notification emitted when the global rate changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateChanged {
    pub previous: u128,
    pub new: u128,
}

/// The accrual ledger — per-holder interest accrual on top of a plain
/// fungible ledger.
///
/// Principal lives in the base ledger; this engine owns only the accrual
/// metadata (per-holder rate and last-settlement timestamp) plus the global
/// rate handed to newly funded holders.
///
/// Every mutating operation settles the holders it touches before moving
/// principal, and validates all checked arithmetic before the first write,
/// so a failed operation leaves no partial state behind. Mutating methods
/// take `&mut self`, which serializes them under Rust's borrow rules.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccrualLedger<L: BaseLedger> {
    base: L,
    holders: HashMap<Address, HolderAccount>,
    global_rate: u128,
}

impl<L: BaseLedger> AccrualLedger<L> {
    /// Create a ledger with the default initial global rate.
    pub fn new(base: L) -> Self {
        Self::with_rate(base, INITIAL_GLOBAL_RATE)
    }

    /// Create a ledger with an explicit initial global rate.
    pub fn with_rate(base: L, global_rate: u128) -> Self {
        Self {
            base,
            holders: HashMap::new(),
            global_rate,
        }
    }

    /// The rate newly funded holders will receive.
    pub fn global_rate(&self) -> u128 {
        self.global_rate
    }

    /// A holder's personal rate (0 if never funded).
    pub fn holder_rate(&self, holder: &Address) -> u128 {
        self.holders.get(holder).map(|a| a.rate).unwrap_or(0)
    }

    /// Raw settled principal — no accrual applied. Also answers "has this
    /// holder settled funds right now".
    pub fn principal_of(&self, holder: &Address) -> u128 {
        self.base.raw_balance(holder)
    }

    /// Read access to the underlying fungible ledger.
    pub fn base(&self) -> &L {
        &self.base
    }

    /// Remaining amount `spender` may move out of `owner`'s balance.
    pub fn allowance(&self, owner: &Address, spender: &Address) -> u128 {
        self.base.allowance(owner, spender)
    }

    /// Set the allowance from `owner` to `spender`.
    pub fn approve(&mut self, owner: &Address, spender: &Address, amount: u128) {
        self.base.approve(owner, spender, amount);
    }

    /// Consume part of an allowance.
    pub fn spend_allowance(
        &mut self,
        owner: &Address,
        spender: &Address,
        amount: u128,
    ) -> Result<(), LedgerError> {
        self.base.spend_allowance(owner, spender, amount)
    }

    /// Effective (principal + accrued) balance at `now`. Pure query.
    pub fn effective_balance_of(
        &self,
        holder: &Address,
        now: Timestamp,
    ) -> Result<u128, LedgerError> {
        let principal = self.base.raw_balance(holder);
        match self.holders.get(holder) {
            Some(account) => account
                .effective_balance_checked(principal, now)
                .ok_or(LedgerError::Overflow),
            None => Ok(principal),
        }
    }

    /// Lower the global rate. Increases are rejected: the global rate is
    /// monotonically non-increasing over the life of the ledger.
    pub fn set_global_rate(&mut self, new_rate: u128) -> Result<RateChanged, LedgerError> {
        if new_rate > self.global_rate {
            return Err(LedgerError::RateMustNotIncrease {
                current: self.global_rate,
                requested: new_rate,
            });
        }
        let previous = self.global_rate;
        self.global_rate = new_rate;
        Ok(RateChanged {
            previous,
            new: new_rate,
        })
    }

    /// Interest accrued but not yet settled for a holder at `now`.
    fn pending_interest(&self, holder: &Address, now: Timestamp) -> Result<u128, LedgerError> {
        let principal = self.base.raw_balance(holder);
        match self.holders.get(holder) {
            Some(account) => account
                .pending_interest_checked(principal, now)
                .ok_or(LedgerError::Overflow),
            None => Ok(0),
        }
    }

    /// Fold a holder's accrued interest into principal and reset the
    /// accrual clock. Returns the realized delta.
    ///
    /// Value-preserving: the effective balance immediately before and after
    /// are equal. Idempotent within the same instant — a second call at the
    /// same timestamp realizes a zero delta.
    pub fn settle(&mut self, holder: &Address, now: Timestamp) -> Result<u128, LedgerError> {
        let delta = self.pending_interest(holder, now)?;
        if delta > 0 {
            self.base.increase_supply(holder, delta)?;
        }
        self.holders
            .entry(holder.clone())
            .or_insert_with(|| HolderAccount::new(0, now))
            .last_settlement = now;
        Ok(delta)
    }

    /// Settle the holder, then credit `amount` of fresh principal.
    ///
    /// Rate policy: `rate` is assigned only when the holder's principal is
    /// zero immediately before the credit (fresh funding) and `amount` is
    /// non-zero. A funded holder's rate stays frozen, and a zero-amount
    /// fund never overwrites the rate.
    pub fn fund(
        &mut self,
        holder: &Address,
        amount: u128,
        rate: u128,
        now: Timestamp,
    ) -> Result<(), LedgerError> {
        let principal = self.base.raw_balance(holder);
        let delta = self.pending_interest(holder, now)?;

        // Validate the full credit before any write.
        self.base
            .total_supply()
            .checked_add(delta)
            .and_then(|s| s.checked_add(amount))
            .ok_or(LedgerError::Overflow)?;
        principal
            .checked_add(delta)
            .and_then(|p| p.checked_add(amount))
            .ok_or(LedgerError::Overflow)?;

        if delta > 0 {
            self.base.increase_supply(holder, delta)?;
        }
        let account = self
            .holders
            .entry(holder.clone())
            .or_insert_with(|| HolderAccount::new(0, now));
        if principal == 0 && amount > 0 {
            account.rate = rate;
        }
        account.last_settlement = now;
        if amount > 0 {
            self.base.increase_supply(holder, amount)?;
        }
        Ok(())
    }

    /// Settle the holder, then debit `amount` of principal.
    ///
    /// `FULL_BALANCE` resolves to the holder's entire effective balance.
    /// Returns the resolved amount actually debited.
    pub fn withdraw(
        &mut self,
        holder: &Address,
        amount: u128,
        now: Timestamp,
    ) -> Result<u128, LedgerError> {
        let effective = self.effective_balance_of(holder, now)?;
        let resolved = if amount == FULL_BALANCE {
            effective
        } else {
            amount
        };
        if resolved > effective {
            return Err(LedgerError::InsufficientBalance {
                needed: resolved,
                available: effective,
            });
        }

        let delta = self.pending_interest(holder, now)?;
        self.base
            .total_supply()
            .checked_add(delta)
            .ok_or(LedgerError::Overflow)?;

        if delta > 0 {
            self.base.increase_supply(holder, delta)?;
        }
        self.holders
            .entry(holder.clone())
            .or_insert_with(|| HolderAccount::new(0, now))
            .last_settlement = now;
        self.base.decrease_supply(holder, resolved)?;
        Ok(resolved)
    }

    /// Settle both endpoints, then move `amount` of principal from `from`
    /// to `to`.
    ///
    /// `FULL_BALANCE` resolves to the sender's entire effective balance
    /// (resolution before settlement and after agree — settlement is
    /// value-preserving). If `to` held zero principal immediately before
    /// its settlement, it inherits the sender's rate instead of the
    /// current global rate. Returns the resolved amount moved.
    pub fn move_value(
        &mut self,
        from: &Address,
        to: &Address,
        amount: u128,
        now: Timestamp,
    ) -> Result<u128, LedgerError> {
        let from_effective = self.effective_balance_of(from, now)?;
        let resolved = if amount == FULL_BALANCE {
            from_effective
        } else {
            amount
        };
        if resolved > from_effective {
            return Err(LedgerError::InsufficientBalance {
                needed: resolved,
                available: from_effective,
            });
        }

        // Transfer to self: value-preserving no-op apart from the settlement.
        if from == to {
            self.settle(from, now)?;
            return Ok(resolved);
        }

        let from_delta = self.pending_interest(from, now)?;
        let to_delta = self.pending_interest(to, now)?;
        let to_principal = self.base.raw_balance(to);

        // Validate every credit before the first write.
        self.base
            .total_supply()
            .checked_add(from_delta)
            .and_then(|s| s.checked_add(to_delta))
            .ok_or(LedgerError::Overflow)?;
        to_principal
            .checked_add(to_delta)
            .and_then(|p| p.checked_add(resolved))
            .ok_or(LedgerError::Overflow)?;

        if from_delta > 0 {
            self.base.increase_supply(from, from_delta)?;
        }
        if to_delta > 0 {
            self.base.increase_supply(to, to_delta)?;
        }

        let inherited_rate = self.holder_rate(from);
        self.holders
            .entry(from.clone())
            .or_insert_with(|| HolderAccount::new(0, now))
            .last_settlement = now;
        let to_account = self
            .holders
            .entry(to.clone())
            .or_insert_with(|| HolderAccount::new(0, now));
        if to_principal == 0 {
            to_account.rate = inherited_rate;
        }
        to_account.last_settlement = now;

        self.base.move_raw(from, to, resolved)?;
        Ok(resolved)
    }
}

impl<L> AccrualLedger<L>
where
    L: BaseLedger + Serialize + for<'de> Deserialize<'de>,
{
    /// Serialize the full ledger state (base balances, accrual metadata,
    /// global rate) for persistence.
    pub fn to_bytes(&self) -> Result<Vec<u8>, LedgerError> {
        bincode::serialize(self).map_err(|e| LedgerError::Snapshot(e.to_string()))
    }

    /// Restore a ledger from a serialized snapshot.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LedgerError> {
        bincode::deserialize(bytes).map_err(|e| LedgerError::Snapshot(e.to_string()))
    }
}
