//! Base fungible-ledger seam.
//!
//! The accrual engine is a layer strictly on top of a plain fungible token:
//! it reads raw (settled) balances and mutates supply only through this
//! trait, never bypassing it.

use crate::error::LedgerError;
use rebase_types::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Raw fungible-token bookkeeping: principal balances, total supply,
/// allowances. No accrual logic lives here.
pub trait BaseLedger {
    /// Settled balance for a holder — no accrual applied.
    fn raw_balance(&self, holder: &Address) -> u128;

    /// Total settled supply across all holders.
    fn total_supply(&self) -> u128;

    /// Credit `amount` to a holder, growing total supply.
    fn increase_supply(&mut self, holder: &Address, amount: u128) -> Result<(), LedgerError>;

    /// Debit `amount` from a holder, shrinking total supply.
    fn decrease_supply(&mut self, holder: &Address, amount: u128) -> Result<(), LedgerError>;

    /// Move `amount` of settled balance between holders.
    fn move_raw(&mut self, from: &Address, to: &Address, amount: u128)
        -> Result<(), LedgerError>;

    /// Remaining amount `spender` may move out of `owner`'s balance.
    fn allowance(&self, owner: &Address, spender: &Address) -> u128;

    /// Set the allowance from `owner` to `spender` (overwrites).
    fn approve(&mut self, owner: &Address, spender: &Address, amount: u128);

    /// Consume part of an allowance, failing if it does not cover `amount`.
    fn spend_allowance(
        &mut self,
        owner: &Address,
        spender: &Address,
        amount: u128,
    ) -> Result<(), LedgerError>;
}

/// In-memory [`BaseLedger`] backed by hash maps.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MemoryLedger {
    balances: HashMap<Address, u128>,
    allowances: HashMap<(Address, Address), u128>,
    total_supply: u128,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BaseLedger for MemoryLedger {
    fn raw_balance(&self, holder: &Address) -> u128 {
        self.balances.get(holder).copied().unwrap_or(0)
    }

    fn total_supply(&self) -> u128 {
        self.total_supply
    }

    fn increase_supply(&mut self, holder: &Address, amount: u128) -> Result<(), LedgerError> {
        let balance = self.raw_balance(holder);
        let new_balance = balance.checked_add(amount).ok_or(LedgerError::Overflow)?;
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.balances.insert(holder.clone(), new_balance);
        self.total_supply = new_supply;
        Ok(())
    }

    fn decrease_supply(&mut self, holder: &Address, amount: u128) -> Result<(), LedgerError> {
        let balance = self.raw_balance(holder);
        if amount > balance {
            return Err(LedgerError::InsufficientBalance {
                needed: amount,
                available: balance,
            });
        }
        self.balances.insert(holder.clone(), balance - amount);
        self.total_supply -= amount;
        Ok(())
    }

    fn move_raw(
        &mut self,
        from: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<(), LedgerError> {
        let from_balance = self.raw_balance(from);
        if amount > from_balance {
            return Err(LedgerError::InsufficientBalance {
                needed: amount,
                available: from_balance,
            });
        }
        if from == to {
            return Ok(());
        }
        let to_balance = self.raw_balance(to);
        let new_to = to_balance.checked_add(amount).ok_or(LedgerError::Overflow)?;
        self.balances.insert(from.clone(), from_balance - amount);
        self.balances.insert(to.clone(), new_to);
        Ok(())
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> u128 {
        self.allowances
            .get(&(owner.clone(), spender.clone()))
            .copied()
            .unwrap_or(0)
    }

    fn approve(&mut self, owner: &Address, spender: &Address, amount: u128) {
        self.allowances
            .insert((owner.clone(), spender.clone()), amount);
    }

    fn spend_allowance(
        &mut self,
        owner: &Address,
        spender: &Address,
        amount: u128,
    ) -> Result<(), LedgerError> {
        let approved = self.allowance(owner, spender);
        if amount > approved {
            return Err(LedgerError::InsufficientAllowance {
                needed: amount,
                approved,
            });
        }
        self.allowances
            .insert((owner.clone(), spender.clone()), approved - amount);
        Ok(())
    }
}
