//! Base-asset transport seam.
//!
//! The vault's only external I/O: accepting base asset on deposit and
//! releasing it on redemption. Both are fallible; the vault treats a
//! failed release as a signal to undo the matching burn.

use rebase_types::Address;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Moves base asset between external accounts and the vault's reserve.
pub trait AssetTransport {
    /// Pull `amount` of base asset from `from` into the reserve.
    fn receive(&mut self, from: &Address, amount: u128) -> Result<(), TransportError>;

    /// Release `amount` of base asset from the reserve to `to`.
    fn send(&mut self, to: &Address, amount: u128) -> Result<(), TransportError>;
}

/// In-memory base-asset pool.
///
/// Tracks external account balances plus the vault's reserve. The reserve
/// can be topped up out-of-band (`add_rewards`) to cover accrued interest
/// on redemption.
#[derive(Clone, Debug, Default)]
pub struct AssetPool {
    accounts: HashMap<Address, u128>,
    reserve: u128,
}

impl AssetPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base-asset balance of an external account.
    pub fn account_balance(&self, account: &Address) -> u128 {
        self.accounts.get(account).copied().unwrap_or(0)
    }

    /// Base asset currently held by the vault.
    pub fn reserve(&self) -> u128 {
        self.reserve
    }

    /// Credit an external account (test/setup convenience).
    pub fn credit_account(&mut self, account: &Address, amount: u128) {
        let balance = self.account_balance(account);
        self.accounts
            .insert(account.clone(), balance.saturating_add(amount));
    }

    /// Top up the reserve out-of-band (e.g. rewards funding accrued
    /// interest on redemptions).
    pub fn add_rewards(&mut self, amount: u128) {
        self.reserve = self.reserve.saturating_add(amount);
    }
}

impl AssetTransport for AssetPool {
    fn receive(&mut self, from: &Address, amount: u128) -> Result<(), TransportError> {
        let balance = self.account_balance(from);
        if amount > balance {
            return Err(TransportError(format!(
                "account {from} holds {balance}, cannot deposit {amount}"
            )));
        }
        self.accounts.insert(from.clone(), balance - amount);
        self.reserve = self
            .reserve
            .checked_add(amount)
            .ok_or_else(|| TransportError("reserve overflow".into()))?;
        Ok(())
    }

    fn send(&mut self, to: &Address, amount: u128) -> Result<(), TransportError> {
        if amount > self.reserve {
            return Err(TransportError(format!(
                "reserve holds {}, cannot release {amount}",
                self.reserve
            )));
        }
        let balance = self.account_balance(to);
        let new_balance = balance
            .checked_add(amount)
            .ok_or_else(|| TransportError("account balance overflow".into()))?;
        self.reserve -= amount;
        self.accounts.insert(to.clone(), new_balance);
        Ok(())
    }
}
