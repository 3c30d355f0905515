//! The settlement-gated, authorization-checked operation surface.

use crate::auth::{AccessControl, Role};
use crate::error::ProtocolError;
use rebase_ledger::{AccrualLedger, BaseLedger, RateChanged};
use rebase_types::{Address, Timestamp, FULL_BALANCE};

/// Wraps the accrual engine with capability checks.
///
/// The engine itself settles every holder an operation touches before any
/// principal moves; this layer decides who may trigger which operation and
/// resolves the full-balance sentinel where the engine does not.
pub struct TransferProtocol<L: BaseLedger, A: AccessControl> {
    ledger: AccrualLedger<L>,
    auth: A,
}

impl<L: BaseLedger, A: AccessControl> TransferProtocol<L, A> {
    pub fn new(ledger: AccrualLedger<L>, auth: A) -> Self {
        Self { ledger, auth }
    }

    /// Read access to the wrapped engine. Mutation goes through the
    /// protocol's checked operations only.
    pub fn ledger(&self) -> &AccrualLedger<L> {
        &self.ledger
    }

    pub fn auth(&self) -> &A {
        &self.auth
    }

    // ── Queries ──────────────────────────────────────────────────────────

    pub fn effective_balance_of(
        &self,
        holder: &Address,
        now: Timestamp,
    ) -> Result<u128, ProtocolError> {
        Ok(self.ledger.effective_balance_of(holder, now)?)
    }

    pub fn principal_of(&self, holder: &Address) -> u128 {
        self.ledger.principal_of(holder)
    }

    pub fn holder_rate(&self, holder: &Address) -> u128 {
        self.ledger.holder_rate(holder)
    }

    pub fn global_rate(&self) -> u128 {
        self.ledger.global_rate()
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> u128 {
        self.ledger.allowance(owner, spender)
    }

    // ── Privileged operations ────────────────────────────────────────────

    /// Mint `amount` to `to` at the supplied rate.
    ///
    /// Requires [`Role::MintAndBurn`]. The rate is only assigned when `to`
    /// holds nothing (see the engine's fund policy).
    pub fn mint(
        &mut self,
        caller: &Address,
        to: &Address,
        amount: u128,
        rate: u128,
        now: Timestamp,
    ) -> Result<(), ProtocolError> {
        self.require_role(caller, Role::MintAndBurn)?;
        self.ledger.fund(to, amount, rate, now)?;
        tracing::debug!(caller = %caller, to = %to, amount, rate, "minted");
        Ok(())
    }

    /// Burn `amount` from `from`. `FULL_BALANCE` burns the entire effective
    /// balance. Returns the resolved amount burned.
    ///
    /// Requires [`Role::MintAndBurn`].
    pub fn burn(
        &mut self,
        caller: &Address,
        from: &Address,
        amount: u128,
        now: Timestamp,
    ) -> Result<u128, ProtocolError> {
        self.require_role(caller, Role::MintAndBurn)?;
        let resolved = self.ledger.withdraw(from, amount, now)?;
        tracing::debug!(caller = %caller, from = %from, amount = resolved, "burned");
        Ok(resolved)
    }

    /// Lower the global rate for future depositors. Owner-only.
    pub fn set_global_rate(
        &mut self,
        caller: &Address,
        new_rate: u128,
    ) -> Result<RateChanged, ProtocolError> {
        self.require_owner(caller)?;
        let change = self.ledger.set_global_rate(new_rate)?;
        tracing::info!(
            previous = change.previous,
            new = change.new,
            "global rate changed"
        );
        Ok(change)
    }

    /// Grant a capability to an account. Owner-only.
    pub fn grant_role(
        &mut self,
        caller: &Address,
        role: Role,
        account: &Address,
    ) -> Result<(), ProtocolError> {
        self.require_owner(caller)?;
        self.auth.grant_role(role, account);
        tracing::info!(account = %account, ?role, "role granted");
        Ok(())
    }

    // ── Holder operations ────────────────────────────────────────────────

    /// Move value from `from` to `to`, settling both endpoints first.
    /// `FULL_BALANCE` moves the sender's entire effective balance.
    /// Returns the resolved amount moved.
    pub fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: u128,
        now: Timestamp,
    ) -> Result<u128, ProtocolError> {
        Ok(self.ledger.move_value(from, to, amount, now)?)
    }

    /// Move value out of `from` on behalf of `spender`, consuming allowance.
    pub fn transfer_from(
        &mut self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: u128,
        now: Timestamp,
    ) -> Result<u128, ProtocolError> {
        let resolved = if amount == FULL_BALANCE {
            self.ledger.effective_balance_of(from, now)?
        } else {
            amount
        };
        let approved = self.ledger.allowance(from, spender);
        if resolved > approved {
            return Err(ProtocolError::Ledger(
                rebase_ledger::LedgerError::InsufficientAllowance {
                    needed: resolved,
                    approved,
                },
            ));
        }
        let moved = self.ledger.move_value(from, to, resolved, now)?;
        self.ledger.spend_allowance(from, spender, moved)?;
        Ok(moved)
    }

    /// Set the allowance from `owner` to `spender`.
    pub fn approve(&mut self, owner: &Address, spender: &Address, amount: u128) {
        self.ledger.approve(owner, spender, amount);
    }

    // ── Capability checks ────────────────────────────────────────────────

    fn require_role(&self, caller: &Address, role: Role) -> Result<(), ProtocolError> {
        if self.auth.has_role(caller, role) {
            Ok(())
        } else {
            Err(ProtocolError::Unauthorized(caller.clone()))
        }
    }

    fn require_owner(&self, caller: &Address) -> Result<(), ProtocolError> {
        if self.auth.is_owner(caller) {
            Ok(())
        } else {
            Err(ProtocolError::Unauthorized(caller.clone()))
        }
    }
}
