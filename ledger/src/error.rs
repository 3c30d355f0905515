//! Ledger-specific errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("insufficient balance: need {needed}, available {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("insufficient allowance: need {needed}, approved {approved}")]
    InsufficientAllowance { needed: u128, approved: u128 },

    #[error("global rate may only decrease: current {current}, requested {requested}")]
    RateMustNotIncrease { current: u128, requested: u128 },

    #[error("arithmetic overflow in accrual computation")]
    Overflow,

    #[error("snapshot (de)serialization failed: {0}")]
    Snapshot(String),
}
