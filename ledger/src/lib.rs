//! The accrual ledger — an interest-accruing balance engine.
//!
//! Every holder's spendable balance grows linearly with time:
//! `effective(h) = principal(h) × (PRECISION + rate(h) × elapsed) / PRECISION`
//!
//! Interest is *accrued* continuously but only *settled* (folded into
//! principal) when an operation touches the holder. Settlement is
//! value-preserving: the effective balance immediately before and after a
//! settlement are equal.
//!
//! This crate handles:
//! - Effective-balance computation from principal, rate, and elapsed time
//! - Settlement, funding, withdrawal, and value movement between holders
//! - Interest-rate inheritance for first-time recipients
//! - The monotonically non-increasing global rate
//!
//! All arithmetic is checked; overflow surfaces as [`LedgerError::Overflow`]
//! and every failed operation leaves the ledger untouched.

pub mod accrual;
pub mod base;
pub mod error;
pub mod holder;

pub use accrual::{AccrualLedger, RateChanged};
pub use base::{BaseLedger, MemoryLedger};
pub use error::LedgerError;
pub use holder::HolderAccount;
