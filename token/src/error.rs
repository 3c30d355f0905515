//! Protocol-specific errors.

use rebase_ledger::LedgerError;
use rebase_types::Address;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("caller {0} is not authorized for this operation")]
    Unauthorized(Address),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
