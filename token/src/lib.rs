//! The transfer protocol — the authorized surface over the accrual ledger.
//!
//! Every value-moving operation (mint, burn, transfer, transfer-from) goes
//! through this crate so that:
//! - mint/burn require the [`Role::MintAndBurn`] capability,
//! - `set_global_rate` and `grant_role` require ownership,
//! - every touched holder is settled before principal moves (enforced by
//!   the engine underneath),
//! - the full-balance sentinel is resolved consistently.

pub mod auth;
pub mod error;
pub mod protocol;

pub use auth::{AccessControl, Role, RoleRegistry};
pub use error::ProtocolError;
pub use protocol::TransferProtocol;
