//! The custodial vault — a thin bridge between a base asset and the
//! accrual ledger.
//!
//! Deposits mint ledger units 1:1 at the current global rate; redemptions
//! burn ledger units and release the base asset 1:1. The vault never
//! touches interest rates or the ledger directly: everything goes through
//! the transfer protocol, and a failed asset release is compensated by
//! minting the burned amount back so ledger state and asset movement
//! succeed or fail together.

pub mod error;
pub mod transport;
pub mod vault;

pub use error::VaultError;
pub use transport::{AssetPool, AssetTransport, TransportError};
pub use vault::{Deposited, Redeemed, Vault};
