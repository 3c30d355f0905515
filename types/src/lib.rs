//! Fundamental types for the rebase protocol.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: holder addresses, timestamps, and protocol parameters.

pub mod address;
pub mod params;
pub mod time;

pub use address::Address;
pub use params::{FULL_BALANCE, INITIAL_GLOBAL_RATE, PRECISION_FACTOR};
pub use time::Timestamp;
