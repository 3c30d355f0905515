//! Protocol parameters.
//!
//! All amounts and rates are fixed-point integers (u128) to avoid
//! floating-point errors. The smallest unit is 1 raw.

/// Fixed-point scale for interest rates and accrual multipliers.
///
/// A rate of `PRECISION_FACTOR` means the accrual multiplier grows by 100%
/// of principal per second; real rates are many orders of magnitude smaller.
pub const PRECISION_FACTOR: u128 = 1_000_000_000_000_000_000;

/// Sentinel amount meaning "the holder's full effective balance".
///
/// Accepted by burn, transfer, and redeem; resolved before the engine
/// mutates anything.
pub const FULL_BALANCE: u128 = u128::MAX;

/// Default global interest rate for a freshly constructed ledger:
/// 5e10 raw per second ≈ 5e-8 of principal per second against
/// `PRECISION_FACTOR`.
pub const INITIAL_GLOBAL_RATE: u128 = 50_000_000_000;
