//! Deposit and redemption over the transfer protocol.

use crate::error::VaultError;
use crate::transport::AssetTransport;
use rebase_ledger::BaseLedger;
use rebase_token::{AccessControl, TransferProtocol};
use rebase_types::{Address, Timestamp, FULL_BALANCE};
use serde::{Deserialize, Serialize};

/// Record of an accepted deposit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposited {
    pub holder: Address,
    pub amount: u128,
}

/// Record of a completed redemption.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redeemed {
    pub holder: Address,
    pub amount: u128,
}

/// The custodial bridge between the base asset and the ledger.
///
/// `address` is the vault's own identity; it must hold the mint/burn
/// capability on the protocol it is used with. The exchange rate is fixed
/// at 1:1.
pub struct Vault<T: AssetTransport> {
    address: Address,
    transport: T,
}

impl<T: AssetTransport> Vault<T> {
    pub fn new(address: Address, transport: T) -> Self {
        Self { address, transport }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Accept `amount` of base asset from `caller` and mint the same
    /// amount of ledger units at the current global rate.
    ///
    /// Open to any caller with sufficient base asset. If the mint fails,
    /// the received asset is returned before the error surfaces.
    pub fn deposit<L: BaseLedger, A: AccessControl>(
        &mut self,
        protocol: &mut TransferProtocol<L, A>,
        caller: &Address,
        amount: u128,
        now: Timestamp,
    ) -> Result<Deposited, VaultError> {
        self.transport
            .receive(caller, amount)
            .map_err(|e| VaultError::AssetIntakeFailed(e.to_string()))?;

        let rate = protocol.global_rate();
        if let Err(e) = protocol.mint(&self.address, caller, amount, rate, now) {
            // Hand the asset back so a failed deposit leaves nothing behind.
            if let Err(refund_err) = self.transport.send(caller, amount) {
                tracing::error!(
                    holder = %caller,
                    amount,
                    error = %refund_err,
                    "deposit refund failed after mint failure"
                );
            }
            return Err(e.into());
        }

        tracing::info!(holder = %caller, amount, rate, "deposit accepted");
        Ok(Deposited {
            holder: caller.clone(),
            amount,
        })
    }

    /// Burn `requested` ledger units from `caller` and release the same
    /// amount of base asset 1:1. `FULL_BALANCE` redeems the caller's
    /// entire effective balance, accrued interest included.
    ///
    /// Atomic: if the asset release fails, the burned amount is minted
    /// back at the caller's pre-burn rate and the redemption reports
    /// [`VaultError::AssetReleaseFailed`].
    pub fn redeem<L: BaseLedger, A: AccessControl>(
        &mut self,
        protocol: &mut TransferProtocol<L, A>,
        caller: &Address,
        requested: u128,
        now: Timestamp,
    ) -> Result<Redeemed, VaultError> {
        let resolved = if requested == FULL_BALANCE {
            protocol.effective_balance_of(caller, now)?
        } else {
            requested
        };
        let rate_before = protocol.holder_rate(caller);

        protocol.burn(&self.address, caller, resolved, now)?;

        if let Err(release_err) = self.transport.send(caller, resolved) {
            // Compensating mint-back: the ledger must not record a burn
            // whose matching asset release never happened.
            if let Err(mint_err) =
                protocol.mint(&self.address, caller, resolved, rate_before, now)
            {
                tracing::error!(
                    holder = %caller,
                    amount = resolved,
                    error = %mint_err,
                    "compensating mint failed after asset release failure"
                );
            }
            tracing::warn!(
                holder = %caller,
                amount = resolved,
                error = %release_err,
                "redemption rolled back"
            );
            return Err(VaultError::AssetReleaseFailed(release_err.to_string()));
        }

        tracing::info!(holder = %caller, amount = resolved, "redeemed");
        Ok(Redeemed {
            holder: caller.clone(),
            amount: resolved,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_records_roundtrip_through_bincode() {
        let deposited = Deposited {
            holder: Address::new("alice"),
            amount: 5_000,
        };
        let encoded = bincode::serialize(&deposited).unwrap();
        let decoded: Deposited = bincode::deserialize(&encoded).unwrap();
        assert_eq!(decoded, deposited);

        let redeemed = Redeemed {
            holder: Address::new("alice"),
            amount: 2_000,
        };
        let encoded = bincode::serialize(&redeemed).unwrap();
        let decoded: Redeemed = bincode::deserialize(&encoded).unwrap();
        assert_eq!(decoded, redeemed);
    }
}
