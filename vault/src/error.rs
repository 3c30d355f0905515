//! Vault-specific errors.

use rebase_token::ProtocolError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("asset release failed: {0}")]
    AssetReleaseFailed(String),

    #[error("asset intake failed: {0}")]
    AssetIntakeFailed(String),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
