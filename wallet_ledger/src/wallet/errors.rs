//! Wallet error types.

use uuid::Uuid;

use crate::db::timeouts::TimeoutError;
use thiserror::Error;

/// Wallet errors
///
/// This is the complete vocabulary the API layer is allowed to branch on:
/// `InvalidParams` and `WalletNotFound` are caller errors; everything else
/// surfaces as an opaque internal failure.
#[derive(Debug, Error)]
pub enum WalletError {
    /// Malformed wallet id or non-positive amount
    #[error("Invalid parameters provided")]
    InvalidParams,

    /// Wallet not found
    #[error("Wallet not found: {0}")]
    WalletNotFound(Uuid),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Lock wait or query deadline expired
    #[error("Operation timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Adjustment would overflow the i64 balance
    #[error("Balance adjustment would overflow")]
    BalanceOverflow,
}

impl WalletError {
    /// Get a client-safe error message that doesn't leak internal details
    ///
    /// Storage and timeout errors are sanitized so that driver text never
    /// reaches API clients; wallet ids are redacted from not-found messages.
    pub fn client_message(&self) -> String {
        match self {
            WalletError::InvalidParams => self.to_string(),
            WalletError::WalletNotFound(_) => "Wallet not found".to_string(),
            WalletError::Database(_) | WalletError::Timeout(_) | WalletError::BalanceOverflow => {
                "Internal server error".to_string()
            }
        }
    }
}

impl From<TimeoutError> for WalletError {
    fn from(err: TimeoutError) -> Self {
        match err {
            TimeoutError::Timeout(d) => WalletError::Timeout(d),
            TimeoutError::Database(e) => WalletError::Database(e),
        }
    }
}

/// Result type for wallet operations
pub type WalletResult<T> = Result<T, WalletError>;
