//! Wallet service: validation and error translation.
//!
//! Deposits and withdrawals funnel into the repository's adjustment protocol
//! with the sign chosen by the operation; callers never supply a negative
//! amount directly. Validation runs before any store access.

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use super::errors::{WalletError, WalletResult};
use super::repository::WalletRepository;

/// The two balance-mutating operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Deposit,
    Withdraw,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Deposit => write!(f, "deposit"),
            Operation::Withdraw => write!(f, "withdraw"),
        }
    }
}

/// Wallet service
///
/// Stateless between calls beyond its repository handle; performs no retries
/// and holds no in-process locks or caches around balances.
#[derive(Clone)]
pub struct WalletService {
    repo: Arc<dyn WalletRepository>,
}

impl WalletService {
    /// Create a new wallet service over any repository implementation.
    pub fn new(repo: Arc<dyn WalletRepository>) -> Self {
        Self { repo }
    }

    /// Credit `amount` (strictly positive) to the wallet.
    pub async fn deposit(&self, wallet_id: &str, amount: i64) -> WalletResult<()> {
        self.apply(Operation::Deposit, wallet_id, amount).await
    }

    /// Debit `amount` (strictly positive) from the wallet.
    ///
    /// The resulting balance may go negative; overdraft is not rejected at
    /// this layer.
    pub async fn withdraw(&self, wallet_id: &str, amount: i64) -> WalletResult<()> {
        self.apply(Operation::Withdraw, wallet_id, amount).await
    }

    /// Read the wallet's current balance without locking.
    pub async fn balance(&self, wallet_id: &str) -> WalletResult<i64> {
        let Ok(id) = Uuid::parse_str(wallet_id) else {
            tracing::warn!(wallet_id, "invalid wallet id format");
            return Err(WalletError::InvalidParams);
        };

        match self.repo.get_by_id(id).await {
            Ok(wallet) => {
                tracing::info!(wallet_id = %id, balance = wallet.balance, "wallet balance retrieved");
                Ok(wallet.balance)
            }
            Err(err @ WalletError::WalletNotFound(_)) => {
                tracing::warn!(wallet_id = %id, "wallet not found");
                Err(err)
            }
            Err(err) => {
                tracing::error!(wallet_id = %id, error = %err, "failed to get balance");
                Err(err)
            }
        }
    }

    async fn apply(&self, op: Operation, wallet_id: &str, amount: i64) -> WalletResult<()> {
        let id = match validate(wallet_id, amount) {
            Ok(id) => id,
            Err(err) => {
                tracing::warn!(op = %op, wallet_id, amount, "invalid parameters");
                return Err(err);
            }
        };

        let signed_amount = match op {
            Operation::Deposit => amount,
            Operation::Withdraw => -amount,
        };

        match self.repo.adjust(id, signed_amount).await {
            Ok(()) => {
                tracing::info!(op = %op, wallet_id = %id, amount, "operation successful");
                Ok(())
            }
            Err(err @ WalletError::WalletNotFound(_)) => {
                tracing::warn!(op = %op, wallet_id = %id, "wallet not found");
                Err(err)
            }
            Err(err) => {
                tracing::error!(op = %op, wallet_id = %id, error = %err, "failed to update balance");
                Err(err)
            }
        }
    }
}

/// Validate the wallet id format and that the amount is strictly positive.
fn validate(wallet_id: &str, amount: i64) -> WalletResult<Uuid> {
    let id = Uuid::parse_str(wallet_id).map_err(|_| WalletError::InvalidParams)?;
    if amount <= 0 {
        return Err(WalletError::InvalidParams);
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::repository::mock::MockWalletRepository;

    const VALID_ID: &str = "11111111-2b2b-4c4c-8d8d-0e0e1f2a3b4c";

    fn wallet_uuid() -> Uuid {
        Uuid::parse_str(VALID_ID).unwrap()
    }

    fn setup(initial_balance: i64) -> (WalletService, Arc<MockWalletRepository>) {
        let repo = Arc::new(MockWalletRepository::new().with_wallet(wallet_uuid(), initial_balance));
        let service = WalletService::new(repo.clone());
        (service, repo)
    }

    #[tokio::test]
    async fn test_deposit_increases_balance() {
        let (service, repo) = setup(100);

        service.deposit(VALID_ID, 50).await.expect("deposit should succeed");

        assert_eq!(repo.balance_of(wallet_uuid()), Some(150));
        assert_eq!(repo.adjust_calls(), 1);
    }

    #[tokio::test]
    async fn test_withdraw_decreases_balance() {
        let (service, repo) = setup(100);

        service
            .withdraw(VALID_ID, 30)
            .await
            .expect("withdraw should succeed");

        assert_eq!(repo.balance_of(wallet_uuid()), Some(70));
    }

    #[tokio::test]
    async fn test_withdraw_may_overdraw() {
        // Overdraft is permitted at this layer; the balance goes negative.
        let (service, repo) = setup(150);

        service
            .withdraw(VALID_ID, 200)
            .await
            .expect("overdraft withdrawal should succeed");

        assert_eq!(repo.balance_of(wallet_uuid()), Some(-50));
    }

    #[tokio::test]
    async fn test_deposit_invalid_id_never_reaches_store() {
        let (service, repo) = setup(100);

        let err = service.deposit("not-a-uuid", 100).await.unwrap_err();

        assert!(matches!(err, WalletError::InvalidParams));
        assert_eq!(repo.store_calls(), 0);
    }

    #[tokio::test]
    async fn test_zero_and_negative_amounts_rejected() {
        let (service, repo) = setup(100);

        for amount in [0, -10] {
            let err = service.deposit(VALID_ID, amount).await.unwrap_err();
            assert!(matches!(err, WalletError::InvalidParams));

            let err = service.withdraw(VALID_ID, amount).await.unwrap_err();
            assert!(matches!(err, WalletError::InvalidParams));
        }

        assert_eq!(repo.store_calls(), 0);
        assert_eq!(repo.balance_of(wallet_uuid()), Some(100));
    }

    #[tokio::test]
    async fn test_unknown_wallet_maps_to_not_found() {
        let service = WalletService::new(Arc::new(MockWalletRepository::new()));

        let err = service.deposit(VALID_ID, 100).await.unwrap_err();
        assert!(matches!(err, WalletError::WalletNotFound(_)));

        let err = service.withdraw(VALID_ID, 100).await.unwrap_err();
        assert!(matches!(err, WalletError::WalletNotFound(_)));

        let err = service.balance(VALID_ID).await.unwrap_err();
        assert!(matches!(err, WalletError::WalletNotFound(_)));
    }

    #[tokio::test]
    async fn test_balance_returns_current_value() {
        let (service, _repo) = setup(1234);

        let balance = service.balance(VALID_ID).await.expect("balance should succeed");

        assert_eq!(balance, 1234);
    }

    #[tokio::test]
    async fn test_balance_invalid_id_never_reaches_store() {
        let (service, repo) = setup(100);

        let err = service.balance("wallet-id").await.unwrap_err();

        assert!(matches!(err, WalletError::InvalidParams));
        assert_eq!(repo.store_calls(), 0);
    }

    #[tokio::test]
    async fn test_withdraw_inverts_sign_exactly_once() {
        // A deposit and a withdrawal of the same amount must cancel out.
        let (service, repo) = setup(500);

        service.deposit(VALID_ID, 75).await.unwrap();
        service.withdraw(VALID_ID, 75).await.unwrap();

        assert_eq!(repo.balance_of(wallet_uuid()), Some(500));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn run_on_runtime<F: std::future::Future>(future: F) -> F::Output {
            tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("runtime")
                .block_on(future)
        }

        proptest! {
            #[test]
            fn prop_malformed_ids_never_reach_store(
                id in "[a-zA-Z0-9 _-]{0,40}",
                amount in 1i64..1_000_000,
            ) {
                prop_assume!(Uuid::parse_str(&id).is_err());

                let repo = Arc::new(MockWalletRepository::new());
                let service = WalletService::new(repo.clone());

                let result = run_on_runtime(service.deposit(&id, amount));
                prop_assert!(matches!(result, Err(WalletError::InvalidParams)));
                prop_assert_eq!(repo.store_calls(), 0);
            }

            #[test]
            fn prop_nonpositive_amounts_never_reach_store(amount in i64::MIN..=0) {
                let repo = Arc::new(MockWalletRepository::new().with_wallet(wallet_uuid(), 100));
                let service = WalletService::new(repo.clone());

                let deposit = run_on_runtime(service.deposit(VALID_ID, amount));
                let withdraw = run_on_runtime(service.withdraw(VALID_ID, amount));

                prop_assert!(matches!(deposit, Err(WalletError::InvalidParams)));
                prop_assert!(matches!(withdraw, Err(WalletError::InvalidParams)));
                prop_assert_eq!(repo.store_calls(), 0);
            }
        }
    }
}
