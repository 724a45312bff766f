//! # Wallet Ledger
//!
//! A balance ledger for named wallets: deposit, withdraw, and read balance,
//! backed by PostgreSQL.
//!
//! Concurrent adjustments against the same wallet are serialized with a
//! row-level `SELECT ... FOR UPDATE` lock inside a per-call transaction, so
//! the final balance always equals the initial balance plus the sum of all
//! accepted signed amounts. Adjustments against different wallets proceed in
//! parallel; balance reads never take the lock.
//!
//! ## Core Modules
//!
//! - [`db`]: PostgreSQL connection pooling, configuration, and query timeouts
//! - [`wallet`]: Wallet models, error taxonomy, repository, and service
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use wallet_ledger::db::{Database, DatabaseConfig};
//! use wallet_ledger::wallet::{PgWalletRepository, WalletService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&DatabaseConfig::from_env()).await?;
//!     let repo = Arc::new(PgWalletRepository::new(db.pool().clone()));
//!     let service = WalletService::new(repo);
//!
//!     service
//!         .deposit("11111111-2b2b-4c4c-8d8d-0e0e1f2a3b4c", 100)
//!         .await?;
//!     let balance = service
//!         .balance("11111111-2b2b-4c4c-8d8d-0e0e1f2a3b4c")
//!         .await?;
//!     println!("balance: {balance}");
//!
//!     Ok(())
//! }
//! ```

/// PostgreSQL connection pooling and utilities.
pub mod db;
pub use db::{Database, DatabaseConfig};

/// Wallet models, errors, repository, and service.
pub mod wallet;
pub use wallet::{
    PgWalletRepository, Wallet, WalletError, WalletRepository, WalletResult, WalletService,
};
