//! Wallet module providing the atomic balance-adjustment protocol.
//!
//! This module implements:
//! - A repository owning the row-lock transaction protocol (`FOR UPDATE`)
//! - A service layer with input validation and error translation
//! - A complete error taxonomy for the API layer to branch on
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use wallet_ledger::db::Database;
//! use wallet_ledger::wallet::{PgWalletRepository, WalletService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&Default::default()).await?;
//!     let repo = Arc::new(PgWalletRepository::new(db.pool().clone()));
//!     let service = WalletService::new(repo);
//!
//!     service
//!         .deposit("11111111-2b2b-4c4c-8d8d-0e0e1f2a3b4c", 500)
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod models;
pub mod repository;
pub mod service;

pub use errors::{WalletError, WalletResult};
pub use models::Wallet;
pub use repository::{PgWalletRepository, WalletRepository};
pub use service::WalletService;
