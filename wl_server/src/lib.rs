//! Wallet ledger HTTP server library.
//!
//! Exposes the router and configuration so integration tests can drive the
//! API in-process with `tower::ServiceExt`.

pub mod api;
pub mod config;
pub mod logging;
