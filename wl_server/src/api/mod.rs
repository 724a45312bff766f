//! HTTP API for the wallet ledger server.
//!
//! # Architecture
//!
//! - **Axum**: async web framework for routing and extraction
//! - **Tower**: middleware stack (CORS, request ids)
//! - **WalletService**: validation and error translation over the
//!   row-locking repository
//!
//! # Endpoints
//!
//! ```text
//! GET  /health               - Liveness check (bypasses the core)
//! POST /api/v1/wallet        - Apply a deposit or withdrawal
//! GET  /api/v1/wallets/{id}  - Read a wallet balance
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use wl_server::api::{AppState, create_router};
//! # use wallet_ledger::wallet::WalletService;
//! # async fn example(wallet_service: WalletService) -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_router(AppState { wallet_service });
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod request_id;
pub mod response;
pub mod wallet;

use axum::{
    Router,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use wallet_ledger::wallet::WalletService;

/// Application state shared across all HTTP handlers.
///
/// Cloned per request; the service itself is stateless beyond its pool
/// handle, so clones are cheap.
#[derive(Clone)]
pub struct AppState {
    pub wallet_service: WalletService,
}

/// Create the complete API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/wallet", post(wallet::operation))
        .route("/wallets/{id}", get(wallet::balance));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", v1_routes)
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Liveness endpoint for monitoring and load balancers.
///
/// Deliberately does not touch the database: it reports that the process is
/// serving, nothing more.
async fn health_check() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}
