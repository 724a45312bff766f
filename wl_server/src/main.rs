//! Wallet ledger HTTP server.
//!
//! Wires the PostgreSQL-backed wallet service into an axum router with
//! graceful shutdown on SIGINT/SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Error;
use pico_args::Arguments;
use wallet_ledger::db::Database;
use wallet_ledger::wallet::{PgWalletRepository, WalletService};
use wl_server::{api, config::ServerConfig, logging};

const HELP: &str = "\
Run the wallet ledger HTTP server

USAGE:
  wl_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:8080]
  --db-url     URL         Database connection string  [default: env DATABASE_URL]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND                  Server bind address (e.g., 0.0.0.0:8080)
  DATABASE_URL                 PostgreSQL connection string
  DB_MAX_CONNECTIONS           Connection pool size
  DB_TRANSACTION_TIMEOUT_SECS  Row-lock transaction timeout
  SHUTDOWN_TIMEOUT_SECS        Pool drain bound on shutdown
  RUST_LOG                     Log filter (e.g., info,sqlx=warn)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let bind_override: Option<SocketAddr> = pargs.opt_value_from_str("--bind")?;
    let database_url_override: Option<String> = pargs.opt_value_from_str("--db-url")?;

    logging::init();

    let config = ServerConfig::from_env(bind_override, database_url_override)?;
    config.validate()?;

    tracing::info!(bind = %config.bind, "Starting wallet ledger server");

    let db = Database::new(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;
    db.migrate()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to apply migrations: {}", e))?;

    tracing::info!("Database connected");

    let repo = Arc::new(PgWalletRepository::new(db.pool().clone()));
    let state = api::AppState {
        wallet_service: WalletService::new(repo),
    };

    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind, e))?;

    tracing::info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    tracing::info!("Shutting down server...");

    // Bound the pool drain so shutdown cannot hang on a stuck connection.
    let drain = Duration::from_secs(config.shutdown_timeout_secs);
    if tokio::time::timeout(drain, db.close()).await.is_err() {
        tracing::warn!("Connection pool did not drain within {:?}", drain);
    }

    tracing::info!("Server stopped gracefully");

    Ok(())
}

/// Resolve when either SIGINT or SIGTERM arrives.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Received stop signal");
}
