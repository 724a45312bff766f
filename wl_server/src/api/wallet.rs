//! Wallet API handlers.
//!
//! Two endpoints over the wallet service:
//! - `POST /api/v1/wallet` applies a deposit or withdrawal
//! - `GET /api/v1/wallets/{id}` reads a wallet's balance
//!
//! # Examples
//!
//! Apply a deposit:
//! ```bash
//! curl -X POST http://localhost:8080/api/v1/wallet \
//!   -H "Content-Type: application/json" \
//!   -d '{"walletId": "11111111-2b2b-4c4c-8d8d-0e0e1f2a3b4c", "operationType": "deposit", "amount": 1000}'
//! ```
//!
//! Read a balance:
//! ```bash
//! curl http://localhost:8080/api/v1/wallets/11111111-2b2b-4c4c-8d8d-0e0e1f2a3b4c
//! ```

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::Response,
};
use serde::{Deserialize, Serialize};
use wallet_ledger::wallet::WalletError;

use super::{AppState, response};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRequest {
    pub wallet_id: String,
    pub operation_type: OperationType,
    pub amount: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Deposit,
    Withdraw,
}

#[derive(Debug, Serialize)]
pub struct OperationData {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceData {
    pub wallet_id: String,
    pub balance: i64,
}

/// Apply a deposit or withdrawal to a wallet.
///
/// # Response
///
/// Returns `200 OK` on success:
/// ```json
/// {"success": true, "data": {"message": "Deposit successful"}}
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: malformed body, unknown operation type, invalid
///   wallet id, or non-positive amount
/// - `404 Not Found`: wallet does not exist
/// - `500 Internal Server Error`: storage fault
pub async fn operation(
    State(state): State<AppState>,
    body: Result<Json<OperationRequest>, JsonRejection>,
) -> Response {
    // Decode failures (including an unknown operationType) never reach the
    // service, mirroring the service's validation-before-I/O rule.
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => return response::validation_error(rejection.body_text()),
    };

    let result = match req.operation_type {
        OperationType::Deposit => state
            .wallet_service
            .deposit(&req.wallet_id, req.amount)
            .await
            .map(|()| "Deposit successful"),
        OperationType::Withdraw => state
            .wallet_service
            .withdraw(&req.wallet_id, req.amount)
            .await
            .map(|()| "Withdrawal successful"),
    };

    match result {
        Ok(message) => response::success(
            StatusCode::OK,
            OperationData {
                message: message.to_string(),
            },
        ),
        Err(err) => wallet_error_response(&err),
    }
}

/// Read a wallet's current balance.
///
/// # Response
///
/// Returns `200 OK` with the balance:
/// ```json
/// {"success": true, "data": {"walletId": "...", "balance": 1500}}
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: id is not a UUID
/// - `404 Not Found`: wallet does not exist
/// - `500 Internal Server Error`: storage fault
pub async fn balance(State(state): State<AppState>, Path(wallet_id): Path<String>) -> Response {
    match state.wallet_service.balance(&wallet_id).await {
        Ok(balance) => response::success(StatusCode::OK, BalanceData { wallet_id, balance }),
        Err(err) => wallet_error_response(&err),
    }
}

/// Map the service error taxonomy onto HTTP statuses.
fn wallet_error_response(err: &WalletError) -> Response {
    match err {
        WalletError::InvalidParams => response::validation_error(err.client_message()),
        WalletError::WalletNotFound(_) => response::not_found(&err.client_message()),
        _ => response::internal_error(&err.client_message()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_operation_request_decodes_camel_case() {
        let req: OperationRequest = serde_json::from_str(
            r#"{"walletId": "11111111-2b2b-4c4c-8d8d-0e0e1f2a3b4c", "operationType": "deposit", "amount": 100}"#,
        )
        .unwrap();

        assert_eq!(req.operation_type, OperationType::Deposit);
        assert_eq!(req.amount, 100);
    }

    #[test]
    fn test_unknown_operation_type_is_rejected() {
        let result: Result<OperationRequest, _> = serde_json::from_str(
            r#"{"walletId": "11111111-2b2b-4c4c-8d8d-0e0e1f2a3b4c", "operationType": "transfer", "amount": 100}"#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_balance_data_serializes_camel_case() {
        let body = serde_json::to_value(BalanceData {
            wallet_id: "abc".to_string(),
            balance: 42,
        })
        .unwrap();

        assert_eq!(body["walletId"], "abc");
        assert_eq!(body["balance"], 42);
    }

    #[test]
    fn test_error_mapping_statuses() {
        let invalid = wallet_error_response(&WalletError::InvalidParams);
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let not_found = wallet_error_response(&WalletError::WalletNotFound(Uuid::new_v4()));
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let internal = wallet_error_response(&WalletError::BalanceOverflow);
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
