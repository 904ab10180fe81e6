use super::AppState;
use super::error::ApiError;
use super::models::{
    HealthResponse, OpenWalletRequest, WalletBalanceResponse, WalletOperationRequest,
};
use crate::domain::wallet::WalletId;
use crate::error::WalletError;
use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;

type ApiResult<T> = std::result::Result<T, ApiError>;

/// `POST /api/v1/wallet`
pub async fn operate(
    State(state): State<AppState>,
    payload: std::result::Result<Json<WalletOperationRequest>, JsonRejection>,
) -> ApiResult<Json<WalletBalanceResponse>> {
    let Json(request) = payload?;
    let operation = request.validate()?;
    let result = state.mutator.apply(operation).await?;
    Ok(Json(result.into()))
}

/// `GET /api/v1/wallet/{wallet_id}`
pub async fn get_balance(
    State(state): State<AppState>,
    Path(wallet_id): Path<String>,
) -> ApiResult<Json<WalletBalanceResponse>> {
    let wallet_id: WalletId = wallet_id.parse()?;
    let result = state.query.get_balance(wallet_id).await?;
    Ok(Json(result.into()))
}

/// `POST /api/v1/wallets`
///
/// The body is optional. An empty body opens a wallet under a generated id.
pub async fn open_wallet(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<WalletBalanceResponse>)> {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        OpenWalletRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| WalletError::InvalidInput(e.to_string()))?
    };

    let opened = state.provisioner.open(request.wallet_id).await?;
    Ok((StatusCode::CREATED, Json(opened.into())))
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}
