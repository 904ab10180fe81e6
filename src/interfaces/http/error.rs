use super::models::ErrorResponse;
use crate::error::WalletError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

/// Maps [`WalletError`] onto HTTP status codes and a `{message}` body.
#[derive(Debug)]
pub struct ApiError(pub WalletError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            WalletError::WalletNotFound(_) => StatusCode::NOT_FOUND,
            WalletError::InsufficientFunds { .. } | WalletError::WalletAlreadyExists(_) => {
                StatusCode::CONFLICT
            }
            WalletError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            WalletError::ConcurrencyExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message sent to the client. Internal failures are not described.
    pub fn client_message(&self) -> String {
        match self.status() {
            StatusCode::INTERNAL_SERVER_ERROR => "Internal server error".to_string(),
            StatusCode::SERVICE_UNAVAILABLE => {
                "Wallet is busy, please retry the request".to_string()
            }
            _ => self.0.to_string(),
        }
    }
}

impl From<WalletError> for ApiError {
    fn from(err: WalletError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(WalletError::InvalidInput(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, "Request failed");
        }

        let body = Json(ErrorResponse {
            message: self.client_message(),
        });
        let mut response = (status, body).into_response();
        if self.0.is_transient() {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from_static("1"));
        }
        response
    }
}
