use crate::domain::operation::{OperationType, WalletOperation};
use crate::domain::wallet::{Amount, WalletBalance, WalletId};
use crate::error::{Result, WalletError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/wallet`.
///
/// Fields are optional here so that a missing field produces a precise `400`
/// message from [`WalletOperationRequest::validate`] instead of a generic
/// deserialization error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletOperationRequest {
    pub wallet_id: Option<WalletId>,
    pub operation_type: Option<String>,
    /// Decimal string (preferred) or JSON number.
    pub amount: Option<Decimal>,
}

impl WalletOperationRequest {
    pub fn validate(self) -> Result<WalletOperation> {
        let wallet_id = self.wallet_id.ok_or_else(|| invalid("walletId", "Wallet ID is required"))?;
        let operation_type: OperationType = self
            .operation_type
            .ok_or_else(|| invalid("operationType", "Operation type is required"))?
            .parse()?;
        let amount = self.amount.ok_or_else(|| invalid("amount", "Amount is required"))?;
        let amount = Amount::new(amount).map_err(|_| invalid("amount", "Amount must be positive"))?;

        Ok(WalletOperation {
            wallet_id,
            operation_type,
            amount,
        })
    }
}

fn invalid(field: &str, reason: &str) -> WalletError {
    WalletError::InvalidInput(format!("{field}: {reason}"))
}

/// Body of `POST /api/v1/wallets`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenWalletRequest {
    pub wallet_id: Option<WalletId>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalanceResponse {
    pub wallet_id: WalletId,
    /// Serialized as an exact decimal string.
    pub balance: Decimal,
}

impl From<WalletBalance> for WalletBalanceResponse {
    fn from(value: WalletBalance) -> Self {
        Self {
            wallet_id: value.wallet_id,
            balance: value.balance.value(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request(json: &str) -> WalletOperationRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_valid_request() {
        let op = request(
            r#"{"walletId":"123e4567-e89b-12d3-a456-426614174000","operationType":"withdraw","amount":"12.30"}"#,
        )
        .validate()
        .unwrap();

        assert_eq!(op.operation_type, OperationType::Withdraw);
        assert_eq!(op.amount.value(), dec!(12.30));
    }

    #[test]
    fn test_numeric_amount_is_accepted() {
        let op = request(
            r#"{"walletId":"123e4567-e89b-12d3-a456-426614174000","operationType":"DEPOSIT","amount":50}"#,
        )
        .validate()
        .unwrap();
        assert_eq!(op.amount.value(), dec!(50));
    }

    #[test]
    fn test_missing_fields_are_reported_by_name() {
        let err = request(r#"{"operationType":"DEPOSIT","amount":"1"}"#)
            .validate()
            .unwrap_err();
        assert_eq!(err.to_string(), "walletId: Wallet ID is required");

        let err = request(r#"{"walletId":"123e4567-e89b-12d3-a456-426614174000","amount":"1"}"#)
            .validate()
            .unwrap_err();
        assert_eq!(err.to_string(), "operationType: Operation type is required");

        let err = request(
            r#"{"walletId":"123e4567-e89b-12d3-a456-426614174000","operationType":"DEPOSIT"}"#,
        )
        .validate()
        .unwrap_err();
        assert_eq!(err.to_string(), "amount: Amount is required");
    }

    #[test]
    fn test_non_positive_amount() {
        let err = request(
            r#"{"walletId":"123e4567-e89b-12d3-a456-426614174000","operationType":"DEPOSIT","amount":"-10.00"}"#,
        )
        .validate()
        .unwrap_err();
        assert_eq!(err.to_string(), "amount: Amount must be positive");
    }

    #[test]
    fn test_balance_response_uses_decimal_string() {
        let response = WalletBalanceResponse {
            wallet_id: "123e4567-e89b-12d3-a456-426614174000".parse().unwrap(),
            balance: dec!(150.00),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["walletId"], "123e4567-e89b-12d3-a456-426614174000");
        assert_eq!(json["balance"], "150.00");
    }
}
