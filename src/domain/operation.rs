use super::wallet::{Amount, WalletId};
use crate::error::WalletError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperationType {
    Deposit,
    Withdraw,
}

impl OperationType {
    pub const ALL: [OperationType; 2] = [OperationType::Deposit, OperationType::Withdraw];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Deposit => "DEPOSIT",
            OperationType::Withdraw => "WITHDRAW",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses an operation type, ignoring ASCII case.
impl FromStr for OperationType {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                WalletError::InvalidInput(format!(
                    "Invalid operation type: {s}. Allowed: DEPOSIT, WITHDRAW"
                ))
            })
    }
}

/// A validated balance-mutation command.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct WalletOperation {
    pub wallet_id: WalletId,
    pub operation_type: OperationType,
    pub amount: Amount,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_type_is_case_insensitive() {
        assert_eq!(
            "deposit".parse::<OperationType>().unwrap(),
            OperationType::Deposit
        );
        assert_eq!(
            "Withdraw".parse::<OperationType>().unwrap(),
            OperationType::Withdraw
        );
    }

    #[test]
    fn test_unknown_operation_type() {
        let err = "TRANSFER".parse::<OperationType>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid operation type: TRANSFER. Allowed: DEPOSIT, WITHDRAW"
        );
    }

    #[test]
    fn test_operation_type_is_not_trimmed() {
        assert!(" DEPOSIT ".parse::<OperationType>().is_err());
        assert!("WITHDRAW\n".parse::<OperationType>().is_err());
    }

    #[test]
    fn test_operation_type_serializes_upper_case() {
        assert_eq!(
            serde_json::to_string(&OperationType::Withdraw).unwrap(),
            "\"WITHDRAW\""
        );
    }
}
