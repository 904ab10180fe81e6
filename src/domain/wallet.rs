use crate::error::{Result, WalletError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque, immutable wallet identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletId(Uuid);

impl WalletId {
    /// Generates a fresh random (v4) identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for WalletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for WalletId {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| WalletError::InvalidInput(format!("Invalid wallet ID: {s}")))
    }
}

/// Represents a monetary value held by a wallet.
///
/// A wrapper around `rust_decimal::Decimal` that can never be negative. Decoding
/// a persisted negative balance fails instead of producing an invalid wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Balance(Decimal);

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self> {
        if value < Decimal::ZERO {
            Err(WalletError::InvalidInput(
                "Balance cannot be negative".to_string(),
            ))
        } else {
            Ok(Self(value))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Adds `amount`. Fails if the sum overflows or would have to be rounded.
    pub fn credit(self, amount: Amount) -> Result<Self> {
        let sum = self
            .0
            .checked_add(amount.value())
            .ok_or_else(|| WalletError::InvalidInput("amount: Amount is too large".to_string()))?;
        exact(sum, self.0, amount.value()).map(Self)
    }

    /// Subtracts `amount`, or returns `None` if that would go below zero.
    /// A difference that would have to be rounded is an error.
    pub fn debit(self, amount: Amount) -> Result<Option<Self>> {
        if self.0 < amount.value() {
            return Ok(None);
        }
        let difference = self.0.checked_sub(amount.value()).ok_or_else(inexact)?;
        exact(self.0, difference, amount.value()).map(|_| Some(Self(difference)))
    }
}

/// `Decimal` rounds silently once a result needs more than 28 significant
/// digits. Accepts `sum` only if it is exactly `a + b`.
fn exact(sum: Decimal, a: Decimal, b: Decimal) -> Result<Decimal> {
    if sum.checked_sub(b) == Some(a) && sum.checked_sub(a) == Some(b) {
        Ok(sum)
    } else {
        Err(inexact())
    }
}

fn inexact() -> WalletError {
    WalletError::InvalidInput("amount: Amount cannot be applied exactly".to_string())
}

impl TryFrom<Decimal> for Balance {
    type Error = WalletError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Balance> for Decimal {
    fn from(balance: Balance) -> Self {
        balance.0
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Represents a positive monetary amount for a deposit or withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(WalletError::InvalidInput(
                "Amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = WalletError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// Optimistic-locking version of a wallet record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    pub const INITIAL: Self = Self(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A versioned wallet record as held by a [`WalletStore`](super::ports::WalletStore).
///
/// A `Wallet` read from a store is a consistent snapshot. The mutating methods
/// return a *candidate* that still carries the snapshot's version; the store
/// bumps the version when it commits the candidate.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Wallet {
    pub id: WalletId,
    pub balance: Balance,
    pub version: Version,
}

impl Wallet {
    /// A brand-new, empty wallet.
    pub fn open(id: WalletId) -> Self {
        Self {
            id,
            balance: Balance::ZERO,
            version: Version::INITIAL,
        }
    }

    pub fn deposit(&self, amount: Amount) -> Result<Wallet> {
        Ok(Wallet {
            balance: self.balance.credit(amount)?,
            ..self.clone()
        })
    }

    pub fn withdraw(&self, amount: Amount) -> Result<Wallet> {
        let balance =
            self.balance
                .debit(amount)?
                .ok_or_else(|| WalletError::InsufficientFunds {
                    wallet_id: self.id,
                    available: self.balance.value(),
                    requested: amount.value(),
                })?;
        Ok(Wallet {
            balance,
            ..self.clone()
        })
    }

    /// The record as it looks once a store has committed this candidate.
    pub fn committed(&self) -> Wallet {
        Wallet {
            version: self.version.next(),
            ..self.clone()
        }
    }
}

/// The `(walletId, balance)` pair handed back by every wallet operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletBalance {
    pub wallet_id: WalletId,
    pub balance: Balance,
}

impl From<&Wallet> for WalletBalance {
    fn from(wallet: &Wallet) -> Self {
        Self {
            wallet_id: wallet.id,
            balance: wallet.balance,
        }
    }
}
