//! Wallet domain model and the storage port the application layer depends on.

pub mod operation;
pub mod ports;
pub mod wallet;
