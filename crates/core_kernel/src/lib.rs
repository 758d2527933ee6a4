//! Core Kernel - Foundational types for the vehicle insurance engine
//!
//! This crate provides the building blocks shared by every domain crate:
//! - Money types with precise decimal arithmetic
//! - Caller identities and sequential policy ids
//! - Clocks and the engine's time arithmetic
//! - The port to the external value-transfer primitive

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use money::{Money, Currency, MoneyError};
pub use temporal::{Clock, SystemClock, ManualClock, TemporalError};
pub use identifiers::{Identity, PolicyId, AccountId, JournalEntryId, TransferId};
pub use ports::{ValueTransfer, TransferRequest, TransferReceipt, TransferError, SimulatedTransfer};
pub use error::CoreError;
