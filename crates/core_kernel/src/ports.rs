//! Value-transfer port
//!
//! The engine decides how much value leaves the custodial pool and to whom;
//! actually moving it is the job of an external settlement rail. This module
//! defines the port the engine talks to and an in-process adapter.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │        InsuranceEngine        │
//! │  (claims payout, withdrawal)  │
//! └──────────────────────────────┘
//!                │ TransferRequest
//!                ▼
//! ┌──────────────────────────────┐
//! │      ValueTransfer (port)     │
//! └──────────────────────────────┘
//!        ▲                  ▲
//!        │                  │
//!  SimulatedTransfer   on-chain / bank rail
//! ```
//!
//! The engine never checks that the pool can cover a payout. It passes the
//! balance it believes it holds as `available` and lets the rail refuse.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identifiers::{Identity, TransferId};
use crate::money::{Currency, Money, MoneyError};

/// Error type for value transfers
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransferError {
    /// The pool cannot cover the requested amount
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: String,
        available: String,
    },

    /// The recipient refused or could not accept the value
    #[error("Transfer rejected: {reason}")]
    Rejected {
        reason: String,
    },

    /// Amount was not representable on the rail
    #[error("Invalid transfer amount: {0}")]
    InvalidAmount(#[from] MoneyError),

    /// The rail itself is down
    #[error("Settlement rail unavailable: {rail}")]
    Unavailable {
        rail: String,
    },
}

impl TransferError {
    /// Creates a Rejected error
    pub fn rejected(reason: impl Into<String>) -> Self {
        TransferError::Rejected {
            reason: reason.into(),
        }
    }
}

/// A request to move value out of the custodial pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Recipient identity
    pub to: Identity,
    /// Exact amount to send
    pub amount: Money,
    /// Custodial balance at the moment of the request
    pub available: Money,
    /// Free-form memo for audit trails (e.g. "claim POL-3")
    pub memo: String,
}

/// Proof that a transfer completed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub id: TransferId,
    pub to: Identity,
    pub amount: Money,
    pub settled_at: DateTime<Utc>,
}

/// Port to the external value-transfer primitive
///
/// Implementations must either move exactly `request.amount` to `request.to`
/// and return a receipt, or move nothing and return an error.
pub trait ValueTransfer: Send {
    /// Sends value out of the custodial pool
    fn send(&mut self, request: TransferRequest) -> Result<TransferReceipt, TransferError>;
}

impl<T: ValueTransfer + ?Sized> ValueTransfer for Box<T> {
    fn send(&mut self, request: TransferRequest) -> Result<TransferReceipt, TransferError> {
        (**self).send(request)
    }
}

/// In-process settlement rail
///
/// Refuses any transfer larger than the available pool, can be switched into a
/// rejecting mode, and keeps a running total of what each identity received.
#[derive(Debug)]
pub struct SimulatedTransfer {
    currency: Currency,
    received: HashMap<Identity, Money>,
    receipts: Vec<TransferReceipt>,
    reject_reason: Option<String>,
}

impl SimulatedTransfer {
    /// Creates a rail settling in the given currency
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            received: HashMap::new(),
            receipts: Vec::new(),
            reject_reason: None,
        }
    }

    /// Makes every subsequent transfer fail with the given reason
    pub fn reject_all(&mut self, reason: impl Into<String>) {
        self.reject_reason = Some(reason.into());
    }

    /// Total value delivered to an identity so far
    pub fn received_by(&self, identity: &Identity) -> Money {
        self.received
            .get(identity)
            .copied()
            .unwrap_or_else(|| Money::zero(self.currency))
    }

    /// All completed transfers in settlement order
    pub fn receipts(&self) -> &[TransferReceipt] {
        &self.receipts
    }
}

impl ValueTransfer for SimulatedTransfer {
    fn send(&mut self, request: TransferRequest) -> Result<TransferReceipt, TransferError> {
        if let Some(reason) = &self.reject_reason {
            return Err(TransferError::rejected(reason.clone()));
        }

        if request.amount.exceeds(&request.available)? {
            return Err(TransferError::InsufficientFunds {
                requested: request.amount.to_string(),
                available: request.available.to_string(),
            });
        }

        let running = self.received_by(&request.to).checked_add(&request.amount)?;
        self.received.insert(request.to, running);

        let receipt = TransferReceipt {
            id: TransferId::new_v7(),
            to: request.to,
            amount: request.amount,
            settled_at: Utc::now(),
        };
        self.receipts.push(receipt.clone());

        tracing::debug!(
            to = %request.to,
            amount = %request.amount,
            memo = %request.memo,
            "Simulated transfer settled"
        );

        Ok(receipt)
    }
}
