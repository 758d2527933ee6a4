//! Treasury errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::MoneyError;

/// Errors that can occur while posting to the treasury
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreasuryError {
    /// Account not found
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Account already exists
    #[error("Account already exists: {0}")]
    AccountAlreadyExists(String),

    /// Transaction is not balanced
    #[error("Unbalanced transaction: debits={debits}, credits={credits}")]
    UnbalancedTransaction {
        debits: Decimal,
        credits: Decimal,
    },

    /// Transaction has no postings
    #[error("Transaction has no postings: {0}")]
    EmptyTransaction(String),

    /// Posting amount is zero or negative
    #[error("Invalid posting: {0}")]
    InvalidPosting(String),

    /// Arithmetic or currency failure
    #[error("Calculation error: {0}")]
    Money(#[from] MoneyError),
}
