//! Customer domain errors

use thiserror::Error;

/// Errors that can occur in the customer domain
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CustomerError {
    /// The identity already has a customer record
    #[error("Customer already registered: {0}")]
    AlreadyRegistered(String),

    /// The identity has no customer record
    #[error("Customer not registered: {0}")]
    NotRegistered(String),

    /// The customer is banned from creating policies and claiming
    #[error("Customer is banned: {0}")]
    Banned(String),
}

impl CustomerError {
    /// Creates a NotRegistered error from any identity type
    pub fn not_registered(identity: impl std::fmt::Display) -> Self {
        CustomerError::NotRegistered(identity.to_string())
    }
}
