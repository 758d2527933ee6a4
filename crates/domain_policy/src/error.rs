//! Policy domain errors
//!
//! This module defines all error types that can occur within the
//! policy ledger.

use thiserror::Error;

use domain_customer::CustomerError;

/// Errors that can occur in the policy domain
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// Caller failed the customer eligibility check
    #[error(transparent)]
    Customer(#[from] CustomerError),

    /// The plate has been insured before
    #[error("Plate already insured: {0}")]
    PlateAlreadyInsured(String),

    /// Plan code or name does not name a plan
    #[error("Invalid plan: {0}")]
    InvalidPlan(String),

    /// No policy with this id exists
    #[error("Policy not found: {0}")]
    PolicyNotFound(String),

    /// The policy has already paid out its claim
    #[error("Policy already claimed: {0}")]
    AlreadyClaimed(String),

    /// The global policy counter cannot advance
    #[error("Policy counter exhausted")]
    CounterExhausted,
}

impl PolicyError {
    /// Creates a policy not found error
    pub fn not_found(policy_id: impl std::fmt::Display) -> Self {
        PolicyError::PolicyNotFound(policy_id.to_string())
    }

    /// Creates an invalid plan error
    pub fn invalid_plan(plan: impl std::fmt::Display) -> Self {
        PolicyError::InvalidPlan(plan.to_string())
    }
}
