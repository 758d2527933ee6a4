//! Settlement domain errors
//!
//! [`EngineError`] is the one failure type the engine facade returns. Every
//! variant aborts the call with no state retained; [`Severity`] only says
//! whether the failure is an ordinary validation rejection or a condition
//! that should never happen under correct use.

use chrono::{DateTime, Utc};
use thiserror::Error;

use core_kernel::{MoneyError, TransferError};
use domain_billing::TreasuryError;
use domain_customer::CustomerError;
use domain_policy::PolicyError;

/// Failure classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Caller error; resubmitting with different input may succeed
    Recoverable,
    /// Invariant failure
    Fatal,
}

/// Errors surfaced by engine operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Customer already registered: {0}")]
    AlreadyRegistered(String),

    #[error("Customer not registered: {0}")]
    NotRegistered(String),

    #[error("Customer is banned: {0}")]
    Banned(String),

    #[error("Plate already insured: {0}")]
    PlateAlreadyInsured(String),

    #[error("Invalid plan: {0}")]
    InvalidPlan(String),

    #[error("Policy not found: {0}")]
    PolicyNotFound(String),

    #[error("Caller {caller} does not own policy {policy_id}")]
    InvalidCaller { policy_id: String, caller: String },

    #[error("Too soon for {policy_id}: next allowed at {next_allowed}")]
    TooSoon {
        policy_id: String,
        next_allowed: DateTime<Utc>,
    },

    #[error("Wrong premium amount: expected {expected}, attached {attached}")]
    WrongAmount { expected: String, attached: String },

    #[error("Policy already claimed: {0}")]
    AlreadyClaimed(String),

    #[error("Missing claim field: {0}")]
    MissingFields(&'static str),

    #[error("Coverage of {policy_id} ended in {coverage_end_year}, current year is {current_year}")]
    PeriodExpired {
        policy_id: String,
        coverage_end_year: u32,
        current_year: u32,
    },

    #[error("Claim of {requested} exceeds maximum payout {max_payout}")]
    ExceedsMaxPayout { requested: String, max_payout: String },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Transfer failed: {0}")]
    TransferFailed(#[from] TransferError),

    #[error("Caller is not the owner: {0}")]
    Unauthorized(String),

    #[error("Policy counter exhausted")]
    CounterExhausted,

    #[error("Accounting fault: {0}")]
    Accounting(#[from] TreasuryError),
}

impl EngineError {
    /// Classifies the failure
    pub fn severity(&self) -> Severity {
        match self {
            EngineError::WrongAmount { .. }
            | EngineError::TransferFailed(_)
            | EngineError::CounterExhausted
            | EngineError::Accounting(_) => Severity::Fatal,
            _ => Severity::Recoverable,
        }
    }

    /// Returns true for invariant failures
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }

    /// Stable machine-readable reason
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::AlreadyRegistered(_) => "ALREADY_REGISTERED",
            EngineError::NotRegistered(_) => "NOT_REGISTERED",
            EngineError::Banned(_) => "BANNED",
            EngineError::PlateAlreadyInsured(_) => "PLATE_ALREADY_INSURED",
            EngineError::InvalidPlan(_) => "INVALID_PLAN",
            EngineError::PolicyNotFound(_) => "POLICY_NOT_FOUND",
            EngineError::InvalidCaller { .. } => "INVALID_CALLER",
            EngineError::TooSoon { .. } => "TOO_SOON",
            EngineError::WrongAmount { .. } => "WRONG_AMOUNT",
            EngineError::AlreadyClaimed(_) => "ALREADY_CLAIMED",
            EngineError::MissingFields(_) => "MISSING_FIELDS",
            EngineError::PeriodExpired { .. } => "PERIOD_EXPIRED",
            EngineError::ExceedsMaxPayout { .. } => "EXCEEDS_MAX_PAYOUT",
            EngineError::InvalidAmount(_) => "INVALID_AMOUNT",
            EngineError::TransferFailed(_) => "TRANSFER_FAILED",
            EngineError::Unauthorized(_) => "UNAUTHORIZED",
            EngineError::CounterExhausted => "COUNTER_EXHAUSTED",
            EngineError::Accounting(_) => "ACCOUNTING_FAULT",
        }
    }
}

impl From<CustomerError> for EngineError {
    fn from(err: CustomerError) -> Self {
        match err {
            CustomerError::AlreadyRegistered(id) => EngineError::AlreadyRegistered(id),
            CustomerError::NotRegistered(id) => EngineError::NotRegistered(id),
            CustomerError::Banned(id) => EngineError::Banned(id),
        }
    }
}

impl From<PolicyError> for EngineError {
    fn from(err: PolicyError) -> Self {
        match err {
            PolicyError::Customer(inner) => inner.into(),
            PolicyError::PlateAlreadyInsured(plate) => EngineError::PlateAlreadyInsured(plate),
            PolicyError::InvalidPlan(plan) => EngineError::InvalidPlan(plan),
            PolicyError::PolicyNotFound(id) => EngineError::PolicyNotFound(id),
            PolicyError::AlreadyClaimed(id) => EngineError::AlreadyClaimed(id),
            PolicyError::CounterExhausted => EngineError::CounterExhausted,
        }
    }
}

impl From<MoneyError> for EngineError {
    fn from(err: MoneyError) -> Self {
        EngineError::InvalidAmount(err.to_string())
    }
}
