//! Policy Domain
//!
//! Coverage plans, vehicle policies and the ledger that issues them.
//!
//! # Policy Lifecycle
//!
//! ```text
//! create_insurance -> open --(record_payment)*--> open
//!                          \--(settle_claim)----> claimed
//! ```
//!
//! A policy is never deleted, and its plate stays locked forever. Policy ids
//! come from one global counter starting at 1.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_policy::{NewPolicy, Plan, PolicyLedger, Vehicle};
//!
//! let mut ledger = PolicyLedger::new();
//! let policy = ledger.create_insurance(&customers, caller, NewPolicy {
//!     vehicle,
//!     period_years: 1,
//!     plan: Plan::Comprehensive,
//! }, now)?;
//! ```

pub mod error;
pub mod ledger;
pub mod plan;
pub mod policy;

pub use error::PolicyError;
pub use ledger::PolicyLedger;
pub use plan::Plan;
pub use policy::{NewPolicy, Policy, Vehicle};
