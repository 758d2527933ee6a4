//! Billing Domain - Custodial Treasury
//!
//! Every movement of value into or out of the custodial pool is recorded as a
//! balanced double-entry transaction. The pool itself is the balance of the
//! Custody asset account.
//!
//! # Movements
//!
//! | Movement | Debit | Credit |
//! |---|---|---|
//! | premium | Custody | Premium Income |
//! | deposit | Custody | Other Income |
//! | claim payout | Claims Paid | Custody |
//! | owner withdrawal | Owner Drawings | Custody |
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_billing::Treasury;
//!
//! let mut treasury = Treasury::new(Currency::ETH)?;
//! treasury.record_premium(policy_id, premium, now)?;
//! assert_eq!(treasury.custodial_balance(), premium);
//! ```

pub mod account;
pub mod error;
pub mod ledger;
pub mod transaction;
pub mod treasury;

pub use account::{Account, AccountRole, AccountType};
pub use error::TreasuryError;
pub use ledger::{JournalEntry, Ledger, TrialBalance, TrialBalanceEntry};
pub use transaction::{Posting, PostingType, Reference, Transaction};
pub use treasury::Treasury;
