//! Transaction and posting types
//!
//! This module defines the structure of the journal transactions the
//! treasury records for every movement of custodial value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::{AccountId, Identity, Money, PolicyId};

/// Type of posting (debit or credit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostingType {
    /// Debit posting
    Debit,
    /// Credit posting
    Credit,
}

/// A single posting (line item) in a transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Posting {
    /// Unique posting identifier
    pub id: Uuid,
    /// Account to post to
    pub account_id: AccountId,
    /// Amount (always positive)
    pub amount: Money,
    /// Debit or credit
    pub posting_type: PostingType,
}

impl Posting {
    /// Creates a new debit posting
    pub fn debit(account_id: AccountId, amount: Money) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            amount,
            posting_type: PostingType::Debit,
        }
    }

    /// Creates a new credit posting
    pub fn credit(account_id: AccountId, amount: Money) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            amount,
            posting_type: PostingType::Credit,
        }
    }
}

/// What a journal entry is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reference {
    Policy { policy_id: PolicyId },
    Counterparty { identity: Identity },
}

/// A financial transaction consisting of multiple postings
///
/// Transactions must always balance: total debits = total credits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction description
    pub description: String,
    /// Transaction date
    pub transaction_date: Option<DateTime<Utc>>,
    pub reference: Option<Reference>,
    /// List of postings
    pub postings: Vec<Posting>,
}

impl Transaction {
    /// Creates a new transaction
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            transaction_date: None,
            reference: None,
            postings: Vec::new(),
        }
    }

    /// Sets the transaction date
    pub fn dated(mut self, date: DateTime<Utc>) -> Self {
        self.transaction_date = Some(date);
        self
    }

    /// Sets the reference
    pub fn with_reference(mut self, reference: Reference) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Adds a debit posting
    pub fn debit(mut self, account_id: AccountId, amount: Money) -> Self {
        self.postings.push(Posting::debit(account_id, amount));
        self
    }

    /// Adds a credit posting
    pub fn credit(mut self, account_id: AccountId, amount: Money) -> Self {
        self.postings.push(Posting::credit(account_id, amount));
        self
    }
}

/// Builders for the treasury's four kinds of movement
pub struct TreasuryTransactions;

impl TreasuryTransactions {
    /// Premium accepted into custody
    pub fn premium_receipt(
        custody: AccountId,
        premium_income: AccountId,
        amount: Money,
        policy_id: PolicyId,
    ) -> Transaction {
        Transaction::new(format!("Monthly premium for {}", policy_id))
            .with_reference(Reference::Policy { policy_id })
            .debit(custody, amount)
            .credit(premium_income, amount)
    }

    /// Unsolicited value received into custody
    pub fn deposit(
        custody: AccountId,
        other_income: AccountId,
        amount: Money,
        from: Identity,
    ) -> Transaction {
        Transaction::new("Deposit received")
            .with_reference(Reference::Counterparty { identity: from })
            .debit(custody, amount)
            .credit(other_income, amount)
    }

    /// Claim paid out of custody
    pub fn claim_payout(
        claims_paid: AccountId,
        custody: AccountId,
        amount: Money,
        policy_id: PolicyId,
    ) -> Transaction {
        Transaction::new(format!("Claim payout for {}", policy_id))
            .with_reference(Reference::Policy { policy_id })
            .debit(claims_paid, amount)
            .credit(custody, amount)
    }

    /// Custody drained to the owner
    pub fn owner_withdrawal(
        owner_drawings: AccountId,
        custody: AccountId,
        amount: Money,
        owner: Identity,
    ) -> Transaction {
        Transaction::new("Owner withdrawal")
            .with_reference(Reference::Counterparty { identity: owner })
            .debit(owner_drawings, amount)
            .credit(custody, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    #[test]
    fn test_builders_move_one_amount_from_credit_to_debit() {
        let a = AccountId::new();
        let b = AccountId::new();
        let amount = Money::new(dec!(0.03), Currency::ETH);

        for tx in [
            TreasuryTransactions::premium_receipt(a, b, amount, PolicyId::FIRST),
            TreasuryTransactions::deposit(a, b, amount, Identity::new()),
            TreasuryTransactions::claim_payout(a, b, amount, PolicyId::FIRST),
            TreasuryTransactions::owner_withdrawal(a, b, amount, Identity::new()),
        ] {
            assert_eq!(tx.postings.len(), 2, "{}", tx.description);
            assert_eq!(tx.postings[0].posting_type, PostingType::Debit);
            assert_eq!(tx.postings[0].account_id, a);
            assert_eq!(tx.postings[1].posting_type, PostingType::Credit);
            assert_eq!(tx.postings[1].account_id, b);
            assert!(tx.postings.iter().all(|p| p.amount == amount));
            assert!(tx.reference.is_some());
        }
    }
}
