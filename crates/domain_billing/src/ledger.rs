//! Double-entry ledger implementation
//!
//! This module provides the core ledger functionality, ensuring that
//! all transactions are balanced and maintain financial integrity.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{AccountId, Currency, JournalEntryId, Money};

use crate::account::{Account, AccountType};
use crate::error::TreasuryError;
use crate::transaction::{Posting, PostingType, Reference, Transaction};

/// The ledger behind the treasury
///
/// # Invariants
///
/// - All transactions must balance to zero
/// - Account balances are always consistent with postings
/// - A rejected transaction changes no balance and adds no entry
/// - Historical entries are never modified
#[derive(Debug, Clone)]
pub struct Ledger {
    /// Chart of accounts
    accounts: HashMap<AccountId, Account>,
    /// Journal entries in posting order
    journal_entries: Vec<JournalEntry>,
    /// Running account balances
    balances: HashMap<AccountId, Money>,
    currency: Currency,
}

impl Ledger {
    /// Creates an empty ledger in the given currency
    pub fn new(currency: Currency) -> Self {
        Self {
            accounts: HashMap::new(),
            journal_entries: Vec::new(),
            balances: HashMap::new(),
            currency,
        }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Adds an account to the chart of accounts
    ///
    /// # Errors
    ///
    /// Returns error if account already exists
    pub fn add_account(&mut self, account: Account) -> Result<(), TreasuryError> {
        if self.accounts.contains_key(&account.id) {
            return Err(TreasuryError::AccountAlreadyExists(account.id.to_string()));
        }

        let account_id = account.id;
        self.accounts.insert(account_id, account);
        self.balances.insert(account_id, Money::zero(self.currency));

        Ok(())
    }

    /// Gets the current balance of an account
    pub fn get_balance(&self, id: &AccountId) -> Option<Money> {
        self.balances.get(id).copied()
    }

    /// All journal entries in posting order
    pub fn journal_entries(&self) -> &[JournalEntry] {
        &self.journal_entries
    }

    /// Posts a transaction to the ledger
    ///
    /// New balances are computed in full before any is written, so a failing
    /// posting leaves the ledger exactly as it was.
    ///
    /// # Errors
    ///
    /// - `EmptyTransaction` if there are no postings
    /// - `InvalidPosting` if an amount is not strictly positive
    /// - `AccountNotFound` if any referenced account doesn't exist
    /// - `UnbalancedTransaction` if debits and credits differ
    /// - `Money` on currency mismatch or overflow
    pub fn post(&mut self, transaction: Transaction) -> Result<JournalEntryId, TreasuryError> {
        let staged = self.stage(&transaction)?;

        let entry_id = JournalEntryId::new_v7();
        let now = Utc::now();

        self.balances.extend(staged);
        self.journal_entries.push(JournalEntry {
            id: entry_id,
            transaction_date: transaction.transaction_date.unwrap_or(now),
            description: transaction.description,
            reference: transaction.reference,
            postings: transaction.postings,
            created_at: now,
        });

        Ok(entry_id)
    }

    /// Runs every check `post` runs without committing anything
    pub fn check(&self, transaction: &Transaction) -> Result<(), TreasuryError> {
        self.stage(transaction).map(|_| ())
    }

    /// Computes the balances a transaction would leave behind
    fn stage(&self, transaction: &Transaction) -> Result<HashMap<AccountId, Money>, TreasuryError> {
        if transaction.postings.is_empty() {
            return Err(TreasuryError::EmptyTransaction(transaction.description.clone()));
        }

        self.validate_balance(transaction)?;

        let mut staged: HashMap<AccountId, Money> = HashMap::new();
        for posting in &transaction.postings {
            let account = self
                .accounts
                .get(&posting.account_id)
                .ok_or_else(|| TreasuryError::AccountNotFound(posting.account_id.to_string()))?;

            let current = match staged.get(&posting.account_id) {
                Some(balance) => *balance,
                None => self
                    .balances
                    .get(&posting.account_id)
                    .copied()
                    .unwrap_or_else(|| Money::zero(self.currency)),
            };

            let change = balance_change(account.account_type, posting.posting_type, posting.amount);
            staged.insert(posting.account_id, current.checked_add(&change)?);
        }

        Ok(staged)
    }

    /// Validates that a transaction is balanced (debits = credits)
    fn validate_balance(&self, transaction: &Transaction) -> Result<(), TreasuryError> {
        let mut total_debits = Money::zero(self.currency);
        let mut total_credits = Money::zero(self.currency);

        for posting in &transaction.postings {
            if !posting.amount.is_positive() {
                return Err(TreasuryError::InvalidPosting(format!(
                    "{} on {}",
                    posting.amount, posting.account_id
                )));
            }

            match posting.posting_type {
                PostingType::Debit => total_debits = total_debits.checked_add(&posting.amount)?,
                PostingType::Credit => total_credits = total_credits.checked_add(&posting.amount)?,
            }
        }

        if total_debits != total_credits {
            return Err(TreasuryError::UnbalancedTransaction {
                debits: total_debits.amount(),
                credits: total_credits.amount(),
            });
        }

        Ok(())
    }

    /// Generates a trial balance report
    pub fn trial_balance(&self) -> Result<TrialBalance, TreasuryError> {
        let mut entries = Vec::new();
        let mut total_debits = Money::zero(self.currency);
        let mut total_credits = Money::zero(self.currency);

        for (account_id, account) in &self.accounts {
            let balance = self
                .balances
                .get(account_id)
                .copied()
                .unwrap_or_else(|| Money::zero(self.currency));

            if balance.is_zero() {
                continue;
            }

            // A negative balance sits on the side opposite the account's normal side
            let debit_side = account.account_type.is_debit_normal() != balance.is_negative();
            let (debit, credit) = if debit_side {
                (balance.abs(), Money::zero(self.currency))
            } else {
                (Money::zero(self.currency), balance.abs())
            };

            total_debits = total_debits.checked_add(&debit)?;
            total_credits = total_credits.checked_add(&credit)?;
            entries.push(TrialBalanceEntry {
                account_id: *account_id,
                account_name: account.name.clone(),
                debit,
                credit,
            });
        }

        entries.sort_by(|a, b| a.account_name.cmp(&b.account_name));

        Ok(TrialBalance {
            entries,
            total_debits,
            total_credits,
            is_balanced: total_debits == total_credits,
        })
    }
}

/// Calculates the balance change for a posting
///
/// - Asset & Expense accounts: Debits increase, Credits decrease
/// - Equity & Revenue accounts: Credits increase, Debits decrease
fn balance_change(account_type: AccountType, posting_type: PostingType, amount: Money) -> Money {
    match (account_type.is_debit_normal(), posting_type) {
        (true, PostingType::Debit) | (false, PostingType::Credit) => amount,
        (true, PostingType::Credit) | (false, PostingType::Debit) => -amount,
    }
}

/// A journal entry in the ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique entry identifier
    pub id: JournalEntryId,
    /// Transaction date
    pub transaction_date: DateTime<Utc>,
    /// Description
    pub description: String,
    pub reference: Option<Reference>,
    /// Individual postings
    pub postings: Vec<Posting>,
    /// When entry was created
    pub created_at: DateTime<Utc>,
}

/// Trial balance report
#[derive(Debug)]
pub struct TrialBalance {
    /// Individual account entries, by account name
    pub entries: Vec<TrialBalanceEntry>,
    /// Total debits
    pub total_debits: Money,
    /// Total credits
    pub total_credits: Money,
    /// Whether the trial balance is balanced
    pub is_balanced: bool,
}

/// A single entry in the trial balance
#[derive(Debug)]
pub struct TrialBalanceEntry {
    /// Account ID
    pub account_id: AccountId,
    /// Account name
    pub account_name: String,
    /// Debit balance
    pub debit: Money,
    /// Credit balance
    pub credit: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::AccountRole;
    use rust_decimal_macros::dec;

    fn setup_ledger() -> (Ledger, AccountId, AccountId) {
        let mut ledger = Ledger::new(Currency::ETH);
        let custody = Account::for_role(AccountRole::Custody);
        let income = Account::for_role(AccountRole::PremiumIncome);
        let (custody_id, income_id) = (custody.id, income.id);
        ledger.add_account(custody).unwrap();
        ledger.add_account(income).unwrap();
        (ledger, custody_id, income_id)
    }

    fn eth(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, Currency::ETH)
    }

    #[test]
    fn test_balanced_transaction() {
        let (mut ledger, custody, income) = setup_ledger();

        let transaction = Transaction::new("Premium payment")
            .debit(custody, eth(dec!(0.01)))
            .credit(income, eth(dec!(0.01)));

        assert!(ledger.post(transaction).is_ok());
        assert_eq!(ledger.get_balance(&custody), Some(eth(dec!(0.01))));
        assert_eq!(ledger.get_balance(&income), Some(eth(dec!(0.01))));
    }

    #[test]
    fn test_unbalanced_transaction() {
        let (mut ledger, custody, income) = setup_ledger();

        let transaction = Transaction::new("Unbalanced")
            .debit(custody, eth(dec!(1)))
            .credit(income, eth(dec!(0.5)));

        let result = ledger.post(transaction);
        assert!(matches!(result, Err(TreasuryError::UnbalancedTransaction { .. })));
        assert!(ledger.journal_entries().is_empty());
    }

    #[test]
    fn test_unknown_account_leaves_balances_untouched() {
        let (mut ledger, custody, _) = setup_ledger();

        let transaction = Transaction::new("Stray")
            .debit(custody, eth(dec!(1)))
            .credit(AccountId::new(), eth(dec!(1)));

        assert!(matches!(ledger.post(transaction), Err(TreasuryError::AccountNotFound(_))));
        assert_eq!(ledger.get_balance(&custody), Some(Money::zero(Currency::ETH)));
    }

    #[test]
    fn test_currency_mismatch_rejected() {
        let (mut ledger, custody, income) = setup_ledger();

        let usd = Money::new(dec!(1), Currency::USD);
        let transaction = Transaction::new("Wrong currency").debit(custody, usd).credit(income, usd);

        assert!(matches!(ledger.post(transaction), Err(TreasuryError::Money(_))));
    }

    #[test]
    fn test_trial_balance_balances() {
        let (mut ledger, custody, income) = setup_ledger();
        ledger
            .post(Transaction::new("p").debit(custody, eth(dec!(2))).credit(income, eth(dec!(2))))
            .unwrap();

        let trial = ledger.trial_balance().unwrap();
        assert!(trial.is_balanced);
        assert_eq!(trial.total_debits, eth(dec!(2)));
        assert_eq!(trial.entries.len(), 2);
    }

    #[test]
    fn test_check_does_not_commit() {
        let (mut ledger, custody, income) = setup_ledger();
        let transaction = Transaction::new("p").debit(custody, eth(dec!(1))).credit(income, eth(dec!(1)));

        assert!(ledger.check(&transaction).is_ok());
        assert_eq!(ledger.get_balance(&custody), Some(Money::zero(Currency::ETH)));
        assert!(ledger.journal_entries().is_empty());

        ledger.post(transaction).unwrap();
        assert_eq!(ledger.get_balance(&custody), Some(eth(dec!(1))));
    }

    #[test]
    fn test_check_reports_balance_overflow() {
        let (mut ledger, custody, income) = setup_ledger();
        let max = eth(rust_decimal::Decimal::MAX);
        ledger
            .post(Transaction::new("fill").debit(custody, max).credit(income, max))
            .unwrap();

        let more = Transaction::new("more").debit(custody, eth(dec!(1))).credit(income, eth(dec!(1)));

        assert_eq!(ledger.check(&more), Err(TreasuryError::Money(core_kernel::MoneyError::Overflow)));
        assert_eq!(ledger.get_balance(&custody), Some(max));
        assert_eq!(ledger.journal_entries().len(), 1);
    }
}
