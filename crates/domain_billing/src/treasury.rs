//! Custodial treasury
//!
//! Wraps the ledger with the fixed treasury chart. The custodial balance is
//! the balance of the Custody account:
//!
//! ```text
//! custody = premiums + deposits - claim payouts - owner withdrawals
//! ```
//!
//! The treasury records movements; it never decides whether one may happen.
//! Outflows are checked against the ledger before the settlement rail is
//! called and booked after it accepts, so custody can only go negative if a
//! rail pays out more than it was told is available.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use core_kernel::{AccountId, Currency, Identity, JournalEntryId, Money, PolicyId};

use crate::account::{Account, AccountRole};
use crate::error::TreasuryError;
use crate::ledger::{JournalEntry, Ledger, TrialBalance};
use crate::transaction::{Transaction, TreasuryTransactions};

/// Double-entry record of the custodial balance
#[derive(Debug, Clone)]
pub struct Treasury {
    ledger: Ledger,
    accounts: BTreeMap<AccountRole, AccountId>,
}

impl Treasury {
    /// Opens a treasury with the standard chart in the given currency
    pub fn new(currency: Currency) -> Result<Self, TreasuryError> {
        let mut ledger = Ledger::new(currency);
        let mut accounts = BTreeMap::new();

        for account in AccountRole::ALL.into_iter().map(Account::for_role) {
            accounts.insert(account.role, account.id);
            ledger.add_account(account)?;
        }

        Ok(Self { ledger, accounts })
    }

    /// Settlement currency
    pub fn currency(&self) -> Currency {
        self.ledger.currency()
    }

    /// Current custodial balance
    pub fn custodial_balance(&self) -> Money {
        self.balance_of(AccountRole::Custody)
    }

    /// Balance of one treasury account
    pub fn balance_of(&self, role: AccountRole) -> Money {
        self.accounts
            .get(&role)
            .and_then(|id| self.ledger.get_balance(id))
            .unwrap_or_else(|| Money::zero(self.currency()))
    }

    /// Books an accepted premium
    pub fn record_premium(
        &mut self,
        policy_id: PolicyId,
        amount: Money,
        at: DateTime<Utc>,
    ) -> Result<JournalEntryId, TreasuryError> {
        let tx = TreasuryTransactions::premium_receipt(
            self.account_id(AccountRole::Custody)?,
            self.account_id(AccountRole::PremiumIncome)?,
            amount,
            policy_id,
        );
        self.post(tx, at)
    }

    /// Books an unsolicited deposit
    pub fn record_deposit(
        &mut self,
        from: Identity,
        amount: Money,
        at: DateTime<Utc>,
    ) -> Result<JournalEntryId, TreasuryError> {
        let tx = TreasuryTransactions::deposit(
            self.account_id(AccountRole::Custody)?,
            self.account_id(AccountRole::OtherIncome)?,
            amount,
            from,
        );
        self.post(tx, at)
    }

    /// Books a claim payout the rail has settled
    pub fn record_claim_payout(
        &mut self,
        policy_id: PolicyId,
        amount: Money,
        at: DateTime<Utc>,
    ) -> Result<JournalEntryId, TreasuryError> {
        let tx = self.claim_payout_tx(policy_id, amount)?;
        self.post(tx, at)
    }

    /// Books a withdrawal of custody to the owner
    pub fn record_withdrawal(
        &mut self,
        owner: Identity,
        amount: Money,
        at: DateTime<Utc>,
    ) -> Result<JournalEntryId, TreasuryError> {
        let tx = self.withdrawal_tx(owner, amount)?;
        self.post(tx, at)
    }

    /// Fails exactly when `record_claim_payout` would, without booking anything
    ///
    /// Lets callers refuse an outflow before value leaves the rail.
    pub fn check_claim_payout(&self, policy_id: PolicyId, amount: Money) -> Result<(), TreasuryError> {
        self.ledger.check(&self.claim_payout_tx(policy_id, amount)?)
    }

    /// Fails exactly when `record_withdrawal` would, without booking anything
    pub fn check_withdrawal(&self, owner: Identity, amount: Money) -> Result<(), TreasuryError> {
        self.ledger.check(&self.withdrawal_tx(owner, amount)?)
    }

    /// Journal entries in posting order
    pub fn entries(&self) -> &[JournalEntry] {
        self.ledger.journal_entries()
    }

    pub fn trial_balance(&self) -> Result<TrialBalance, TreasuryError> {
        self.ledger.trial_balance()
    }

    fn account_id(&self, role: AccountRole) -> Result<AccountId, TreasuryError> {
        self.accounts
            .get(&role)
            .copied()
            .ok_or_else(|| TreasuryError::AccountNotFound(role.display_name().to_string()))
    }

    fn claim_payout_tx(&self, policy_id: PolicyId, amount: Money) -> Result<Transaction, TreasuryError> {
        Ok(TreasuryTransactions::claim_payout(
            self.account_id(AccountRole::ClaimsPaid)?,
            self.account_id(AccountRole::Custody)?,
            amount,
            policy_id,
        ))
    }

    fn withdrawal_tx(&self, owner: Identity, amount: Money) -> Result<Transaction, TreasuryError> {
        Ok(TreasuryTransactions::owner_withdrawal(
            self.account_id(AccountRole::OwnerDrawings)?,
            self.account_id(AccountRole::Custody)?,
            amount,
            owner,
        ))
    }

    fn post(&mut self, tx: Transaction, at: DateTime<Utc>) -> Result<JournalEntryId, TreasuryError> {
        let description = tx.description.clone();
        let entry_id = self.ledger.post(tx.dated(at))?;
        debug!(
            entry = %entry_id,
            description = %description,
            custody = %self.custodial_balance(),
            "Treasury entry posted"
        );
        Ok(entry_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn eth(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, Currency::ETH)
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_new_treasury_is_empty() {
        let treasury = Treasury::new(Currency::ETH).unwrap();
        assert!(treasury.custodial_balance().is_zero());
        assert!(treasury.entries().is_empty());
        assert!(AccountRole::ALL.iter().all(|role| treasury.balance_of(*role).is_zero()));
    }

    #[test]
    fn test_custody_tracks_inflows_and_outflows() {
        let mut treasury = Treasury::new(Currency::ETH).unwrap();

        treasury.record_deposit(Identity::new(), eth(dec!(5)), at()).unwrap();
        treasury.record_premium(PolicyId::FIRST, eth(dec!(0.03)), at()).unwrap();
        treasury.record_claim_payout(PolicyId::FIRST, eth(dec!(2)), at()).unwrap();

        assert_eq!(treasury.custodial_balance(), eth(dec!(3.03)));
        assert_eq!(treasury.balance_of(AccountRole::PremiumIncome), eth(dec!(0.03)));
        assert_eq!(treasury.balance_of(AccountRole::OtherIncome), eth(dec!(5)));
        assert_eq!(treasury.balance_of(AccountRole::ClaimsPaid), eth(dec!(2)));

        treasury.record_withdrawal(Identity::new(), eth(dec!(3.03)), at()).unwrap();
        assert!(treasury.custodial_balance().is_zero());
        assert!(treasury.trial_balance().unwrap().is_balanced);
    }

    #[test]
    fn test_entries_carry_call_time() {
        let mut treasury = Treasury::new(Currency::ETH).unwrap();
        treasury.record_deposit(Identity::new(), eth(dec!(1)), at()).unwrap();

        assert_eq!(treasury.entries()[0].transaction_date, at());
    }

    #[test]
    fn test_outflow_checks_match_posting() {
        let treasury = Treasury::new(Currency::ETH).unwrap();

        assert!(treasury.check_claim_payout(PolicyId::FIRST, eth(dec!(1))).is_ok());
        assert!(treasury.check_claim_payout(PolicyId::FIRST, Money::zero(Currency::ETH)).is_err());
        assert!(treasury
            .check_withdrawal(Identity::new(), Money::new(dec!(1), Currency::USD))
            .is_err());
        assert!(treasury.entries().is_empty());
    }

    #[test]
    fn test_claim_payout_check_catches_overflow() {
        let mut treasury = Treasury::new(Currency::ETH).unwrap();
        let max = eth(rust_decimal::Decimal::MAX);
        treasury.record_deposit(Identity::new(), max, at()).unwrap();
        treasury.record_claim_payout(PolicyId::FIRST, max, at()).unwrap();
        treasury.record_premium(PolicyId::FIRST, max, at()).unwrap();

        let result = treasury.check_claim_payout(PolicyId::FIRST, eth(dec!(1)));

        assert_eq!(result, Err(TreasuryError::Money(core_kernel::MoneyError::Overflow)));
        assert_eq!(treasury.balance_of(AccountRole::ClaimsPaid), max);
        assert_eq!(treasury.entries().len(), 3);
    }
}
