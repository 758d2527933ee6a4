//! Treasury chart of accounts
//!
//! The treasury keeps five accounts. Custody is the only asset and its
//! balance is the custodial balance; the others record where value came
//! from or went to.

use serde::{Deserialize, Serialize};

use core_kernel::AccountId;

/// Types of accounts in the chart of accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    /// Asset accounts (debit normal balance)
    Asset,
    /// Equity accounts (credit normal balance)
    Equity,
    /// Revenue accounts (credit normal balance)
    Revenue,
    /// Expense accounts (debit normal balance)
    Expense,
}

impl AccountType {
    /// Returns true if this account type has a debit normal balance
    pub fn is_debit_normal(&self) -> bool {
        matches!(self, AccountType::Asset | AccountType::Expense)
    }
}

/// The role an account plays in the treasury
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    /// Value held on behalf of the system
    Custody,
    /// Accepted monthly premiums
    PremiumIncome,
    /// Unsolicited deposits
    OtherIncome,
    /// Claim payouts
    ClaimsPaid,
    /// Owner withdrawals
    OwnerDrawings,
}

impl AccountRole {
    /// Every role, in chart order
    pub const ALL: [AccountRole; 5] = [
        AccountRole::Custody,
        AccountRole::PremiumIncome,
        AccountRole::OtherIncome,
        AccountRole::ClaimsPaid,
        AccountRole::OwnerDrawings,
    ];

    pub fn account_type(&self) -> AccountType {
        match self {
            AccountRole::Custody => AccountType::Asset,
            AccountRole::PremiumIncome | AccountRole::OtherIncome => AccountType::Revenue,
            AccountRole::ClaimsPaid => AccountType::Expense,
            AccountRole::OwnerDrawings => AccountType::Equity,
        }
    }

    /// Chart code
    pub fn code(&self) -> &'static str {
        match self {
            AccountRole::Custody => "1000",
            AccountRole::OwnerDrawings => "3100",
            AccountRole::PremiumIncome => "4000",
            AccountRole::OtherIncome => "4900",
            AccountRole::ClaimsPaid => "5000",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AccountRole::Custody => "Custody",
            AccountRole::PremiumIncome => "Premium Income",
            AccountRole::OtherIncome => "Other Income",
            AccountRole::ClaimsPaid => "Claims Paid",
            AccountRole::OwnerDrawings => "Owner Drawings",
        }
    }
}

/// An account in the chart of accounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,
    /// Account code (e.g., "1000")
    pub code: String,
    /// Account name
    pub name: String,
    /// Account type
    pub account_type: AccountType,
    /// Treasury role
    pub role: AccountRole,
}

impl Account {
    /// Creates the account for a treasury role
    pub fn for_role(role: AccountRole) -> Self {
        Self {
            id: AccountId::new(),
            code: role.code().to_string(),
            name: role.display_name().to_string(),
            account_type: role.account_type(),
            role,
        }
    }
}
