//! Owner administration
//!
//! One identity, fixed when the engine is built, may ban customers behind
//! delinquent policies, lift bans, and withdraw the custodial balance. The
//! authority is carried as an [`OwnerCapability`] value instead of a
//! hard-coded constant, so tests and deployments can pick their own owner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use core_kernel::{Identity, Money, PolicyId, TransferReceipt, TransferRequest, ValueTransfer};
use domain_billing::Treasury;
use domain_customer::CustomerRegistry;
use domain_policy::PolicyLedger;

use crate::error::EngineError;

/// Proof of who the owner is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerCapability {
    owner: Identity,
}

impl OwnerCapability {
    pub fn new(owner: Identity) -> Self {
        Self { owner }
    }

    pub fn identity(&self) -> Identity {
        self.owner
    }

    /// Fails with `Unauthorized` unless the caller is the owner
    pub fn authorize(&self, caller: &Identity) -> Result<(), EngineError> {
        if *caller != self.owner {
            return Err(EngineError::Unauthorized(caller.to_string()));
        }
        Ok(())
    }
}

/// Result of a withdrawal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawal {
    pub owner: Identity,
    pub amount: Money,
    /// None when there was nothing to withdraw
    pub receipt: Option<TransferReceipt>,
}

/// Owner-only operations over borrowed engine state
pub struct AdministrationGuard<'a> {
    capability: &'a OwnerCapability,
    customers: &'a mut CustomerRegistry,
    policies: &'a PolicyLedger,
    treasury: &'a mut Treasury,
    transfer: &'a mut dyn ValueTransfer,
}

impl<'a> AdministrationGuard<'a> {
    pub fn new(
        capability: &'a OwnerCapability,
        customers: &'a mut CustomerRegistry,
        policies: &'a PolicyLedger,
        treasury: &'a mut Treasury,
        transfer: &'a mut dyn ValueTransfer,
    ) -> Self {
        Self {
            capability,
            customers,
            policies,
            treasury,
            transfer,
        }
    }

    /// Bans the customer who owns a delinquent policy
    ///
    /// Delinquency is a full premium window since the last payment, or since
    /// creation if nothing was paid. The current ban state is not consulted,
    /// so repeating the call succeeds. The policy record is not touched.
    ///
    /// Returns the banned identity.
    pub fn ban(
        &mut self,
        caller: Identity,
        policy_id: PolicyId,
        now: DateTime<Utc>,
    ) -> Result<Identity, EngineError> {
        self.capability.authorize(&caller)?;

        let policy = self.policies.require(policy_id)?;
        if !policy.is_premium_window_open(now) {
            return Err(EngineError::TooSoon {
                policy_id: policy_id.to_string(),
                next_allowed: policy.premium_due_at(),
            });
        }

        let customer = policy.owner();
        self.customers.ban(&customer)?;
        info!(policy_id = %policy_id, customer = %customer, "Delinquent customer banned");
        Ok(customer)
    }

    /// Lifts a ban
    ///
    /// Unconditional: unknown or unbanned identities are accepted.
    pub fn unban(&mut self, caller: Identity, identity: Identity) -> Result<(), EngineError> {
        self.capability.authorize(&caller)?;
        self.customers.unban(&identity);
        Ok(())
    }

    /// Sends the whole custodial balance to the owner
    ///
    /// An empty pool withdraws nothing and succeeds.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` unless the caller is the owner
    /// - `TransferFailed` (fatal) if the rail refuses
    /// - `Accounting` (fatal) if the withdrawal could not be booked; checked before the rail is called
    pub fn withdraw(&mut self, caller: Identity, now: DateTime<Utc>) -> Result<Withdrawal, EngineError> {
        self.capability.authorize(&caller)?;

        let owner = self.capability.identity();
        let balance = self.treasury.custodial_balance();
        if !balance.is_positive() {
            info!(owner = %owner, balance = %balance, "Nothing to withdraw");
            return Ok(Withdrawal {
                owner,
                amount: Money::zero(self.treasury.currency()),
                receipt: None,
            });
        }

        self.treasury.check_withdrawal(owner, balance)?;
        let receipt = self.transfer.send(TransferRequest {
            to: owner,
            amount: balance,
            available: balance,
            memo: "owner withdrawal".to_string(),
        })?;
        self.treasury.record_withdrawal(owner, balance, now)?;

        info!(owner = %owner, amount = %balance, "Custodial balance withdrawn");
        Ok(Withdrawal {
            owner,
            amount: balance,
            receipt: Some(receipt),
        })
    }
}
