//! Insurance engine facade
//!
//! Owns all engine state and exposes every public operation as a method
//! taking the caller identity. Each call reads the clock once, runs to
//! completion, and either commits all of its effects or none.
//!
//! ```text
//!              ┌─────────────────────┐
//!  caller ───▶ │   InsuranceEngine   │ ──▶ events
//!              └─────────────────────┘
//!                 │        │       │
//!     ┌───────────┘        │       └──────────────┐
//!     ▼                    ▼                      ▼
//! CustomerRegistry    PolicyLedger     Treasury + ValueTransfer
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use core_kernel::{Clock, Currency, Identity, Money, PolicyId, ValueTransfer};
use domain_billing::{Treasury, TreasuryError};
use domain_customer::{Customer, CustomerProfile, CustomerRegistry};
use domain_policy::{NewPolicy, Policy, PolicyLedger};

use crate::admin::{AdministrationGuard, OwnerCapability, Withdrawal};
use crate::error::EngineError;
use crate::events::EngineEvent;
use crate::settlement::{ClaimRequest, ClaimSettlement, PremiumPayment, SettlementEngine};

/// The vehicle insurance engine
pub struct InsuranceEngine<T: ValueTransfer> {
    customers: CustomerRegistry,
    policies: PolicyLedger,
    treasury: Treasury,
    owner: OwnerCapability,
    transfer: T,
    clock: Arc<dyn Clock>,
    events: Vec<EngineEvent>,
}

impl<T: ValueTransfer> InsuranceEngine<T> {
    /// Builds an empty engine
    ///
    /// The owner is fixed for the engine's lifetime.
    pub fn new(
        owner: OwnerCapability,
        currency: Currency,
        clock: Arc<dyn Clock>,
        transfer: T,
    ) -> Result<Self, EngineError> {
        info!(owner = %owner.identity(), currency = %currency, "Insurance engine initialized");

        Ok(Self {
            customers: CustomerRegistry::new(),
            policies: PolicyLedger::new(),
            treasury: Treasury::new(currency)?,
            owner,
            transfer,
            clock,
            events: Vec::new(),
        })
    }

    // ------------------------------------------------------------------
    // Customer operations
    // ------------------------------------------------------------------

    /// Registers the caller
    pub fn register(&mut self, caller: Identity, profile: CustomerProfile) -> Result<Customer, EngineError> {
        let now = self.clock.now();
        let result = self
            .customers
            .register(caller, profile, now)
            .map(Customer::clone)
            .map_err(EngineError::from);
        let customer = rejected("register", &caller, result)?;

        self.events.push(EngineEvent::CustomerRegistered {
            identity: caller,
            timestamp: now,
        });
        Ok(customer)
    }

    /// Opens a policy for the caller
    pub fn create_insurance(&mut self, caller: Identity, request: NewPolicy) -> Result<Policy, EngineError> {
        let now = self.clock.now();
        let result = self
            .policies
            .create_insurance(&self.customers, caller, request, now)
            .map(Policy::clone)
            .map_err(EngineError::from);
        let policy = rejected("create_insurance", &caller, result)?;

        self.events.push(EngineEvent::PolicyCreated {
            policy_id: policy.id(),
            owner: caller,
            plate: policy.plate().to_string(),
            plan: policy.plan(),
            timestamp: now,
        });
        Ok(policy)
    }

    // ------------------------------------------------------------------
    // Settlement operations
    // ------------------------------------------------------------------

    /// Pays one monthly premium with the attached value
    pub fn pay_monthly_premium(
        &mut self,
        caller: Identity,
        policy_id: PolicyId,
        attached: Money,
    ) -> Result<PremiumPayment, EngineError> {
        let now = self.clock.now();
        let result = SettlementEngine::new(
            &self.customers,
            &mut self.policies,
            &mut self.treasury,
            &mut self.transfer,
        )
        .pay_monthly_premium(caller, policy_id, attached, now);
        let payment = rejected("pay_monthly_premium", &caller, result)?;

        self.events.push(EngineEvent::PremiumPaid {
            policy_id,
            amount: payment.amount,
            timestamp: now,
        });
        Ok(payment)
    }

    /// Claims the policy's single payout
    pub fn claim_insurance(
        &mut self,
        caller: Identity,
        policy_id: PolicyId,
        claim: ClaimRequest,
    ) -> Result<ClaimSettlement, EngineError> {
        let now = self.clock.now();
        let result = SettlementEngine::new(
            &self.customers,
            &mut self.policies,
            &mut self.treasury,
            &mut self.transfer,
        )
        .claim_insurance(caller, policy_id, claim, now);
        let settlement = rejected("claim_insurance", &caller, result)?;

        self.events.push(EngineEvent::ClaimSettled {
            policy_id,
            beneficiary: settlement.beneficiary,
            amount: settlement.amount,
            timestamp: now,
        });
        Ok(settlement)
    }

    /// Accepts unsolicited value into the custodial balance
    ///
    /// A zero amount is accepted and records nothing. Returns the new
    /// custodial balance.
    pub fn receive(&mut self, from: Identity, amount: Money) -> Result<Money, EngineError> {
        let now = self.clock.now();

        if amount.is_zero() && amount.currency() == self.treasury.currency() {
            return Ok(self.treasury.custodial_balance());
        }

        let result = self
            .treasury
            .record_deposit(from, amount, now)
            .map_err(|err| match err {
                TreasuryError::InvalidPosting(msg) => EngineError::InvalidAmount(msg),
                TreasuryError::Money(err) => err.into(),
                other => other.into(),
            });
        rejected("receive", &from, result)?;

        info!(from = %from, amount = %amount, "Deposit received");
        self.events.push(EngineEvent::DepositReceived {
            from,
            amount,
            timestamp: now,
        });
        Ok(self.treasury.custodial_balance())
    }

    // ------------------------------------------------------------------
    // Owner operations
    // ------------------------------------------------------------------

    /// Bans the owner of a delinquent policy
    pub fn ban(&mut self, caller: Identity, policy_id: PolicyId) -> Result<Identity, EngineError> {
        let now = self.clock.now();
        let result = self.guard().ban(caller, policy_id, now);
        let banned = rejected("ban", &caller, result)?;

        self.events.push(EngineEvent::CustomerBanned {
            identity: banned,
            policy_id,
            timestamp: now,
        });
        Ok(banned)
    }

    /// Lifts a ban
    pub fn unban(&mut self, caller: Identity, identity: Identity) -> Result<(), EngineError> {
        let now = self.clock.now();
        let result = self.guard().unban(caller, identity);
        rejected("unban", &caller, result)?;

        self.events.push(EngineEvent::CustomerUnbanned {
            identity,
            timestamp: now,
        });
        Ok(())
    }

    /// Sends the custodial balance to the owner
    pub fn withdraw(&mut self, caller: Identity) -> Result<Withdrawal, EngineError> {
        let now = self.clock.now();
        let result = self.guard().withdraw(caller, now);
        let withdrawal = rejected("withdraw", &caller, result)?;

        if withdrawal.receipt.is_some() {
            self.events.push(EngineEvent::FundsWithdrawn {
                owner: withdrawal.owner,
                amount: withdrawal.amount,
                timestamp: now,
            });
        }
        Ok(withdrawal)
    }

    fn guard(&mut self) -> AdministrationGuard<'_> {
        AdministrationGuard::new(
            &self.owner,
            &mut self.customers,
            &self.policies,
            &mut self.treasury,
            &mut self.transfer,
        )
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Returns true if the plate was ever insured
    pub fn has_been_registered(&self, plate: &str) -> bool {
        self.policies.has_been_registered(plate)
    }

    pub fn get_policy(&self, policy_id: PolicyId) -> Option<&Policy> {
        debug!(policy_id = %policy_id, "Policy lookup");
        self.policies.get(policy_id)
    }

    /// Policy ids opened by an identity, oldest first
    pub fn customer_policy_ids(&self, identity: &Identity) -> &[PolicyId] {
        self.policies.customer_policy_ids(identity)
    }

    pub fn customer_information(&self, identity: &Identity) -> Option<&Customer> {
        self.customers.get(identity)
    }

    pub fn total_policies(&self) -> u64 {
        self.policies.total_policies()
    }

    pub fn is_banned(&self, identity: &Identity) -> bool {
        self.customers.is_banned(identity)
    }

    /// The fixed owner identity
    pub fn owner(&self) -> Identity {
        self.owner.identity()
    }

    pub fn custodial_balance(&self) -> Money {
        self.treasury.custodial_balance()
    }

    pub fn currency(&self) -> Currency {
        self.treasury.currency()
    }

    pub fn treasury(&self) -> &Treasury {
        &self.treasury
    }

    /// Current time as the engine sees it
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// The settlement rail
    pub fn transfer(&self) -> &T {
        &self.transfer
    }

    pub fn transfer_mut(&mut self) -> &mut T {
        &mut self.transfer
    }

    /// Drains events from committed calls
    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Logs a rejected call and passes the result through
fn rejected<R>(operation: &'static str, caller: &Identity, result: Result<R, EngineError>) -> Result<R, EngineError> {
    if let Err(err) = &result {
        if err.is_fatal() {
            warn!(operation, caller = %caller, code = err.code(), error = %err, fatal = true, "Call aborted");
        } else {
            warn!(operation, caller = %caller, code = err.code(), error = %err, "Call rejected");
        }
    }
    result
}
