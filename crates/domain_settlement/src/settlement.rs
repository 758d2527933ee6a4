//! Premium collection and claim settlement
//!
//! [`SettlementEngine`] borrows the state it needs for a single call. Checks
//! run before any mutation, so a rejected call leaves every ledger as it
//! was. The one exception is the claimed flag, which is committed before the
//! payout and restored if the payout fails.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use core_kernel::temporal::legacy_year;
use core_kernel::{Identity, Money, PolicyId, TransferReceipt, TransferRequest, ValueTransfer};
use domain_billing::Treasury;
use domain_customer::CustomerRegistry;
use domain_policy::{Policy, PolicyLedger};

use crate::error::EngineError;

/// Claim details supplied by the policy owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRequest {
    /// Amount requested, paid out in full or not at all
    pub estimated_damage: Money,
    /// Free-form accident date as reported
    pub accident_date: String,
    /// Location of the supporting documents
    pub document_url: String,
}

impl ClaimRequest {
    /// Rejects empty text fields and non-positive damage
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.accident_date.is_empty() {
            return Err(EngineError::MissingFields("accident_date"));
        }
        if self.document_url.is_empty() {
            return Err(EngineError::MissingFields("document_url"));
        }
        if !self.estimated_damage.is_positive() {
            return Err(EngineError::MissingFields("estimated_damage"));
        }
        Ok(())
    }
}

/// An accepted premium
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumPayment {
    pub policy_id: PolicyId,
    pub amount: Money,
    pub paid_at: DateTime<Utc>,
    /// Earliest instant the next premium is accepted
    pub next_due: DateTime<Utc>,
}

/// A paid claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSettlement {
    pub policy_id: PolicyId,
    pub beneficiary: Identity,
    pub amount: Money,
    pub receipt: TransferReceipt,
}

/// Premium and claim operations over borrowed engine state
pub struct SettlementEngine<'a> {
    customers: &'a CustomerRegistry,
    policies: &'a mut PolicyLedger,
    treasury: &'a mut Treasury,
    transfer: &'a mut dyn ValueTransfer,
}

impl<'a> SettlementEngine<'a> {
    pub fn new(
        customers: &'a CustomerRegistry,
        policies: &'a mut PolicyLedger,
        treasury: &'a mut Treasury,
        transfer: &'a mut dyn ValueTransfer,
    ) -> Self {
        Self {
            customers,
            policies,
            treasury,
            transfer,
        }
    }

    /// Accepts one monthly premium
    ///
    /// Ban status is not consulted.
    ///
    /// # Errors
    ///
    /// - `PolicyNotFound` for an unknown id
    /// - `InvalidCaller` if the caller does not own the policy
    /// - `TooSoon` inside the 30-day window since the last payment, or since
    ///   creation if nothing was paid yet
    /// - `WrongAmount` (fatal) unless `attached` equals the plan premium exactly
    pub fn pay_monthly_premium(
        &mut self,
        caller: Identity,
        policy_id: PolicyId,
        attached: Money,
        now: DateTime<Utc>,
    ) -> Result<PremiumPayment, EngineError> {
        let policy = self.policies.require(policy_id)?;
        ensure_owner(policy, &caller)?;

        if !policy.is_premium_window_open(now) {
            return Err(EngineError::TooSoon {
                policy_id: policy_id.to_string(),
                next_allowed: policy.premium_due_at(),
            });
        }

        let expected = policy.plan().monthly_premium(self.treasury.currency());
        if attached != expected {
            return Err(EngineError::WrongAmount {
                expected: expected.to_string(),
                attached: attached.to_string(),
            });
        }

        self.treasury.record_premium(policy_id, attached, now)?;
        self.policies.record_payment(policy_id, now)?;

        let next_due = self.policies.require(policy_id)?.premium_due_at();
        info!(policy_id = %policy_id, amount = %attached, next_due = %next_due, "Premium accepted");

        Ok(PremiumPayment {
            policy_id,
            amount: attached,
            paid_at: now,
            next_due,
        })
    }

    /// Pays a claim to the policy owner
    ///
    /// Checks run in this order: ban, ownership, already claimed, fields,
    /// coverage year. The payout cap is checked once the policy is marked
    /// claimed, so exceeding it also rolls the flag back.
    ///
    /// # Errors
    ///
    /// - `Banned`, `PolicyNotFound`, `InvalidCaller`, `AlreadyClaimed`,
    ///   `MissingFields`, `PeriodExpired`, `ExceedsMaxPayout`
    /// - `TransferFailed` (fatal) if the rail refuses the payout
    pub fn claim_insurance(
        &mut self,
        caller: Identity,
        policy_id: PolicyId,
        claim: ClaimRequest,
        now: DateTime<Utc>,
    ) -> Result<ClaimSettlement, EngineError> {
        if self.customers.is_banned(&caller) {
            return Err(EngineError::Banned(caller.to_string()));
        }

        let policy = self.policies.require(policy_id)?;
        ensure_owner(policy, &caller)?;

        if policy.is_claimed() {
            return Err(EngineError::AlreadyClaimed(policy_id.to_string()));
        }

        claim.validate()?;

        let current_year = legacy_year(now);
        if !policy.covers_year(current_year) {
            return Err(EngineError::PeriodExpired {
                policy_id: policy_id.to_string(),
                coverage_end_year: policy.coverage_end_year(),
                current_year,
            });
        }

        let Self {
            policies,
            treasury,
            transfer,
            ..
        } = self;
        let damage = claim.estimated_damage;

        policies.settle_claim(policy_id, |policy: &Policy| {
            let max_payout = policy.plan().max_payout(treasury.currency());
            if damage.exceeds(&max_payout)? {
                return Err(EngineError::ExceedsMaxPayout {
                    requested: damage.to_string(),
                    max_payout: max_payout.to_string(),
                });
            }

            treasury.check_claim_payout(policy.id(), damage)?;

            let request = TransferRequest {
                to: policy.owner(),
                amount: damage,
                available: treasury.custodial_balance(),
                memo: format!("claim {}", policy.id()),
            };
            debug!(policy_id = %policy.id(), amount = %damage, available = %request.available, "Requesting claim payout");
            let receipt = transfer.send(request)?;

            treasury.record_claim_payout(policy.id(), damage, now)?;
            info!(policy_id = %policy.id(), beneficiary = %policy.owner(), amount = %damage, "Claim settled");

            Ok(ClaimSettlement {
                policy_id: policy.id(),
                beneficiary: policy.owner(),
                amount: damage,
                receipt,
            })
        })
    }
}

fn ensure_owner(policy: &Policy, caller: &Identity) -> Result<(), EngineError> {
    if !policy.is_owned_by(caller) {
        return Err(EngineError::InvalidCaller {
            policy_id: policy.id().to_string(),
            caller: caller.to_string(),
        });
    }
    Ok(())
}
