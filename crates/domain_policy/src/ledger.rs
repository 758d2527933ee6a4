//! Policy ledger
//!
//! Owns every policy record, the global policy counter, and the set of
//! plates that have ever been insured. Records are never removed.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use core_kernel::{Identity, PolicyId};
use domain_customer::CustomerRegistry;

use crate::error::PolicyError;
use crate::policy::{NewPolicy, Policy};

/// Ledger of all issued policies
#[derive(Debug, Clone)]
pub struct PolicyLedger {
    policies: BTreeMap<PolicyId, Policy>,
    /// Plates are locked for the lifetime of the ledger
    insured_plates: HashSet<String>,
    by_customer: HashMap<Identity, Vec<PolicyId>>,
    next_id: Option<PolicyId>,
}

impl Default for PolicyLedger {
    fn default() -> Self {
        Self {
            policies: BTreeMap::new(),
            insured_plates: HashSet::new(),
            by_customer: HashMap::new(),
            next_id: Some(PolicyId::FIRST),
        }
    }
}

impl PolicyLedger {
    /// Creates an empty ledger whose first policy will be `POL-1`
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a policy for the caller
    ///
    /// Plates are compared as exact strings.
    ///
    /// # Errors
    ///
    /// - `Customer(NotRegistered)` / `Customer(Banned)` if the caller is not eligible
    /// - `PlateAlreadyInsured` if the plate was ever insured before
    /// - `CounterExhausted` if no further id can be allocated
    pub fn create_insurance(
        &mut self,
        customers: &CustomerRegistry,
        caller: Identity,
        request: NewPolicy,
        now: DateTime<Utc>,
    ) -> Result<&Policy, PolicyError> {
        customers.ensure_eligible(&caller)?;

        if self.insured_plates.contains(&request.vehicle.plate) {
            return Err(PolicyError::PlateAlreadyInsured(request.vehicle.plate));
        }

        let id = self.next_id.ok_or(PolicyError::CounterExhausted)?;
        let policy = Policy::issue(id, caller, request, now);

        info!(
            policy_id = %id,
            customer = %caller,
            plate = %policy.plate(),
            plan = %policy.plan(),
            start_year = policy.start_year(),
            period_years = policy.period_years(),
            "Policy created"
        );

        self.next_id = id.next();
        self.insured_plates.insert(policy.plate().to_string());
        self.by_customer.entry(caller).or_default().push(id);
        let policy = self.policies.entry(id).or_insert(policy);
        Ok(&*policy)
    }

    /// Returns true if the plate has ever been insured
    pub fn has_been_registered(&self, plate: &str) -> bool {
        self.insured_plates.contains(plate)
    }

    /// Looks up a policy
    pub fn get(&self, id: PolicyId) -> Option<&Policy> {
        self.policies.get(&id)
    }

    /// Looks up a policy, failing with `PolicyNotFound`
    pub fn require(&self, id: PolicyId) -> Result<&Policy, PolicyError> {
        self.policies.get(&id).ok_or_else(|| PolicyError::not_found(id))
    }

    /// Policy ids opened by an identity, in creation order
    pub fn customer_policy_ids(&self, identity: &Identity) -> &[PolicyId] {
        self.by_customer
            .get(identity)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of policies ever created
    pub fn total_policies(&self) -> u64 {
        self.policies.len() as u64
    }

    /// Stamps a premium payment on the policy
    pub fn record_payment(&mut self, id: PolicyId, at: DateTime<Utc>) -> Result<(), PolicyError> {
        let policy = self
            .policies
            .get_mut(&id)
            .ok_or_else(|| PolicyError::not_found(id))?;

        policy.record_payment(at);
        debug!(policy_id = %id, paid_at = %at, "Premium stamped");
        Ok(())
    }

    /// Marks the policy claimed and runs the payout
    ///
    /// The claimed flag is set before `payout` runs and cleared again if it
    /// fails, so the policy is never observed claimed by a failed call and a
    /// second claim during the payout sees `AlreadyClaimed`.
    ///
    /// # Errors
    ///
    /// - `PolicyNotFound` / `AlreadyClaimed` before the payout runs
    /// - whatever `payout` returns
    pub fn settle_claim<T, E, F>(&mut self, id: PolicyId, payout: F) -> Result<T, E>
    where
        E: From<PolicyError>,
        F: FnOnce(&Policy) -> Result<T, E>,
    {
        let policy = self
            .policies
            .get_mut(&id)
            .ok_or_else(|| PolicyError::not_found(id))?;

        if policy.is_claimed() {
            return Err(PolicyError::AlreadyClaimed(id.to_string()).into());
        }

        policy.set_claimed(true);

        match payout(&*policy) {
            Ok(value) => {
                info!(policy_id = %id, "Policy claimed");
                Ok(value)
            }
            Err(err) => {
                policy.set_claimed(false);
                debug!(policy_id = %id, "Claim payout failed, claimed flag restored");
                Err(err)
            }
        }
    }
}
