//! Vehicle policy record
//!
//! A policy covers one vehicle for a whole number of years under one plan.
//! After creation only two fields ever change: the last-paid timestamp
//! (premium payments) and the claimed flag (a single payout).
//!
//! # Invariants
//!
//! - `claimed` goes from false to true at most once
//! - `start_year` is derived from the creation time with the legacy year
//!   arithmetic and never changes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::temporal::{legacy_year, premium_window, window_elapsed};
use core_kernel::{Identity, PolicyId};

use crate::plan::Plan;

/// The insured vehicle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Registration plate, the vehicle's unique key
    pub plate: String,
    /// Manufacturer
    pub brand: String,
    /// Engine capacity in cc
    pub engine_capacity: u32,
    /// Year the vehicle was first registered
    pub registration_year: u32,
    /// Battery electric vehicle
    pub electric: bool,
}

/// Everything a caller supplies to open a policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPolicy {
    pub vehicle: Vehicle,
    /// Coverage duration in years
    pub period_years: u32,
    pub plan: Plan,
}

/// An issued policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    id: PolicyId,
    owner: Identity,
    vehicle: Vehicle,
    plan: Plan,
    start_year: u32,
    period_years: u32,
    created_at: DateTime<Utc>,
    /// None until the first premium is accepted
    last_paid: Option<DateTime<Utc>>,
    claimed: bool,
}

impl Policy {
    pub(crate) fn issue(id: PolicyId, owner: Identity, request: NewPolicy, now: DateTime<Utc>) -> Self {
        Self {
            id,
            owner,
            vehicle: request.vehicle,
            plan: request.plan,
            start_year: legacy_year(now),
            period_years: request.period_years,
            created_at: now,
            last_paid: None,
            claimed: false,
        }
    }

    /// Returns the policy ID
    pub fn id(&self) -> PolicyId {
        self.id
    }

    /// Returns the owning identity
    pub fn owner(&self) -> Identity {
        self.owner
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn plate(&self) -> &str {
        &self.vehicle.plate
    }

    pub fn plan(&self) -> Plan {
        self.plan
    }

    pub fn start_year(&self) -> u32 {
        self.start_year
    }

    pub fn period_years(&self) -> u32 {
        self.period_years
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_paid(&self) -> Option<DateTime<Utc>> {
        self.last_paid
    }

    pub fn is_claimed(&self) -> bool {
        self.claimed
    }

    /// Returns true if `identity` owns this policy
    pub fn is_owned_by(&self, identity: &Identity) -> bool {
        self.owner == *identity
    }

    /// Last legacy year still covered
    pub fn coverage_end_year(&self) -> u32 {
        self.start_year.saturating_add(self.period_years)
    }

    /// Coarse yearly check: the year is covered while it does not pass the end year
    pub fn covers_year(&self, year: u32) -> bool {
        self.coverage_end_year() >= year
    }

    /// Start of the current premium window
    ///
    /// The last payment, or the creation time if nothing has been paid yet.
    pub fn premium_anchor(&self) -> DateTime<Utc> {
        self.last_paid.unwrap_or(self.created_at)
    }

    /// Earliest instant the next premium is accepted, and the instant the
    /// policy becomes delinquent if nothing is paid
    pub fn premium_due_at(&self) -> DateTime<Utc> {
        self.premium_anchor() + premium_window()
    }

    /// Returns true once a full premium window has passed without payment
    pub fn is_premium_window_open(&self, now: DateTime<Utc>) -> bool {
        window_elapsed(self.premium_anchor(), now)
    }

    pub(crate) fn record_payment(&mut self, at: DateTime<Utc>) {
        self.last_paid = Some(at);
    }

    pub(crate) fn set_claimed(&mut self, claimed: bool) {
        self.claimed = claimed;
    }
}
