//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults, so
//! tests only spell out the fields they care about. [`EngineHarness`] wires
//! an engine to a manual clock and the simulated settlement rail.

use std::sync::Arc;

use core_kernel::{Currency, Identity, ManualClock, Money, PolicyId, SimulatedTransfer};
use domain_customer::CustomerProfile;
use domain_policy::{NewPolicy, Plan, Vehicle};
use domain_settlement::{ClaimRequest, EngineError, InsuranceEngine, OwnerCapability};

use crate::fixtures::{IdentityFixtures, MoneyFixtures, StringFixtures, TemporalFixtures};

/// Builder for registration details
#[derive(Debug, Clone)]
pub struct CustomerProfileBuilder {
    profile: CustomerProfile,
}

impl Default for CustomerProfileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerProfileBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            profile: CustomerProfile {
                name: "Jane Wambui".to_string(),
                national_id: "22334455".to_string(),
                nationality: "Kenyan".to_string(),
                phone_number: "+254 700 123456".to_string(),
                birth_year: 1990,
                married: false,
            },
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.profile.name = name.into();
        self
    }

    pub fn national_id(mut self, national_id: impl Into<String>) -> Self {
        self.profile.national_id = national_id.into();
        self
    }

    pub fn birth_year(mut self, birth_year: u32) -> Self {
        self.profile.birth_year = birth_year;
        self
    }

    pub fn married(mut self, married: bool) -> Self {
        self.profile.married = married;
        self
    }

    pub fn build(self) -> CustomerProfile {
        self.profile
    }
}

/// Builder for policy requests
#[derive(Debug, Clone)]
pub struct NewPolicyBuilder {
    vehicle: Vehicle,
    period_years: u32,
    plan: Plan,
}

impl Default for NewPolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NewPolicyBuilder {
    /// Comprehensive, one year, on the fixture plate
    pub fn new() -> Self {
        Self {
            vehicle: Vehicle {
                plate: StringFixtures::plate().to_string(),
                brand: "Toyota".to_string(),
                engine_capacity: 1800,
                registration_year: 2019,
                electric: false,
            },
            period_years: 1,
            plan: Plan::Comprehensive,
        }
    }

    pub fn plate(mut self, plate: impl Into<String>) -> Self {
        self.vehicle.plate = plate.into();
        self
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.vehicle.brand = brand.into();
        self
    }

    pub fn electric(mut self) -> Self {
        self.vehicle.electric = true;
        self
    }

    pub fn period_years(mut self, period_years: u32) -> Self {
        self.period_years = period_years;
        self
    }

    pub fn plan(mut self, plan: Plan) -> Self {
        self.plan = plan;
        self
    }

    pub fn build(self) -> NewPolicy {
        NewPolicy {
            vehicle: self.vehicle,
            period_years: self.period_years,
            plan: self.plan,
        }
    }
}

/// Builder for claim details
#[derive(Debug, Clone)]
pub struct ClaimRequestBuilder {
    request: ClaimRequest,
}

impl Default for ClaimRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimRequestBuilder {
    pub fn new() -> Self {
        Self {
            request: ClaimRequest {
                estimated_damage: MoneyFixtures::eth_small_damage(),
                accident_date: StringFixtures::accident_date().to_string(),
                document_url: StringFixtures::document_url().to_string(),
            },
        }
    }

    pub fn damage(mut self, damage: Money) -> Self {
        self.request.estimated_damage = damage;
        self
    }

    pub fn accident_date(mut self, date: impl Into<String>) -> Self {
        self.request.accident_date = date.into();
        self
    }

    pub fn document_url(mut self, url: impl Into<String>) -> Self {
        self.request.document_url = url.into();
        self
    }

    pub fn build(self) -> ClaimRequest {
        self.request
    }
}

/// An engine on a manual clock with the fixture owner
pub struct EngineHarness {
    pub engine: InsuranceEngine<SimulatedTransfer>,
    pub clock: Arc<ManualClock>,
    pub owner: Identity,
}

impl Default for EngineHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineHarness {
    /// An empty ETH engine starting at the genesis fixture
    pub fn new() -> Self {
        let clock = Arc::new(ManualClock::starting_at(TemporalFixtures::genesis()));
        let owner = IdentityFixtures::owner();
        let engine = InsuranceEngine::new(
            OwnerCapability::new(owner),
            Currency::ETH,
            clock.clone(),
            SimulatedTransfer::new(Currency::ETH),
        )
        .expect("treasury chart is valid");

        Self { engine, clock, owner }
    }

    /// An engine whose pool already holds the fixture deposit
    pub fn funded() -> Self {
        let mut harness = Self::new();
        harness
            .engine
            .receive(Identity::new(), MoneyFixtures::eth_pool())
            .expect("deposit accepted");
        harness
    }

    /// Registers a fresh identity with the default profile
    pub fn customer(&mut self) -> Identity {
        let identity = Identity::new();
        self.engine
            .register(identity, CustomerProfileBuilder::new().build())
            .expect("fresh identity registers");
        identity
    }

    /// Opens a policy and returns its id
    pub fn insure(&mut self, caller: Identity, request: NewPolicy) -> Result<PolicyId, EngineError> {
        self.engine.create_insurance(caller, request).map(|p| p.id())
    }

    /// Pays the plan premium for a policy
    pub fn pay_premium(&mut self, caller: Identity, policy_id: PolicyId) -> Result<(), EngineError> {
        let plan = self
            .engine
            .get_policy(policy_id)
            .map(|p| p.plan())
            .ok_or_else(|| EngineError::PolicyNotFound(policy_id.to_string()))?;
        let premium = plan.monthly_premium(self.engine.currency());
        self.engine.pay_monthly_premium(caller, policy_id, premium).map(|_| ())
    }

    pub fn advance_days(&self, days: i64) {
        self.clock.advance_days(days);
    }

    /// Total paid out to an identity by the rail
    pub fn received_by(&self, identity: &Identity) -> Money {
        self.engine.transfer().received_by(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_customer_can_insure() {
        let mut harness = EngineHarness::new();
        let alice = harness.customer();

        let id = harness.insure(alice, NewPolicyBuilder::new().build()).unwrap();

        assert_eq!(id, PolicyId::FIRST);
        assert!(harness.engine.has_been_registered(StringFixtures::plate()));
    }

    #[test]
    fn test_harness_pays_premium_after_window() {
        let mut harness = EngineHarness::new();
        let alice = harness.customer();
        let id = harness.insure(alice, NewPolicyBuilder::new().plan(Plan::ThirdPartyOnly).build()).unwrap();

        assert!(harness.pay_premium(alice, id).is_err());
        harness.advance_days(30);
        assert!(harness.pay_premium(alice, id).is_ok());
    }
}
