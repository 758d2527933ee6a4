//! Policy DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, PolicyId};
use domain_policy::{NewPolicy, Plan, Policy, PolicyError, Vehicle};

/// A plan given either by numeric code or by name
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlanInput {
    Code(u8),
    Name(String),
}

impl PlanInput {
    pub fn resolve(&self) -> Result<Plan, PolicyError> {
        match self {
            PlanInput::Code(code) => Plan::from_code(*code),
            PlanInput::Name(name) => name.parse(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePolicyRequest {
    pub plate: String,
    pub brand: String,
    pub engine_capacity: u32,
    pub registration_year: u32,
    #[serde(default)]
    pub electric: bool,
    pub period_years: u32,
    pub plan: PlanInput,
}

impl CreatePolicyRequest {
    /// Converts to the engine request, resolving the plan
    pub fn into_new_policy(self) -> Result<NewPolicy, PolicyError> {
        let plan = self.plan.resolve()?;
        Ok(NewPolicy {
            vehicle: Vehicle {
                plate: self.plate,
                brand: self.brand,
                engine_capacity: self.engine_capacity,
                registration_year: self.registration_year,
                electric: self.electric,
            },
            period_years: self.period_years,
            plan,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PolicyResponse {
    pub id: PolicyId,
    pub reference: String,
    pub owner: String,
    pub plate: String,
    pub brand: String,
    pub engine_capacity: u32,
    pub registration_year: u32,
    pub electric: bool,
    pub plan: Plan,
    pub plan_code: u8,
    pub monthly_premium: Decimal,
    pub max_payout: Decimal,
    pub currency: String,
    pub start_year: u32,
    pub period_years: u32,
    pub coverage_end_year: u32,
    pub created_at: DateTime<Utc>,
    pub last_paid: Option<DateTime<Utc>>,
    pub premium_due_at: DateTime<Utc>,
    pub claimed: bool,
}

impl PolicyResponse {
    pub fn new(policy: &Policy, currency: Currency) -> Self {
        let vehicle = policy.vehicle();
        Self {
            id: policy.id(),
            reference: policy.id().to_string(),
            owner: policy.owner().to_string(),
            plate: vehicle.plate.clone(),
            brand: vehicle.brand.clone(),
            engine_capacity: vehicle.engine_capacity,
            registration_year: vehicle.registration_year,
            electric: vehicle.electric,
            plan: policy.plan(),
            plan_code: policy.plan().code(),
            monthly_premium: policy.plan().monthly_premium_amount(),
            max_payout: policy.plan().max_payout_amount(),
            currency: currency.code().to_string(),
            start_year: policy.start_year(),
            period_years: policy.period_years(),
            coverage_end_year: policy.coverage_end_year(),
            created_at: policy.created_at(),
            last_paid: policy.last_paid(),
            premium_due_at: policy.premium_due_at(),
            claimed: policy.is_claimed(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PolicyCountResponse {
    pub total: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlateStatusResponse {
    pub plate: String,
    pub registered: bool,
}
