//! Customer DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::PolicyId;
use domain_customer::{Customer, CustomerProfile};

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub national_id: String,
    pub nationality: String,
    pub phone_number: String,
    #[serde(default)]
    pub birth_year: u32,
    #[serde(default)]
    pub married: bool,
}

impl From<RegisterRequest> for CustomerProfile {
    fn from(request: RegisterRequest) -> Self {
        CustomerProfile {
            name: request.name,
            national_id: request.national_id,
            nationality: request.nationality,
            phone_number: request.phone_number,
            birth_year: request.birth_year,
            married: request.married,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CustomerResponse {
    pub identity: String,
    pub name: String,
    pub national_id: String,
    pub nationality: String,
    pub phone_number: String,
    pub birth_year: u32,
    pub married: bool,
    pub banned: bool,
    pub registered_at: DateTime<Utc>,
}

impl From<&Customer> for CustomerResponse {
    fn from(customer: &Customer) -> Self {
        Self {
            identity: customer.identity.to_string(),
            name: customer.profile.name.clone(),
            national_id: customer.profile.national_id.clone(),
            nationality: customer.profile.nationality.clone(),
            phone_number: customer.profile.phone_number.clone(),
            birth_year: customer.profile.birth_year,
            married: customer.profile.married,
            banned: customer.banned,
            registered_at: customer.registered_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CustomerPoliciesResponse {
    pub identity: String,
    pub policy_ids: Vec<PolicyId>,
}
