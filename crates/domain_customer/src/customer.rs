//! Customer entity
//!
//! One record per caller identity, holding the personal details captured at
//! registration and the ban flag maintained by the owner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::Identity;

/// Personal details supplied at registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfile {
    /// Display name
    pub name: String,
    /// National identifier (passport or ID card number)
    pub national_id: String,
    /// Nationality
    pub nationality: String,
    /// Contact phone number
    pub phone_number: String,
    /// Year of birth
    pub birth_year: u32,
    /// Marital status, true when married
    pub married: bool,
}

/// A registered customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// The identity that registered this record
    pub identity: Identity,
    /// Details exactly as supplied at registration
    pub profile: CustomerProfile,
    /// Set by the owner after a missed premium window
    pub banned: bool,
    /// When the record was created
    pub registered_at: DateTime<Utc>,
}

impl Customer {
    /// Creates a fresh, unbanned customer record
    pub fn new(identity: Identity, profile: CustomerProfile, registered_at: DateTime<Utc>) -> Self {
        Self {
            identity,
            profile,
            banned: false,
            registered_at,
        }
    }

    /// Returns the display name
    pub fn name(&self) -> &str {
        &self.profile.name
    }
}
