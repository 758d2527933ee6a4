//! Customer registry
//!
//! The registry is the single owner of customer records. It answers the two
//! questions every gated operation asks (is this identity registered, is it
//! banned) and applies the owner's ban decisions.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use core_kernel::Identity;

use crate::customer::{Customer, CustomerProfile};
use crate::error::CustomerError;

/// Registry of all customers, keyed by caller identity
#[derive(Debug, Default, Clone)]
pub struct CustomerRegistry {
    customers: HashMap<Identity, Customer>,
}

impl CustomerRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the caller as a customer
    ///
    /// # Errors
    ///
    /// Returns `AlreadyRegistered` if the caller already has a record. The
    /// existing record is left untouched.
    pub fn register(
        &mut self,
        caller: Identity,
        profile: CustomerProfile,
        now: DateTime<Utc>,
    ) -> Result<&Customer, CustomerError> {
        if self.customers.contains_key(&caller) {
            return Err(CustomerError::AlreadyRegistered(caller.to_string()));
        }

        info!(customer = %caller, "Customer registered");

        let customer = self
            .customers
            .entry(caller)
            .or_insert_with(|| Customer::new(caller, profile, now));
        Ok(&*customer)
    }

    /// Returns the customer record for an identity
    pub fn get(&self, identity: &Identity) -> Option<&Customer> {
        self.customers.get(identity)
    }

    /// Returns true if the identity has registered
    pub fn is_registered(&self, identity: &Identity) -> bool {
        self.customers.contains_key(identity)
    }

    /// Returns true if the identity is registered and banned
    pub fn is_banned(&self, identity: &Identity) -> bool {
        self.customers.get(identity).map_or(false, |c| c.banned)
    }

    /// Checks that the identity may open a new policy
    ///
    /// # Errors
    ///
    /// - `NotRegistered` if the identity has no record
    /// - `Banned` if the customer is banned
    pub fn ensure_eligible(&self, identity: &Identity) -> Result<&Customer, CustomerError> {
        let customer = self
            .customers
            .get(identity)
            .ok_or_else(|| CustomerError::not_registered(identity))?;

        if customer.banned {
            debug!(customer = %identity, "Eligibility check failed: banned");
            return Err(CustomerError::Banned(identity.to_string()));
        }

        Ok(customer)
    }

    /// Sets the ban flag on a registered customer
    ///
    /// Banning an already banned customer succeeds and changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `NotRegistered` if the identity has no record
    pub fn ban(&mut self, identity: &Identity) -> Result<(), CustomerError> {
        let customer = self
            .customers
            .get_mut(identity)
            .ok_or_else(|| CustomerError::not_registered(identity))?;

        customer.banned = true;
        info!(customer = %identity, "Customer banned");
        Ok(())
    }

    /// Clears the ban flag
    ///
    /// Unconditional: an unknown identity is a no-op. Returns true if a
    /// record was found.
    pub fn unban(&mut self, identity: &Identity) -> bool {
        match self.customers.get_mut(identity) {
            Some(customer) => {
                customer.banned = false;
                info!(customer = %identity, "Customer unbanned");
                true
            }
            None => {
                debug!(customer = %identity, "Unban for unknown identity ignored");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn profile() -> CustomerProfile {
        CustomerProfile {
            name: "Amina Diallo".to_string(),
            national_id: "SN-4410923".to_string(),
            nationality: "Senegalese".to_string(),
            phone_number: "+221 77 000 0000".to_string(),
            birth_year: 1990,
            married: false,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_register_then_lookup() {
        let mut registry = CustomerRegistry::new();
        let caller = Identity::new();

        registry.register(caller, profile(), now()).unwrap();

        let customer = registry.get(&caller).unwrap();
        assert_eq!(customer.profile, profile());
        assert!(!customer.banned);
        assert!(registry.is_registered(&caller));
    }

    #[test]
    fn test_second_registration_rejected() {
        let mut registry = CustomerRegistry::new();
        let caller = Identity::new();
        registry.register(caller, profile(), now()).unwrap();

        let mut other = profile();
        other.name = "Someone Else".to_string();
        let result = registry.register(caller, other, now());

        assert!(matches!(result, Err(CustomerError::AlreadyRegistered(_))));
        assert_eq!(registry.get(&caller).unwrap().name(), "Amina Diallo");
    }

    #[test]
    fn test_birth_year_zero_still_registers() {
        let mut registry = CustomerRegistry::new();
        let caller = Identity::new();
        let mut p = profile();
        p.birth_year = 0;

        registry.register(caller, p, now()).unwrap();

        assert!(registry.is_registered(&caller));
        assert!(registry.register(caller, profile(), now()).is_err());
    }

    #[test]
    fn test_ban_and_unban() {
        let mut registry = CustomerRegistry::new();
        let caller = Identity::new();
        registry.register(caller, profile(), now()).unwrap();

        registry.ban(&caller).unwrap();
        assert!(registry.is_banned(&caller));
        assert!(matches!(registry.ensure_eligible(&caller), Err(CustomerError::Banned(_))));

        assert!(registry.unban(&caller));
        assert!(!registry.is_banned(&caller));
        assert!(registry.ensure_eligible(&caller).is_ok());
    }

    #[test]
    fn test_unknown_identity() {
        let mut registry = CustomerRegistry::new();
        let stranger = Identity::new();

        assert!(!registry.is_banned(&stranger));
        assert!(matches!(
            registry.ensure_eligible(&stranger),
            Err(CustomerError::NotRegistered(_))
        ));
        assert!(registry.ban(&stranger).is_err());
        assert!(!registry.unban(&stranger));
        assert!(!registry.is_registered(&stranger));
    }
}
