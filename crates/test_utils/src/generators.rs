//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants, plus `fake`-backed profiles for
//! tests that only need plausible-looking customers.

use core_kernel::{Currency, Money};
use domain_customer::CustomerProfile;
use domain_policy::{NewPolicy, Plan, Vehicle};
use fake::faker::address::en::CountryName;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use proptest::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Strategy over the three coverage plans
pub fn plan_strategy() -> impl Strategy<Value = Plan> {
    prop_oneof![
        Just(Plan::ThirdPartyOnly),
        Just(Plan::ThirdPartyFireTheft),
        Just(Plan::Comprehensive),
    ]
}

/// Strategy for registration plates like "KDA 123X"
pub fn plate_strategy() -> impl Strategy<Value = String> {
    "[A-Z]{3} [0-9]{3}[A-Z]"
}

/// Birth years, including the unset value 0
pub fn birth_year_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![Just(0u32), 1930u32..2008u32]
}

/// Coverage periods in whole years
pub fn period_years_strategy() -> impl Strategy<Value = u32> {
    1u32..10u32
}

/// Positive ETH amounts with micro-ether precision, below 100 ETH
pub fn eth_amount_strategy() -> impl Strategy<Value = Money> {
    (1i64..100_000_000i64).prop_map(|micros| Money::new(Decimal::new(micros, 6), Currency::ETH))
}

/// Damage estimates that fit under the given plan's cap
pub fn eth_damage_within_cap_strategy(plan: Plan) -> impl Strategy<Value = Money> {
    let cap_millis = (plan.max_payout_amount() * Decimal::from(1000))
        .to_i64()
        .unwrap_or(1000);
    (1i64..=cap_millis).prop_map(|millis| Money::new(Decimal::new(millis, 3), Currency::ETH))
}

/// Clock steps in days
pub fn days_strategy() -> impl Strategy<Value = i64> {
    0i64..400i64
}

/// Strategy for registration details
pub fn profile_strategy() -> impl Strategy<Value = CustomerProfile> {
    (
        "[A-Z][a-z]{2,10} [A-Z][a-z]{2,12}",
        "[0-9]{8}",
        birth_year_strategy(),
        any::<bool>(),
    )
        .prop_map(|(name, national_id, birth_year, married)| CustomerProfile {
            name,
            national_id,
            nationality: "Kenyan".to_string(),
            phone_number: "+254 700 000000".to_string(),
            birth_year,
            married,
        })
}

/// Strategy for policy requests on arbitrary plates
pub fn new_policy_strategy() -> impl Strategy<Value = NewPolicy> {
    (plate_strategy(), period_years_strategy(), plan_strategy(), any::<bool>()).prop_map(
        |(plate, period_years, plan, electric)| NewPolicy {
            vehicle: Vehicle {
                plate,
                brand: "Toyota".to_string(),
                engine_capacity: if electric { 0 } else { 1500 },
                registration_year: 2020,
                electric,
            },
            period_years,
            plan,
        },
    )
}

/// A random but realistic customer profile
pub fn fake_profile() -> CustomerProfile {
    CustomerProfile {
        name: Name().fake(),
        national_id: (10_000_000u32..99_999_999u32).fake::<u32>().to_string(),
        nationality: CountryName().fake(),
        phone_number: PhoneNumber().fake(),
        birth_year: (1940u32..2006u32).fake(),
        married: (0u8..2u8).fake::<u8>() == 1,
    }
}
