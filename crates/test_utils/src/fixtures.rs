//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common values across the engine.
//! These fixtures are consistent and predictable for unit tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use core_kernel::{Currency, Identity, Money};
use rust_decimal_macros::dec;
use uuid::Uuid;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A pool large enough to cover any single claim
    pub fn eth_pool() -> Money {
        Money::new(dec!(10), Currency::ETH)
    }

    /// Damage well under every plan's cap
    pub fn eth_small_damage() -> Money {
        Money::new(dec!(0.5), Currency::ETH)
    }

    /// Damage above the widest plan's cap
    pub fn eth_excessive_damage() -> Money {
        Money::new(dec!(4), Currency::ETH)
    }

    /// Zero in the settlement currency
    pub fn eth_zero() -> Money {
        Money::zero(Currency::ETH)
    }

    /// An amount in a foreign currency for mismatch tests
    pub fn usd_100() -> Money {
        Money::new(dec!(100.00), Currency::USD)
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Where every test clock starts (legacy year 2024)
    pub fn genesis() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap()
    }

    /// One second before the first premium window closes
    pub fn just_before_window() -> DateTime<Utc> {
        Self::genesis() + Duration::days(30) - Duration::seconds(1)
    }

    /// Exactly one premium window after genesis
    pub fn window_elapsed() -> DateTime<Utc> {
        Self::genesis() + Duration::days(30)
    }

    /// A full fixed-length year after genesis (legacy year 2025)
    pub fn next_legacy_year() -> DateTime<Utc> {
        Self::genesis() + Duration::days(365)
    }
}

/// Fixture for identity test data
pub struct IdentityFixtures;

impl IdentityFixtures {
    /// Deterministic owner identity
    pub fn owner() -> Identity {
        Identity::from_uuid(Uuid::from_u128(0x550e8400_e29b_41d4_a716_446655440000))
    }

    /// Deterministic first customer
    pub fn alice() -> Identity {
        Identity::from_uuid(Uuid::from_u128(0x550e8400_e29b_41d4_a716_446655440001))
    }

    /// Deterministic second customer
    pub fn bob() -> Identity {
        Identity::from_uuid(Uuid::from_u128(0x550e8400_e29b_41d4_a716_446655440002))
    }
}

/// Fixture for string test data
pub struct StringFixtures;

impl StringFixtures {
    pub fn plate() -> &'static str {
        "XYZ123"
    }

    pub fn accident_date() -> &'static str {
        "2024-02-14"
    }

    pub fn document_url() -> &'static str {
        "ipfs://QmYwAPJzv5CZsnAzt8auVZRn1pfejkzPm6s8kGp1dGmY8S"
    }
}
