//! End-to-end behaviour of the insurance engine facade

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Currency, Identity, ManualClock, Money, PolicyId, SimulatedTransfer};
use domain_customer::CustomerProfile;
use domain_policy::{NewPolicy, Plan, Vehicle};
use domain_settlement::{ClaimRequest, EngineError, EngineEvent, InsuranceEngine, OwnerCapability};

struct Harness {
    engine: InsuranceEngine<SimulatedTransfer>,
    clock: Arc<ManualClock>,
    owner: Identity,
}

impl Harness {
    fn new() -> Self {
        let clock = Arc::new(ManualClock::starting_at(
            Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap(),
        ));
        let owner = Identity::new();
        let engine = InsuranceEngine::new(
            OwnerCapability::new(owner),
            Currency::ETH,
            clock.clone(),
            SimulatedTransfer::new(Currency::ETH),
        )
        .unwrap();

        Self { engine, clock, owner }
    }

    fn funded(amount: Decimal) -> Self {
        let mut harness = Self::new();
        harness.engine.receive(Identity::new(), eth(amount)).unwrap();
        harness
    }

    fn customer(&mut self, birth_year: u32) -> Identity {
        let identity = Identity::new();
        self.engine.register(identity, profile(birth_year)).unwrap();
        identity
    }

    fn policy(&mut self, caller: Identity, plate: &str, plan: Plan, period_years: u32) -> PolicyId {
        self.engine
            .create_insurance(caller, new_policy(plate, plan, period_years))
            .unwrap()
            .id()
    }
}

fn premium(plan: Plan) -> Money {
    plan.monthly_premium(Currency::ETH)
}

fn eth(amount: Decimal) -> Money {
    Money::new(amount, Currency::ETH)
}

fn profile(birth_year: u32) -> CustomerProfile {
    CustomerProfile {
        name: "Achieng Odhiambo".to_string(),
        national_id: "27654321".to_string(),
        nationality: "Kenyan".to_string(),
        phone_number: "+254 722 000111".to_string(),
        birth_year,
        married: false,
    }
}

fn new_policy(plate: &str, plan: Plan, period_years: u32) -> NewPolicy {
    NewPolicy {
        vehicle: Vehicle {
            plate: plate.to_string(),
            brand: "Toyota".to_string(),
            engine_capacity: 1500,
            registration_year: 2017,
            electric: false,
        },
        period_years,
        plan,
    }
}

fn claim(amount: Decimal) -> ClaimRequest {
    ClaimRequest {
        estimated_damage: eth(amount),
        accident_date: "2024-03-01".to_string(),
        document_url: "ipfs://QmClaimEvidence".to_string(),
    }
}

mod scenarios {
    use super::*;

    #[test]
    fn test_register_insure_pay_and_claim() {
        let mut h = Harness::funded(dec!(5));
        let a = h.customer(1990);
        let policy_id = h.policy(a, "XYZ123", Plan::Comprehensive, 1);

        h.clock.advance_days(30);
        h.engine.pay_monthly_premium(a, policy_id, premium(Plan::Comprehensive)).unwrap();

        h.clock.advance_days(31);
        let settlement = h.engine.claim_insurance(a, policy_id, claim(dec!(2.0))).unwrap();

        assert_eq!(settlement.amount, eth(dec!(2.0)));
        assert!(h.engine.get_policy(policy_id).unwrap().is_claimed());
        assert_eq!(h.engine.transfer().received_by(&a), eth(dec!(2.0)));
        assert_eq!(h.engine.custodial_balance(), eth(dec!(3.03)));
    }

    #[test]
    fn test_second_claim_pays_nothing() {
        let mut h = Harness::funded(dec!(5));
        let b = h.customer(1985);
        let policy_id = h.policy(b, "KBX 555Z", Plan::Comprehensive, 1);

        h.engine.claim_insurance(b, policy_id, claim(dec!(1.0))).unwrap();
        let received = h.engine.transfer().received_by(&b);

        let second = h.engine.claim_insurance(b, policy_id, claim(dec!(0.5)));

        assert!(matches!(second, Err(EngineError::AlreadyClaimed(_))));
        assert_eq!(h.engine.transfer().received_by(&b), received);
    }

    #[test]
    fn test_ban_after_missed_window_is_repeatable() {
        let mut h = Harness::new();
        let c = h.customer(1979);
        let policy_id = h.policy(c, "KDD 010D", Plan::ThirdPartyOnly, 1);

        h.clock.advance_days(30);
        h.engine.pay_monthly_premium(c, policy_id, premium(Plan::ThirdPartyOnly)).unwrap();
        h.clock.advance_days(31);

        assert_eq!(h.engine.ban(h.owner, policy_id).unwrap(), c);
        assert_eq!(h.engine.ban(h.owner, policy_id).unwrap(), c);
        assert!(h.engine.is_banned(&c));
    }

    #[test]
    fn test_ban_blocks_create_and_claim_but_not_premiums() {
        let mut h = Harness::funded(dec!(5));
        let c = h.customer(1992);
        let policy_id = h.policy(c, "KCA 300C", Plan::ThirdPartyFireTheft, 2);

        h.clock.advance_days(31);
        h.engine.ban(h.owner, policy_id).unwrap();

        assert!(matches!(
            h.engine.create_insurance(c, new_policy("KCA 301C", Plan::ThirdPartyOnly, 1)),
            Err(EngineError::Banned(_))
        ));
        assert!(matches!(
            h.engine.claim_insurance(c, policy_id, claim(dec!(0.1))),
            Err(EngineError::Banned(_))
        ));
        assert!(h
            .engine
            .pay_monthly_premium(c, policy_id, premium(Plan::ThirdPartyFireTheft))
            .is_ok());

        h.engine.unban(h.owner, c).unwrap();
        assert!(h.engine.claim_insurance(c, policy_id, claim(dec!(0.1))).is_ok());
    }

    #[test]
    fn test_withdraw_drains_custody_to_owner() {
        let mut h = Harness::funded(dec!(4.2));

        let withdrawal = h.engine.withdraw(h.owner).unwrap();

        assert_eq!(withdrawal.amount, eth(dec!(4.2)));
        assert!(h.engine.custodial_balance().is_zero());
        assert_eq!(h.engine.transfer().received_by(&h.owner), eth(dec!(4.2)));

        let empty = h.engine.withdraw(h.owner).unwrap();
        assert!(empty.amount.is_zero());
        assert!(empty.receipt.is_none());
    }
}

mod rejections {
    use super::*;

    #[test]
    fn test_double_registration() {
        let mut h = Harness::new();
        let a = h.customer(1990);

        let result = h.engine.register(a, profile(2000));

        assert!(matches!(result, Err(EngineError::AlreadyRegistered(_))));
        assert_eq!(h.engine.customer_information(&a).unwrap().profile, profile(1990));
    }

    #[test]
    fn test_unregistered_cannot_insure() {
        let mut h = Harness::new();

        let result = h.engine.create_insurance(Identity::new(), new_policy("NOPE1", Plan::ThirdPartyOnly, 1));

        assert!(matches!(result, Err(EngineError::NotRegistered(_))));
        assert_eq!(h.engine.total_policies(), 0);
    }

    #[test]
    fn test_plate_lock_across_customers() {
        let mut h = Harness::new();
        let a = h.customer(1990);
        let b = h.customer(1991);
        h.policy(a, "SAME1", Plan::ThirdPartyOnly, 1);

        let result = h.engine.create_insurance(b, new_policy("SAME1", Plan::Comprehensive, 1));

        assert!(matches!(result, Err(EngineError::PlateAlreadyInsured(_))));
        assert!(h.engine.has_been_registered("SAME1"));
    }

    #[test]
    fn test_only_owner_may_pay_or_claim() {
        let mut h = Harness::funded(dec!(5));
        let a = h.customer(1990);
        let stranger = h.customer(1991);
        let policy_id = h.policy(a, "OWN1", Plan::Comprehensive, 1);
        h.clock.advance_days(30);

        assert!(matches!(
            h.engine.pay_monthly_premium(stranger, policy_id, premium(Plan::Comprehensive)),
            Err(EngineError::InvalidCaller { .. })
        ));
        assert!(matches!(
            h.engine.claim_insurance(stranger, policy_id, claim(dec!(1))),
            Err(EngineError::InvalidCaller { .. })
        ));
    }

    #[test]
    fn test_unknown_policy() {
        let mut h = Harness::new();
        let a = h.customer(1990);

        assert!(matches!(
            h.engine.claim_insurance(a, PolicyId::new(99), claim(dec!(1))),
            Err(EngineError::PolicyNotFound(_))
        ));
        assert!(matches!(
            h.engine.ban(h.owner, PolicyId::new(99)),
            Err(EngineError::PolicyNotFound(_))
        ));
    }

    #[test]
    fn test_claim_after_coverage_year() {
        let mut h = Harness::funded(dec!(5));
        let a = h.customer(1990);
        let policy_id = h.policy(a, "OLD1", Plan::Comprehensive, 0);

        h.clock.advance_days(365);
        let result = h.engine.claim_insurance(a, policy_id, claim(dec!(1)));

        assert!(matches!(result, Err(EngineError::PeriodExpired { coverage_end_year: 2024, current_year: 2025, .. })));
    }

    #[test]
    fn test_underfunded_pool_fails_transfer() {
        let mut h = Harness::funded(dec!(0.5));
        let a = h.customer(1990);
        let policy_id = h.policy(a, "POOR1", Plan::Comprehensive, 1);

        let err = h.engine.claim_insurance(a, policy_id, claim(dec!(2))).unwrap_err();

        assert!(matches!(err, EngineError::TransferFailed(_)));
        assert!(err.is_fatal());
        assert!(!h.engine.get_policy(policy_id).unwrap().is_claimed());
        assert_eq!(h.engine.custodial_balance(), eth(dec!(0.5)));
    }

    #[test]
    fn test_owner_operations_require_owner() {
        let mut h = Harness::funded(dec!(1));
        let a = h.customer(1990);
        let policy_id = h.policy(a, "ADM1", Plan::ThirdPartyOnly, 1);
        h.clock.advance_days(40);

        assert!(matches!(h.engine.ban(a, policy_id), Err(EngineError::Unauthorized(_))));
        assert!(matches!(h.engine.unban(a, a), Err(EngineError::Unauthorized(_))));
        assert!(matches!(h.engine.withdraw(a), Err(EngineError::Unauthorized(_))));
        assert_eq!(h.engine.custodial_balance(), eth(dec!(1)));
    }

    #[test]
    fn test_ban_needs_a_missed_window() {
        let mut h = Harness::new();
        let a = h.customer(1990);
        let policy_id = h.policy(a, "LATE1", Plan::ThirdPartyOnly, 1);
        h.clock.advance_days(29);

        assert!(matches!(h.engine.ban(h.owner, policy_id), Err(EngineError::TooSoon { .. })));
        assert!(!h.engine.is_banned(&a));
    }
}

mod events {
    use super::*;

    #[test]
    fn test_only_committed_calls_emit_events() {
        let mut h = Harness::new();
        let a = h.customer(1990);
        let _ = h.engine.register(a, profile(1990));
        let policy_id = h.policy(a, "EVT1", Plan::ThirdPartyOnly, 1);
        let _ = h.engine.pay_monthly_premium(a, policy_id, premium(Plan::ThirdPartyOnly));

        let events = h.engine.take_events();

        let names: Vec<_> = events.iter().map(EngineEvent::name).collect();
        assert_eq!(names, vec!["customer_registered", "policy_created"]);
        assert_eq!(events[1].policy_id(), Some(policy_id));
        assert!(h.engine.take_events().is_empty());
    }
}

mod properties {
    use super::*;

    proptest! {
        #[test]
        fn premium_accepted_only_after_full_window(days in 0i64..90) {
            let mut h = Harness::new();
            let a = h.customer(1990);
            let policy_id = h.policy(a, "PROP1", Plan::ThirdPartyOnly, 1);
            h.clock.advance_days(days);

            let result = h.engine.pay_monthly_premium(a, policy_id, premium(Plan::ThirdPartyOnly));

            if days >= 30 {
                prop_assert!(result.is_ok());
            } else {
                let is_too_soon = matches!(result, Err(EngineError::TooSoon { .. }));
                prop_assert!(is_too_soon);
            }
        }

        #[test]
        fn consecutive_premiums_are_a_window_apart(gap in 0i64..60) {
            let mut h = Harness::new();
            let a = h.customer(1990);
            let policy_id = h.policy(a, "PROP2", Plan::ThirdPartyFireTheft, 1);
            let amount = premium(Plan::ThirdPartyFireTheft);

            h.clock.advance_days(30);
            h.engine.pay_monthly_premium(a, policy_id, amount).unwrap();
            h.clock.advance_days(gap);

            prop_assert_eq!(h.engine.pay_monthly_premium(a, policy_id, amount).is_ok(), gap >= 30);
        }

        #[test]
        fn wrong_premium_always_rejected(milli in 1i64..100) {
            prop_assume!(milli != 30);
            let mut h = Harness::new();
            let a = h.customer(1990);
            let policy_id = h.policy(a, "PROP3", Plan::Comprehensive, 1);
            h.clock.advance_days(30);

            let result = h.engine.pay_monthly_premium(a, policy_id, eth(Decimal::new(milli, 3)));

            let is_wrong_amount = matches!(result, Err(EngineError::WrongAmount { .. }));
            prop_assert!(is_wrong_amount);
            prop_assert!(h.engine.custodial_balance().is_zero());
        }

        #[test]
        fn claims_above_cap_never_pay(milli in 1i64..6_000) {
            let mut h = Harness::funded(dec!(10));
            let a = h.customer(1990);
            let policy_id = h.policy(a, "PROP4", Plan::Comprehensive, 1);

            let result = h.engine.claim_insurance(a, policy_id, claim(Decimal::new(milli, 3)));
            let claimed = h.engine.get_policy(policy_id).unwrap().is_claimed();

            if milli > 3_500 {
                let is_exceeds = matches!(result, Err(EngineError::ExceedsMaxPayout { .. }));
                prop_assert!(is_exceeds);
                prop_assert!(!claimed);
                prop_assert!(h.engine.transfer().received_by(&a).is_zero());
            } else {
                prop_assert!(result.is_ok());
                prop_assert!(claimed);
            }
        }
    }
}
