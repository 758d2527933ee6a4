//! Behaviour tests for the custodial treasury

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Currency, Identity, Money, PolicyId};
use domain_billing::{AccountRole, Reference, Treasury, TreasuryError};

fn eth(amount: Decimal) -> Money {
    Money::new(amount, Currency::ETH)
}

fn at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 15, 10, 0, 0).unwrap()
}

mod movements {
    use super::*;

    #[test]
    fn test_premium_entry_references_policy() {
        let mut treasury = Treasury::new(Currency::ETH).unwrap();
        let policy_id = PolicyId::new(7);

        treasury.record_premium(policy_id, eth(dec!(0.02)), at()).unwrap();

        let entry = &treasury.entries()[0];
        assert_eq!(entry.reference, Some(Reference::Policy { policy_id }));
        assert_eq!(entry.postings.len(), 2);
        assert!(entry.description.contains("POL-7"));
    }

    #[test]
    fn test_entry_serializes_for_audit() {
        let mut treasury = Treasury::new(Currency::ETH).unwrap();
        treasury.record_premium(PolicyId::new(3), eth(dec!(0.01)), at()).unwrap();

        let json = serde_json::to_value(&treasury.entries()[0]).unwrap();

        assert_eq!(json["reference"]["kind"], "policy");
        assert_eq!(json["reference"]["policy_id"], 3);
        assert_eq!(json["postings"][0]["posting_type"], "Debit");
        assert_eq!(json["postings"][1]["posting_type"], "Credit");
        assert_eq!(json["transaction_date"], serde_json::to_value(at()).unwrap());
    }

    #[test]
    fn test_withdrawal_references_owner() {
        let mut treasury = Treasury::new(Currency::ETH).unwrap();
        let owner = Identity::new();
        treasury.record_deposit(Identity::new(), eth(dec!(1)), at()).unwrap();

        treasury.record_withdrawal(owner, eth(dec!(1)), at()).unwrap();

        assert_eq!(
            treasury.entries()[1].reference,
            Some(Reference::Counterparty { identity: owner })
        );
        assert_eq!(treasury.balance_of(AccountRole::OwnerDrawings), eth(dec!(1)));
    }

    #[test]
    fn test_zero_amount_is_rejected_without_side_effects() {
        let mut treasury = Treasury::new(Currency::ETH).unwrap();

        let result = treasury.record_deposit(Identity::new(), Money::zero(Currency::ETH), at());

        assert!(matches!(result, Err(TreasuryError::InvalidPosting(_))));
        assert!(treasury.entries().is_empty());
    }

    #[test]
    fn test_foreign_currency_is_rejected() {
        let mut treasury = Treasury::new(Currency::ETH).unwrap();

        let result = treasury.record_premium(PolicyId::FIRST, Money::new(dec!(10), Currency::USD), at());

        assert!(matches!(result, Err(TreasuryError::Money(_))));
        assert!(treasury.custodial_balance().is_zero());
    }
}

mod invariants {
    use super::*;

    proptest! {
        #[test]
        fn custody_equals_inflows_minus_outflows(
            premiums in prop::collection::vec(1u32..10_000, 0..10),
            deposits in prop::collection::vec(1u32..10_000, 0..10),
            payouts in prop::collection::vec(1u32..10_000, 0..10),
        ) {
            let mut treasury = Treasury::new(Currency::ETH).unwrap();
            let milli = |n: u32| eth(Decimal::new(n as i64, 3));
            let mut expected = Decimal::ZERO;

            for n in &premiums {
                treasury.record_premium(PolicyId::FIRST, milli(*n), at()).unwrap();
                expected += milli(*n).amount();
            }
            for n in &deposits {
                treasury.record_deposit(Identity::new(), milli(*n), at()).unwrap();
                expected += milli(*n).amount();
            }
            for n in &payouts {
                treasury.record_claim_payout(PolicyId::FIRST, milli(*n), at()).unwrap();
                expected -= milli(*n).amount();
            }

            prop_assert_eq!(treasury.custodial_balance(), eth(expected));
            prop_assert!(treasury.trial_balance().unwrap().is_balanced);
        }
    }
}
