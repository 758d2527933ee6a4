//! Coverage plans
//!
//! Three fixed tiers. Each carries a monthly premium and a maximum payout,
//! both compile-time constants that rise with the breadth of cover.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money};

use crate::error::PolicyError;

/// A coverage tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    /// Liability towards third parties only
    ThirdPartyOnly,
    /// Third party plus fire and theft of the insured vehicle
    ThirdPartyFireTheft,
    /// Everything above plus own damage
    Comprehensive,
}

impl Plan {
    /// All plans, narrowest cover first
    pub const ALL: [Plan; 3] = [
        Plan::ThirdPartyOnly,
        Plan::ThirdPartyFireTheft,
        Plan::Comprehensive,
    ];

    /// Numeric code used on the wire (0, 1, 2)
    pub fn code(&self) -> u8 {
        match self {
            Plan::ThirdPartyOnly => 0,
            Plan::ThirdPartyFireTheft => 1,
            Plan::Comprehensive => 2,
        }
    }

    /// Looks up a plan by numeric code
    ///
    /// # Errors
    ///
    /// Returns `InvalidPlan` for any code outside 0..=2
    pub fn from_code(code: u8) -> Result<Plan, PolicyError> {
        Plan::ALL
            .into_iter()
            .find(|p| p.code() == code)
            .ok_or_else(|| PolicyError::invalid_plan(code))
    }

    /// Monthly premium as a bare amount
    pub fn monthly_premium_amount(&self) -> Decimal {
        match self {
            Plan::ThirdPartyOnly => dec!(0.01),
            Plan::ThirdPartyFireTheft => dec!(0.02),
            Plan::Comprehensive => dec!(0.03),
        }
    }

    /// Maximum payout as a bare amount
    pub fn max_payout_amount(&self) -> Decimal {
        match self {
            Plan::ThirdPartyOnly => dec!(1.0),
            Plan::ThirdPartyFireTheft => dec!(2.0),
            Plan::Comprehensive => dec!(3.5),
        }
    }

    /// Monthly premium in the settlement currency
    pub fn monthly_premium(&self, currency: Currency) -> Money {
        Money::new(self.monthly_premium_amount(), currency)
    }

    /// Maximum payout in the settlement currency
    pub fn max_payout(&self, currency: Currency) -> Money {
        Money::new(self.max_payout_amount(), currency)
    }

    fn name(&self) -> &'static str {
        match self {
            Plan::ThirdPartyOnly => "third_party_only",
            Plan::ThirdPartyFireTheft => "third_party_fire_theft",
            Plan::Comprehensive => "comprehensive",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Plan {
    type Err = PolicyError;

    /// Accepts the snake_case name or the numeric code
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<u8>() {
            return Plan::from_code(code);
        }
        Plan::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| PolicyError::invalid_plan(s))
    }
}

impl TryFrom<u8> for Plan {
    type Error = PolicyError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Plan::from_code(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_premiums_and_caps_rise_with_cover() {
        for pair in Plan::ALL.windows(2) {
            assert!(pair[0].monthly_premium_amount() < pair[1].monthly_premium_amount());
            assert!(pair[0].max_payout_amount() < pair[1].max_payout_amount());
        }
    }

    #[test]
    fn test_comprehensive_cap() {
        assert_eq!(Plan::Comprehensive.max_payout(Currency::ETH).amount(), dec!(3.5));
    }

    #[test]
    fn test_code_round_trip() {
        for plan in Plan::ALL {
            assert_eq!(Plan::from_code(plan.code()).unwrap(), plan);
        }
        assert_eq!(Plan::from_code(3), Err(PolicyError::InvalidPlan("3".to_string())));
    }

    #[test]
    fn test_parse_by_name_and_code() {
        assert_eq!("comprehensive".parse::<Plan>().unwrap(), Plan::Comprehensive);
        assert_eq!("Third_Party_Only".parse::<Plan>().unwrap(), Plan::ThirdPartyOnly);
        assert_eq!("1".parse::<Plan>().unwrap(), Plan::ThirdPartyFireTheft);
        assert!("platinum".parse::<Plan>().is_err());
    }
}
