//! Money types with precise decimal arithmetic
//!
//! Premiums, payout caps, attached call value and the custodial balance are all
//! expressed as `Money`. Amounts use rust_decimal so that an attached premium
//! is compared against the plan constant exactly, without floating-point drift.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;
use thiserror::Error;

/// Settlement denominations the engine can be configured with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    ETH,
    USD,
    EUR,
    GBP,
}

impl Currency {
    /// Returns the number of decimal places for this currency
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::ETH => 18,
            _ => 2,
        }
    }

    /// Returns the currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::ETH => "Ξ",
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
        }
    }

    /// Returns the currency code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::ETH => "ETH",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::ETH
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ETH" => Ok(Currency::ETH),
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            other => Err(MoneyError::UnknownCurrency(other.to_string())),
        }
    }
}

/// Errors that can occur during money operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Currency mismatch: cannot operate on {0} and {1}")]
    CurrencyMismatch(String, String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Overflow during calculation")]
    Overflow,
}

/// A monetary amount with associated currency
///
/// Amounts are rounded to the currency's native precision on construction, so
/// two values that compare equal are equal to the smallest unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a new Money value
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: amount.round_dp(currency.decimal_places()),
            currency,
        }
    }

    /// Creates Money from an integer amount in minor units (wei, cents)
    pub fn from_minor(minor_units: i64, currency: Currency) -> Self {
        Self::new(
            Decimal::from_i128_with_scale(minor_units as i128, currency.decimal_places()),
            currency,
        )
    }

    /// Creates a zero amount in the specified currency
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: dec!(0),
            currency,
        }
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is positive
    pub fn is_positive(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Returns the absolute value
    pub fn abs(&self) -> Self {
        Self {
            amount: self.amount.abs(),
            currency: self.currency,
        }
    }

    /// Checked addition that returns an error on currency mismatch or overflow
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::new(amount, self.currency))
    }

    /// Checked subtraction that returns an error on currency mismatch or overflow
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::new(amount, self.currency))
    }

    /// Returns true when this amount is strictly larger than `other`
    pub fn exceeds(&self, other: &Money) -> Result<bool, MoneyError> {
        self.ensure_same_currency(other)?;
        Ok(self.amount > other.amount)
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                other.currency.to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency.symbol(), self.amount.normalize())
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.amount, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_creation() {
        let m = Money::new(dec!(0.03), Currency::ETH);
        assert_eq!(m.amount(), dec!(0.03));
        assert_eq!(m.currency(), Currency::ETH);
    }

    #[test]
    fn test_money_from_minor_wei() {
        let m = Money::from_minor(1_000_000_000_000_000, Currency::ETH);
        assert_eq!(m.amount(), dec!(0.001));
    }

    #[test]
    fn test_money_rounds_to_currency_precision() {
        let m = Money::new(dec!(10.005), Currency::USD);
        assert_eq!(m.amount(), dec!(10.00));
    }

    #[test]
    fn test_currency_mismatch() {
        let eth = Money::new(dec!(1), Currency::ETH);
        let usd = Money::new(dec!(1), Currency::USD);

        assert!(matches!(eth.checked_add(&usd), Err(MoneyError::CurrencyMismatch(_, _))));
        assert!(eth.exceeds(&usd).is_err());
    }

    #[test]
    fn test_exceeds() {
        let cap = Money::new(dec!(3.5), Currency::ETH);
        assert!(Money::new(dec!(3.6), Currency::ETH).exceeds(&cap).unwrap());
        assert!(!Money::new(dec!(3.5), Currency::ETH).exceeds(&cap).unwrap());
    }

    #[test]
    fn test_currency_parse() {
        assert_eq!("eth".parse::<Currency>().unwrap(), Currency::ETH);
        assert!("XYZ".parse::<Currency>().is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn add_then_sub_is_identity(
            a in 0i64..1_000_000_000_000i64,
            b in 0i64..1_000_000_000_000i64
        ) {
            let ma = Money::from_minor(a, Currency::ETH);
            let mb = Money::from_minor(b, Currency::ETH);

            prop_assert_eq!(ma.checked_add(&mb).unwrap().checked_sub(&mb).unwrap(), ma);
        }
    }
}
