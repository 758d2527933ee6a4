//! Data Transfer Objects

pub mod admin;
pub mod customer;
pub mod policy;
pub mod settlement;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money};

use crate::error::ApiError;

/// An amount of value attached to a request
///
/// The currency defaults to the engine's settlement currency.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValueDto {
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl ValueDto {
    /// Resolves the attached value against the engine currency
    ///
    /// Amounts finer than the currency's smallest unit are refused rather
    /// than rounded.
    pub fn to_money(&self, default_currency: Currency) -> Result<Money, ApiError> {
        let currency = match &self.currency {
            Some(code) => code
                .parse::<Currency>()
                .map_err(|e| ApiError::BadRequest(e.to_string()))?,
            None => default_currency,
        };
        if self.amount.normalize().scale() > currency.decimal_places() {
            return Err(ApiError::BadRequest(format!(
                "{} has more than {} decimal places for {}",
                self.amount,
                currency.decimal_places(),
                currency.code()
            )));
        }
        Ok(Money::new(self.amount, currency))
    }
}

impl From<Money> for ValueDto {
    fn from(money: Money) -> Self {
        Self {
            amount: money.amount(),
            currency: Some(money.currency().code().to_string()),
        }
    }
}
