//! Premium, claim and treasury DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, PolicyId};
use domain_settlement::{ClaimRequest, ClaimSettlement, PremiumPayment};

use super::ValueDto;
use crate::error::ApiError;

#[derive(Debug, Serialize, Deserialize)]
pub struct PayPremiumRequest {
    /// Value attached to the call
    pub value: ValueDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PremiumPaymentResponse {
    pub policy_id: PolicyId,
    pub paid: ValueDto,
    pub paid_at: DateTime<Utc>,
    pub next_due: DateTime<Utc>,
}

impl From<PremiumPayment> for PremiumPaymentResponse {
    fn from(payment: PremiumPayment) -> Self {
        Self {
            policy_id: payment.policy_id,
            paid: payment.amount.into(),
            paid_at: payment.paid_at,
            next_due: payment.next_due,
        }
    }
}

/// Claim details; missing fields arrive empty and are rejected by the engine
#[derive(Debug, Serialize, Deserialize)]
pub struct ClaimInsuranceRequest {
    #[serde(default)]
    pub estimated_damage: ValueDto,
    #[serde(default)]
    pub accident_date: String,
    #[serde(default)]
    pub document_url: String,
}

impl ClaimInsuranceRequest {
    pub fn into_claim(self, currency: Currency) -> Result<ClaimRequest, ApiError> {
        Ok(ClaimRequest {
            estimated_damage: self.estimated_damage.to_money(currency)?,
            accident_date: self.accident_date,
            document_url: self.document_url,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClaimSettlementResponse {
    pub policy_id: PolicyId,
    pub beneficiary: String,
    pub paid: ValueDto,
    pub transfer_id: String,
    pub settled_at: DateTime<Utc>,
}

impl From<ClaimSettlement> for ClaimSettlementResponse {
    fn from(settlement: ClaimSettlement) -> Self {
        Self {
            policy_id: settlement.policy_id,
            beneficiary: settlement.beneficiary.to_string(),
            paid: settlement.amount.into(),
            transfer_id: settlement.receipt.id.to_string(),
            settled_at: settlement.receipt.settled_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DepositRequest {
    pub value: ValueDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TreasuryResponse {
    pub owner: String,
    pub custodial_balance: ValueDto,
}
