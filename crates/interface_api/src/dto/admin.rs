//! Owner operation DTOs

use serde::{Deserialize, Serialize};

use core_kernel::PolicyId;
use domain_settlement::Withdrawal;

use super::ValueDto;

#[derive(Debug, Serialize, Deserialize)]
pub struct BanResponse {
    pub policy_id: PolicyId,
    pub banned: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UnbanResponse {
    pub identity: String,
    pub banned: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WithdrawalResponse {
    pub owner: String,
    pub withdrawn: ValueDto,
    /// Absent when there was nothing to withdraw
    pub transfer_id: Option<String>,
}

impl From<Withdrawal> for WithdrawalResponse {
    fn from(withdrawal: Withdrawal) -> Self {
        Self {
            owner: withdrawal.owner.to_string(),
            withdrawn: withdrawal.amount.into(),
            transfer_id: withdrawal.receipt.map(|r| r.id.to_string()),
        }
    }
}
