//! Request handlers

pub mod admin;
pub mod customers;
pub mod health;
pub mod policies;
pub mod settlement;

use core_kernel::{Identity, PolicyId};

use crate::error::ApiError;

/// Parses a policy id given as "POL-7" or "7"
pub(crate) fn parse_policy_id(raw: &str) -> Result<PolicyId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid policy id: {raw}")))
}

/// Parses an identity given as "IDN-<uuid>" or a bare uuid
pub(crate) fn parse_identity(raw: &str) -> Result<Identity, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid identity: {raw}")))
}
