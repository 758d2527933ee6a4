//! Owner handlers
//!
//! Authorization is the engine's: any authenticated caller may reach these
//! routes and non-owners get `UNAUTHORIZED` back.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::auth::Caller;
use crate::dto::admin::*;
use crate::handlers::{parse_identity, parse_policy_id};
use crate::{publish_events, AppState, error::ApiError};

/// Bans the owner of a delinquent policy
pub async fn ban(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(id): Path<String>,
) -> Result<Json<BanResponse>, ApiError> {
    let policy_id = parse_policy_id(&id)?;

    let mut engine = state.engine.lock().await;
    let banned = engine.ban(caller, policy_id)?;
    publish_events(&mut engine);

    Ok(Json(BanResponse {
        policy_id,
        banned: banned.to_string(),
    }))
}

/// Lifts a ban
pub async fn unban(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(identity): Path<String>,
) -> Result<Json<UnbanResponse>, ApiError> {
    let identity = parse_identity(&identity)?;

    let mut engine = state.engine.lock().await;
    engine.unban(caller, identity)?;
    publish_events(&mut engine);

    Ok(Json(UnbanResponse {
        identity: identity.to_string(),
        banned: engine.is_banned(&identity),
    }))
}

/// Sends the whole custodial balance to the owner
pub async fn withdraw(
    State(state): State<AppState>,
    Caller(caller): Caller,
) -> Result<Json<WithdrawalResponse>, ApiError> {
    let mut engine = state.engine.lock().await;
    let withdrawal = engine.withdraw(caller)?;
    publish_events(&mut engine);

    Ok(Json(withdrawal.into()))
}
