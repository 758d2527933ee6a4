//! Policy handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use domain_settlement::EngineError;

use crate::auth::Caller;
use crate::dto::policy::*;
use crate::handlers::parse_policy_id;
use crate::{publish_events, AppState, error::ApiError};

/// Opens a policy for the caller
pub async fn create_insurance(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(request): Json<CreatePolicyRequest>,
) -> Result<(StatusCode, Json<PolicyResponse>), ApiError> {
    let new_policy = request.into_new_policy().map_err(EngineError::from)?;

    let mut engine = state.engine.lock().await;
    let policy = engine.create_insurance(caller, new_policy)?;
    publish_events(&mut engine);

    Ok((StatusCode::CREATED, Json(PolicyResponse::new(&policy, engine.currency()))))
}

/// Gets a policy by id
pub async fn get_policy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PolicyResponse>, ApiError> {
    let policy_id = parse_policy_id(&id)?;
    let engine = state.engine.lock().await;

    let policy = engine
        .get_policy(policy_id)
        .ok_or_else(|| EngineError::PolicyNotFound(policy_id.to_string()))?;

    Ok(Json(PolicyResponse::new(policy, engine.currency())))
}

/// Number of policies ever created
pub async fn total_policies(State(state): State<AppState>) -> Json<PolicyCountResponse> {
    let engine = state.engine.lock().await;
    Json(PolicyCountResponse {
        total: engine.total_policies(),
    })
}

/// Whether a plate has ever been insured
pub async fn plate_status(
    State(state): State<AppState>,
    Path(plate): Path<String>,
) -> Json<PlateStatusResponse> {
    let engine = state.engine.lock().await;
    let registered = engine.has_been_registered(&plate);
    Json(PlateStatusResponse { plate, registered })
}
