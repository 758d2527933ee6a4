//! Customer handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::auth::Caller;
use crate::dto::customer::*;
use crate::handlers::parse_identity;
use crate::{publish_events, AppState, error::ApiError};

/// Registers the caller
pub async fn register(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<CustomerResponse>), ApiError> {
    let mut engine = state.engine.lock().await;
    let customer = engine.register(caller, request.into())?;
    publish_events(&mut engine);

    Ok((StatusCode::CREATED, Json(CustomerResponse::from(&customer))))
}

/// Gets a customer's registration record
pub async fn get_customer(
    State(state): State<AppState>,
    Path(identity): Path<String>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let identity = parse_identity(&identity)?;
    let engine = state.engine.lock().await;

    engine
        .customer_information(&identity)
        .map(|c| Json(CustomerResponse::from(c)))
        .ok_or_else(|| ApiError::NotFound(format!("Customer {identity} not registered")))
}

/// Lists the policy ids an identity has opened
pub async fn customer_policies(
    State(state): State<AppState>,
    Path(identity): Path<String>,
) -> Result<Json<CustomerPoliciesResponse>, ApiError> {
    let identity = parse_identity(&identity)?;
    let engine = state.engine.lock().await;

    Ok(Json(CustomerPoliciesResponse {
        identity: identity.to_string(),
        policy_ids: engine.customer_policy_ids(&identity).to_vec(),
    }))
}
