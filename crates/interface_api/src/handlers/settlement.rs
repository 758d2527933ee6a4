//! Premium, claim and deposit handlers

use axum::{
    extract::{Path, State},
    Json,
};

use crate::auth::Caller;
use crate::dto::settlement::*;
use crate::dto::ValueDto;
use crate::handlers::parse_policy_id;
use crate::{publish_events, AppState, error::ApiError};

/// Pays one monthly premium with the attached value
pub async fn pay_monthly_premium(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(id): Path<String>,
    Json(request): Json<PayPremiumRequest>,
) -> Result<Json<PremiumPaymentResponse>, ApiError> {
    let policy_id = parse_policy_id(&id)?;

    let mut engine = state.engine.lock().await;
    let attached = request.value.to_money(engine.currency())?;
    let payment = engine.pay_monthly_premium(caller, policy_id, attached)?;
    publish_events(&mut engine);

    Ok(Json(payment.into()))
}

/// Claims the policy's single payout
pub async fn claim_insurance(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(id): Path<String>,
    Json(request): Json<ClaimInsuranceRequest>,
) -> Result<Json<ClaimSettlementResponse>, ApiError> {
    let policy_id = parse_policy_id(&id)?;

    let mut engine = state.engine.lock().await;
    let claim = request.into_claim(engine.currency())?;
    let settlement = engine.claim_insurance(caller, policy_id, claim)?;
    publish_events(&mut engine);

    Ok(Json(settlement.into()))
}

/// Accepts an unsolicited deposit into the custodial balance
pub async fn deposit(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(request): Json<DepositRequest>,
) -> Result<Json<TreasuryResponse>, ApiError> {
    let mut engine = state.engine.lock().await;
    let amount = request.value.to_money(engine.currency())?;
    let balance = engine.receive(caller, amount)?;
    publish_events(&mut engine);

    Ok(Json(TreasuryResponse {
        owner: engine.owner().to_string(),
        custodial_balance: ValueDto::from(balance),
    }))
}

/// Current custodial balance
pub async fn treasury(State(state): State<AppState>) -> Json<TreasuryResponse> {
    let engine = state.engine.lock().await;
    Json(TreasuryResponse {
        owner: engine.owner().to_string(),
        custodial_balance: ValueDto::from(engine.custodial_balance()),
    })
}
