//! HTTP API Layer
//!
//! This crate exposes the vehicle insurance engine over REST using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: One module per engine area (customers, policies, settlement, admin)
//! - **Middleware**: Authentication, tracing, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Engine failures mapped to status codes with stable error codes
//!
//! The engine sits behind a single async mutex, so requests run one engine
//! call at a time and never observe a half-applied call.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(engine, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use core_kernel::ValueTransfer;
use domain_settlement::{EngineEvent, InsuranceEngine};

use crate::config::ApiConfig;
use crate::middleware::{auth_middleware, audit_middleware};
use crate::handlers::{admin, customers, health, policies, settlement};

/// The engine as served over HTTP, settling through a boxed rail
pub type ApiEngine = InsuranceEngine<Box<dyn ValueTransfer>>;

/// Engine handle shared across requests
pub type SharedEngine = Arc<Mutex<ApiEngine>>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: SharedEngine,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `engine` - The engine every request operates on
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(engine: SharedEngine, config: ApiConfig) -> Router {
    let state = AppState { engine, config };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check));

    let customer_routes = Router::new()
        .route("/", post(customers::register))
        .route("/:identity", get(customers::get_customer))
        .route("/:identity/policies", get(customers::customer_policies));

    let policy_routes = Router::new()
        .route("/", post(policies::create_insurance))
        .route("/count", get(policies::total_policies))
        .route("/:id", get(policies::get_policy))
        .route("/:id/premiums", post(settlement::pay_monthly_premium))
        .route("/:id/claims", post(settlement::claim_insurance));

    let admin_routes = Router::new()
        .route("/policies/:id/ban", post(admin::ban))
        .route("/customers/:identity/unban", post(admin::unban))
        .route("/withdraw", post(admin::withdraw));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/customers", customer_routes)
        .nest("/policies", policy_routes)
        .nest("/admin", admin_routes)
        .route("/plates/:plate", get(policies::plate_status))
        .route("/deposits", post(settlement::deposit))
        .route("/treasury", get(settlement::treasury))
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Drains the engine's events into the log
pub(crate) fn publish_events(engine: &mut ApiEngine) {
    for event in engine.take_events() {
        log_event(&event);
    }
}

fn log_event(event: &EngineEvent) {
    match event.policy_id() {
        Some(policy_id) => tracing::info!(
            event = event.name(),
            policy_id = %policy_id,
            at = %event.timestamp(),
            "Engine event"
        ),
        None => tracing::info!(event = event.name(), at = %event.timestamp(), "Engine event"),
    }
}
