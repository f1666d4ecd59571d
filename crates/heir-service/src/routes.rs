//! Axum router and HTTP handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServiceConfig;
use crate::error::ApiError;
use crate::schema::{CalculationRequest, CalculationResponse};
use crate::AppState;

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(health))
        .route("/calculate", post(calculate))
        .route("/calculate-inheritance", post(calculate))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn cors_layer(config: &ServiceConfig) -> CorsLayer {
    let origin = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        match HeaderValue::from_str(config.allowed_origin.trim()) {
            Ok(value) => AllowOrigin::exact(value),
            Err(_) => {
                warn!(origin = %config.allowed_origin, "invalid CORS origin; cross-origin requests disabled");
                AllowOrigin::list(Vec::<HeaderValue>::new())
            }
        }
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /health`: liveness probe.
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

/// `POST /calculate`: distribute an estate over the submitted tree.
async fn calculate(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Result<Json<CalculationResponse>, ApiError> {
    let Json(request) = payload?;
    let (tree, estate) = request.into_parts()?;

    let calculation = state.calculator.calculate(tree, estate)?;

    info!(
        decedent = %calculation.tree.decedent().id,
        estate,
        degree = %calculation.degree,
        heirs = calculation.allocation.len(),
        distributed = calculation.total_distributed,
        "calculation served"
    );
    Ok(Json(CalculationResponse::from(&calculation)))
}
