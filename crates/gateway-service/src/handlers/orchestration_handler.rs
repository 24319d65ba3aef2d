use crate::errors::GatewayError;
use crate::models::{Identity, OrchestrateResponse, UpdateRulesResponse};
use crate::routes::AppState;
use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct OrchestrateRequest {
    pub target_service: String,
    pub parameters: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRulesRequest {
    pub rules: Map<String, Value>,
}

/// Handle orchestration (Administrator, Orchestrator)
///
/// POST /orchestrate
#[tracing::instrument(skip_all, name = "gw.handlers.orchestrate")]
pub async fn handle_orchestrate(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<OrchestrateRequest>,
) -> Result<Json<OrchestrateResponse>, GatewayError> {
    let response =
        state
            .gateway
            .orchestrate(&identity, &payload.target_service, payload.parameters)?;
    Ok(Json(response))
}

/// Handle orchestration rule update (Orchestrator only)
///
/// PUT /update-orchestration-rules
#[tracing::instrument(skip_all, name = "gw.handlers.update_orchestration_rules")]
pub async fn handle_update_rules(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<UpdateRulesRequest>,
) -> Result<Json<UpdateRulesResponse>, GatewayError> {
    let response = state
        .gateway
        .update_orchestration_rules(&identity, payload.rules)?;
    Ok(Json(response))
}
