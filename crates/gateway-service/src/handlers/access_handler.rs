use crate::errors::GatewayError;
use crate::models::{AuthorizeAccessResponse, Identity};
use crate::routes::AppState;
use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct AuthorizeAccessRequest {
    pub resources: Vec<String>,
    /// Role the caller claims. Kept as a raw string: an unknown role name is
    /// a policy denial (403), not a malformed body.
    pub role: String,
}

/// Handle resource access authorization
///
/// POST /authorize-access
#[tracing::instrument(skip_all, name = "gw.handlers.authorize_access")]
pub async fn handle_authorize_access(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<AuthorizeAccessRequest>,
) -> Result<Json<AuthorizeAccessResponse>, GatewayError> {
    let response = state
        .gateway
        .authorize_access(&identity, &payload.role, payload.resources)?;
    Ok(Json(response))
}
