use crate::errors::GatewayError;
use crate::models::TokenResponse;
use crate::routes::AppState;
use axum::{extract::State, Json};
use common::secret::SecretString;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: SecretString,
}

/// Handle login
///
/// POST /authenticate
#[tracing::instrument(skip_all, name = "gw.handlers.authenticate")]
pub async fn handle_authenticate(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, GatewayError> {
    let token = state
        .gateway
        .authenticate(&payload.username, &payload.password)
        .await?;

    Ok(Json(token.into()))
}
