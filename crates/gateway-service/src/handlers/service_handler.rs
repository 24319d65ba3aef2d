use crate::errors::GatewayError;
use crate::models::{Identity, RegisterServiceResponse, ServiceDescriptor};
use crate::routes::AppState;
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct RegisterServiceRequest {
    pub name: String,
    pub description: String,
    pub endpoints: Vec<String>,
}

impl From<RegisterServiceRequest> for ServiceDescriptor {
    fn from(request: RegisterServiceRequest) -> Self {
        ServiceDescriptor {
            name: request.name,
            description: request.description,
            endpoints: request.endpoints,
        }
    }
}

/// Handle service lookup
///
/// GET /service-info/{id}
#[tracing::instrument(skip_all, name = "gw.handlers.get_service")]
pub async fn handle_get_service(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<Json<ServiceDescriptor>, GatewayError> {
    let descriptor = state.gateway.view_service(&identity, &id).await?;
    Ok(Json(descriptor))
}

/// Handle service registration (Administrator only)
///
/// POST /register-service
#[tracing::instrument(skip_all, name = "gw.handlers.register_service")]
pub async fn handle_register_service(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<RegisterServiceRequest>,
) -> Result<Json<RegisterServiceResponse>, GatewayError> {
    let response = state
        .gateway
        .register_service(&identity, payload.into())
        .await?;
    Ok(Json(response))
}
