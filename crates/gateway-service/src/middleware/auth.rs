//! Authentication middleware for protected routes.
//!
//! Extracts the bearer token from the `Authorization` header, resolves it to
//! an [`Identity`] and stores the identity in request extensions. Handlers
//! behind this layer take `Extension<Identity>` and run the policy check for
//! their own operation.

use crate::errors::GatewayError;
use crate::models::Identity;
use crate::routes::AppState;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::instrument;

/// Reject the request with 401 unless it carries a live bearer token.
#[instrument(skip_all, name = "gw.middleware.auth")]
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, GatewayError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let identity: Identity = state.gateway.resolve_bearer(header).await?;

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
