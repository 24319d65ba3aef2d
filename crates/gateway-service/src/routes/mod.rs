//! HTTP routes for the access gateway.
//!
//! Defines the Axum router and application state.

use crate::config::Config;
use crate::handlers;
use crate::middleware::require_auth;
use crate::services::access_gateway::AccessGateway;
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

pub use crate::observability::metrics::init_metrics_recorder;

/// Application state shared across all handlers.
pub struct AppState {
    /// Authentication, token resolution, policy and the service registry.
    pub gateway: AccessGateway,

    /// Service configuration.
    pub config: Config,
}

/// Build the application routes.
///
/// - `/health` - Liveness probe - public
/// - `/metrics` - Prometheus metrics endpoint - public
/// - `/authenticate` - Login - public
/// - `/service-info/:id`, `/register-service`, `/orchestrate`,
///   `/update-orchestration-rules`, `/authorize-access` - require a bearer token
pub fn build_routes(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let request_timeout = state.config.request_timeout;

    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/authenticate",
            post(handlers::auth_handler::handle_authenticate),
        )
        .with_state(state.clone());

    let metrics_routes = Router::new()
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(metrics_handle);

    let protected_routes = Router::new()
        .route(
            "/service-info/:id",
            get(handlers::service_handler::handle_get_service),
        )
        .route(
            "/register-service",
            post(handlers::service_handler::handle_register_service),
        )
        .route(
            "/orchestrate",
            post(handlers::orchestration_handler::handle_orchestrate),
        )
        .route(
            "/update-orchestration-rules",
            put(handlers::orchestration_handler::handle_update_rules),
        )
        .route(
            "/authorize-access",
            post(handlers::access_handler::handle_authorize_access),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state);

    // Layer order (bottom-to-top execution):
    // 1. TimeoutLayer - Timeout the request (innermost)
    // 2. TraceLayer - Log request details
    public_routes
        .merge(metrics_routes)
        .merge(protected_routes)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}
