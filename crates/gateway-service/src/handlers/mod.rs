//! HTTP request handlers.
//!
//! Handlers are thin: parse the body, hand the resolved identity and input to
//! the `AccessGateway`, serialize the result.

pub mod access_handler;
pub mod auth_handler;
pub mod metrics;
pub mod orchestration_handler;
pub mod service_handler;

pub use metrics::metrics_handler;

/// Liveness probe. Does not touch any state.
pub async fn health_check() -> &'static str {
    "OK"
}
