//! Metrics definitions for the gateway
//!
//! All metrics follow Prometheus naming conventions:
//! - `gw_` prefix
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Cardinality
//!
//! Labels are bounded:
//! - `status`: success, error
//! - `error_category`: see `ErrorCategory`
//! - `operation`: the five guarded operations
//! - `decision`: allowed, denied
//! - `outcome`: created, replaced

use super::ErrorCategory;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Install the global Prometheus recorder.
///
/// Fails if a recorder is already installed in this process.
pub fn init_metrics_recorder() -> Result<PrometheusHandle, String> {
    PrometheusBuilder::new()
        // Token issuance is in-memory; sub-millisecond is the norm
        .set_buckets_for_metric(
            Matcher::Prefix("gw_token_issuance".to_string()),
            &[
                0.0001, 0.0005, 0.001, 0.0025, 0.005, 0.010, 0.025, 0.050, 0.100,
            ],
        )
        .map_err(|e| format!("Failed to set token issuance buckets: {e}"))?
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {e}"))
}

// ============================================================================
// Token Metrics
// ============================================================================

/// Record token issuance duration and outcome
///
/// Metric: `gw_token_issuance_duration_seconds`, `gw_token_issuance_total`
/// Labels: `status`
pub fn record_token_issuance(status: &str, duration: Duration) {
    histogram!("gw_token_issuance_duration_seconds", "status" => status.to_string())
        .record(duration.as_secs_f64());

    counter!("gw_token_issuance_total", "status" => status.to_string()).increment(1);
}

/// Record token validation result
///
/// Metric: `gw_token_validations_total`
/// Labels: `status`, `error_category`
pub fn record_token_validation(status: &str, error_category: Option<&str>) {
    let category = error_category.unwrap_or("none");
    counter!("gw_token_validations_total", "status" => status.to_string(), "error_category" => category.to_string())
        .increment(1);
}

/// Metric: `gw_live_tokens`
pub fn set_live_tokens(count: usize) {
    gauge!("gw_live_tokens").set(count as f64);
}

// ============================================================================
// Authorization Metrics
// ============================================================================

/// Record a policy decision
///
/// Metric: `gw_authorization_decisions_total`
/// Labels: `operation`, `decision`
pub fn record_authorization_decision(operation: &str, decision: &str) {
    counter!("gw_authorization_decisions_total", "operation" => operation.to_string(), "decision" => decision.to_string())
        .increment(1);
}

// ============================================================================
// Registry Metrics
// ============================================================================

/// Metric: `gw_service_registrations_total`
/// Labels: `outcome` (created, replaced)
pub fn record_service_registration(outcome: &str) {
    counter!("gw_service_registrations_total", "outcome" => outcome.to_string()).increment(1);
}

/// Metric: `gw_registered_services`
pub fn set_registered_services(count: usize) {
    gauge!("gw_registered_services").set(count as f64);
}

// ============================================================================
// Error Metrics
// ============================================================================

/// Metric: `gw_errors_total`
/// Labels: `error_category`
pub fn record_error(category: ErrorCategory) {
    counter!("gw_errors_total", "error_category" => category.as_str()).increment(1);
}
