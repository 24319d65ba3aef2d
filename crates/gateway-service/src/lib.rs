//! Access Gateway Service Library
//!
//! A small HTTP gateway that authenticates callers, issues opaque bearer
//! tokens, and enforces role-based access control over a set of
//! service-management operations:
//!
//! - Login against a seeded credential store
//! - Service descriptor registration and lookup
//! - Orchestration requests and orchestration rule updates
//! - Resource access authorization
//!
//! # Architecture
//!
//! Handler -> Service -> Repository:
//!
//! ```text
//! routes/mod.rs -> handlers/*.rs -> services/access_gateway.rs -> repositories/*.rs
//! ```
//!
//! Token resolution happens once per request in `middleware::require_auth`;
//! each gateway operation then checks the `AuthorizationPolicy` before it
//! touches any state.
//!
//! # Modules
//!
//! - `config` - Service configuration from environment
//! - `crypto` - Token generation and secret digests
//! - `errors` - Error types with HTTP status code mapping
//! - `handlers` - HTTP request handlers
//! - `middleware` - Bearer token authentication
//! - `models` - Roles, identities, operations and wire types
//! - `observability` - Metrics and log-safe hashing
//! - `repositories` - In-memory credential, token and service stores
//! - `routes` - Axum router setup
//! - `services` - Authentication, token issuance, policy and the gateway

pub mod config;
pub mod crypto;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod routes;
pub mod services;
