//! # Gateway Test Utilities
//!
//! Shared test utilities for the access gateway.
//!
//! This crate provides:
//! - Server test harness (TestGatewayServer for E2E tests)
//! - Seeded test credentials
//! - Custom assertions for gateway error responses
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gateway_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), anyhow::Error> {
//!     let server = TestGatewayServer::spawn().await?;
//!     let token = server.login(ADMIN.username, ADMIN.password).await?;
//!
//!     let response = server
//!         .client()
//!         .get(format!("{}/service-info/billing", server.url()))
//!         .bearer_auth(&token)
//!         .send()
//!         .await?;
//!     response.assert_error_code(404, "NOT_FOUND").await;
//!     Ok(())
//! }
//! ```

pub mod assertions;
pub mod server_harness;
pub mod test_ids;

// Re-export commonly used items
pub use assertions::*;
pub use server_harness::*;
pub use test_ids::*;
