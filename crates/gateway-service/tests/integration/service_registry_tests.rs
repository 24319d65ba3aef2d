//! E2E tests for service registration and lookup.
//!
//! Covers bearer token enforcement on the protected routes as well as the
//! register/view permissions.

use gateway_test_utils::{
    ResponseAssertions, TestGatewayServer, ADMIN, ALL_TEST_USERS, ORCHESTRATOR, STANDARD_USER,
    TEST_SERVICE_BILLING, TEST_SERVICE_INVENTORY,
};
use serde_json::json;

fn billing_descriptor() -> serde_json::Value {
    json!({
        "name": TEST_SERVICE_BILLING,
        "description": "Invoices and payments",
        "endpoints": ["/invoices", "/payments"]
    })
}

// ============================================================================
// Bearer token enforcement
// ============================================================================

#[tokio::test]
async fn test_protected_route_without_header_returns_401() -> Result<(), anyhow::Error> {
    let server = TestGatewayServer::spawn().await?;

    let response = server
        .client()
        .get(format!("{}/service-info/{}", server.url(), TEST_SERVICE_BILLING))
        .send()
        .await?;

    assert_eq!(
        response
            .headers()
            .get("www-authenticate")
            .and_then(|v| v.to_str().ok()),
        Some("Bearer")
    );
    let body = response.assert_error_code(401, "INVALID_TOKEN").await;
    assert_eq!(body["error"]["message"], "Missing Authorization header");

    Ok(())
}

#[tokio::test]
async fn test_protected_route_with_bad_scheme_returns_401() -> Result<(), anyhow::Error> {
    let server = TestGatewayServer::spawn().await?;

    let response = server
        .client()
        .get(format!("{}/service-info/{}", server.url(), TEST_SERVICE_BILLING))
        .header("Authorization", "Basic YWRtaW46MTIzNA==")
        .send()
        .await?;

    let body = response.assert_error_code(401, "INVALID_TOKEN").await;
    assert_eq!(
        body["error"]["message"],
        "Invalid Authorization header format"
    );

    Ok(())
}

#[tokio::test]
async fn test_protected_route_with_guessed_token_returns_401() -> Result<(), anyhow::Error> {
    let server = TestGatewayServer::spawn().await?;
    // A real token exists, but the guessable form must not resolve
    server.login(ADMIN.username, ADMIN.password).await?;

    for guess in ["token_admin", "not-a-real-token"] {
        server
            .client()
            .get(format!("{}/service-info/{}", server.url(), TEST_SERVICE_BILLING))
            .bearer_auth(guess)
            .send()
            .await?
            .assert_error_code(401, "INVALID_TOKEN")
            .await;
    }

    Ok(())
}

#[tokio::test]
async fn test_expired_token_returns_401() -> Result<(), anyhow::Error> {
    let server = TestGatewayServer::spawn_with_vars(&[("GATEWAY_TOKEN_TTL_SECONDS", "1")]).await?;
    let token = server.login(ADMIN.username, ADMIN.password).await?;

    tokio::time::sleep(std::time::Duration::from_millis(1200)).await;

    server
        .client()
        .get(format!("{}/service-info/{}", server.url(), TEST_SERVICE_BILLING))
        .bearer_auth(&token)
        .send()
        .await?
        .assert_error_code(401, "INVALID_TOKEN")
        .await;

    Ok(())
}

// ============================================================================
// Registration and lookup
// ============================================================================

#[tokio::test]
async fn test_admin_registers_then_any_role_views() -> Result<(), anyhow::Error> {
    let server = TestGatewayServer::spawn().await?;
    let admin = server.login(ADMIN.username, ADMIN.password).await?;

    let body = server
        .client()
        .post(format!("{}/register-service", server.url()))
        .bearer_auth(&admin)
        .json(&billing_descriptor())
        .send()
        .await?
        .assert_ok_json()
        .await;
    assert_eq!(body["message"], "Service registered successfully");
    assert_eq!(body["name"], TEST_SERVICE_BILLING);

    for user in ALL_TEST_USERS {
        let token = server.login(user.username, user.password).await?;
        let descriptor = server
            .client()
            .get(format!("{}/service-info/{}", server.url(), TEST_SERVICE_BILLING))
            .bearer_auth(&token)
            .send()
            .await?
            .assert_ok_json()
            .await;
        assert_eq!(descriptor, billing_descriptor(), "viewed by {}", user.username);
    }

    Ok(())
}

#[tokio::test]
async fn test_register_same_name_overwrites() -> Result<(), anyhow::Error> {
    let server = TestGatewayServer::spawn().await?;
    let admin = server.login(ADMIN.username, ADMIN.password).await?;

    let updated = json!({
        "name": TEST_SERVICE_BILLING,
        "description": "Billing v2",
        "endpoints": ["/v2/invoices"]
    });

    for descriptor in [billing_descriptor(), updated.clone()] {
        server
            .client()
            .post(format!("{}/register-service", server.url()))
            .bearer_auth(&admin)
            .json(&descriptor)
            .send()
            .await?
            .assert_ok_json()
            .await;
    }

    let current = server
        .client()
        .get(format!("{}/service-info/{}", server.url(), TEST_SERVICE_BILLING))
        .bearer_auth(&admin)
        .send()
        .await?
        .assert_ok_json()
        .await;
    assert_eq!(current, updated);

    Ok(())
}

#[tokio::test]
async fn test_non_admin_register_returns_403_and_stores_nothing() -> Result<(), anyhow::Error> {
    let server = TestGatewayServer::spawn().await?;

    for user in [ORCHESTRATOR, STANDARD_USER] {
        let token = server.login(user.username, user.password).await?;
        let body = server
            .client()
            .post(format!("{}/register-service", server.url()))
            .bearer_auth(&token)
            .json(&billing_descriptor())
            .send()
            .await?
            .assert_error_code(403, "FORBIDDEN")
            .await;
        assert_eq!(body["error"]["message"], "Permission denied");
    }

    let admin = server.login(ADMIN.username, ADMIN.password).await?;
    server
        .client()
        .get(format!("{}/service-info/{}", server.url(), TEST_SERVICE_BILLING))
        .bearer_auth(&admin)
        .send()
        .await?
        .assert_error_code(404, "NOT_FOUND")
        .await;

    Ok(())
}

#[tokio::test]
async fn test_view_unknown_service_returns_404() -> Result<(), anyhow::Error> {
    let server = TestGatewayServer::spawn().await?;
    let token = server
        .login(STANDARD_USER.username, STANDARD_USER.password)
        .await?;

    server
        .client()
        .get(format!("{}/service-info/{}", server.url(), TEST_SERVICE_INVENTORY))
        .bearer_auth(&token)
        .send()
        .await?
        .assert_error_code(404, "NOT_FOUND")
        .await;

    Ok(())
}
