//! E2E tests for login and bearer token handling.
//!
//! ## Test Naming
//!
//! Tests follow the convention: `test_<feature>_<scenario>_<expected_result>`

use gateway_test_utils::{
    ResponseAssertions, TestGatewayServer, ADMIN, ALL_TEST_USERS, STANDARD_USER,
};
use reqwest::StatusCode;
use serde_json::json;
use std::collections::HashSet;

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_seeded_users_returns_bearer_token() -> Result<(), anyhow::Error> {
    let server = TestGatewayServer::spawn().await?;

    for user in ALL_TEST_USERS {
        let body = server
            .client()
            .post(format!("{}/authenticate", server.url()))
            .json(&json!({ "username": user.username, "password": user.password }))
            .send()
            .await?
            .assert_ok_json()
            .await;

        let token = body["access_token"].as_str().unwrap_or_default();
        assert!(!token.is_empty(), "{} should receive a token", user.username);
        assert!(
            !token.contains(user.username),
            "token must not embed the username"
        );
        assert_eq!(body["token_type"], "Bearer");
        assert!(
            body.get("expires_in").is_none(),
            "no TTL configured, expires_in should be omitted"
        );
    }

    Ok(())
}

#[tokio::test]
async fn test_login_reports_configured_ttl() -> Result<(), anyhow::Error> {
    let server =
        TestGatewayServer::spawn_with_vars(&[("GATEWAY_TOKEN_TTL_SECONDS", "600")]).await?;

    let body = server
        .client()
        .post(format!("{}/authenticate", server.url()))
        .json(&json!({ "username": ADMIN.username, "password": ADMIN.password }))
        .send()
        .await?
        .assert_ok_json()
        .await;

    assert_eq!(body["expires_in"].as_u64(), Some(600));

    Ok(())
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() -> Result<(), anyhow::Error> {
    let server = TestGatewayServer::spawn().await?;

    let wrong_password = server
        .client()
        .post(format!("{}/authenticate", server.url()))
        .json(&json!({ "username": "admin", "password": "wrong" }))
        .send()
        .await?
        .assert_error_code(401, "INVALID_CREDENTIALS")
        .await;

    let unknown_user = server
        .client()
        .post(format!("{}/authenticate", server.url()))
        .json(&json!({ "username": "mallory", "password": "1234" }))
        .send()
        .await?
        .assert_error_code(401, "INVALID_CREDENTIALS")
        .await;

    assert_eq!(wrong_password, unknown_user, "bodies must be identical");

    Ok(())
}

#[tokio::test]
async fn test_login_malformed_body_is_rejected() -> Result<(), anyhow::Error> {
    let server = TestGatewayServer::spawn().await?;

    let response = server
        .client()
        .post(format!("{}/authenticate", server.url()))
        .json(&json!({ "username": "admin" }))
        .send()
        .await?;

    assert!(response.status().is_client_error());

    Ok(())
}

#[tokio::test]
async fn test_login_repeated_yields_distinct_live_tokens() -> Result<(), anyhow::Error> {
    let server = TestGatewayServer::spawn().await?;

    let first = server.login(STANDARD_USER.username, STANDARD_USER.password).await?;
    let second = server.login(STANDARD_USER.username, STANDARD_USER.password).await?;
    assert_ne!(first, second);

    for token in [&first, &second] {
        let response = server
            .client()
            .post(format!("{}/authorize-access", server.url()))
            .bearer_auth(token)
            .json(&json!({ "resources": ["reports"], "role": STANDARD_USER.role }))
            .send()
            .await?;
        assert_eq!(response.status(), StatusCode::OK);
    }

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_login_concurrent_tokens_are_unique() -> Result<(), anyhow::Error> {
    const LOGINS: usize = 50;
    let server = TestGatewayServer::spawn().await?;
    let url = format!("{}/authenticate", server.url());

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..LOGINS {
        let client = server.client().clone();
        let url = url.clone();
        tasks.spawn(async move {
            let body: serde_json::Value = client
                .post(url)
                .json(&json!({ "username": ADMIN.username, "password": ADMIN.password }))
                .send()
                .await?
                .json()
                .await?;
            Ok::<_, anyhow::Error>(body["access_token"].as_str().unwrap_or_default().to_string())
        });
    }

    let mut tokens = HashSet::new();
    while let Some(result) = tasks.join_next().await {
        let token = result??;
        assert!(!token.is_empty());
        tokens.insert(token);
    }
    assert_eq!(tokens.len(), LOGINS, "every login must yield a distinct token");

    Ok(())
}
