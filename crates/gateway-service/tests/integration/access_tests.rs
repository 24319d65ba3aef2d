//! E2E tests for resource access authorization.
//!
//! The default mode allows the request only when the claimed role equals the
//! caller's own role. The `resource-rules` mode checks each resource against
//! per-role patterns instead.

use gateway_test_utils::{
    ResponseAssertions, TestGatewayServer, ADMIN, ALL_TEST_USERS, ORCHESTRATOR, STANDARD_USER,
};
use serde_json::json;

#[tokio::test]
async fn test_self_claim_is_authorized_for_every_role() -> Result<(), anyhow::Error> {
    let server = TestGatewayServer::spawn().await?;

    for user in ALL_TEST_USERS {
        let token = server.login(user.username, user.password).await?;
        let body = server
            .client()
            .post(format!("{}/authorize-access", server.url()))
            .bearer_auth(&token)
            .json(&json!({ "resources": ["db", "cache"], "role": user.role }))
            .send()
            .await?
            .assert_ok_json()
            .await;

        assert_eq!(body["message"], "Access authorized");
        assert_eq!(body["resources"], json!(["db", "cache"]));
    }

    Ok(())
}

#[tokio::test]
async fn test_claiming_another_role_returns_403() -> Result<(), anyhow::Error> {
    let server = TestGatewayServer::spawn().await?;
    let token = server
        .login(STANDARD_USER.username, STANDARD_USER.password)
        .await?;

    for claimed in [ADMIN.role, ORCHESTRATOR.role, "Superuser", ""] {
        server
            .client()
            .post(format!("{}/authorize-access", server.url()))
            .bearer_auth(&token)
            .json(&json!({ "resources": ["db"], "role": claimed }))
            .send()
            .await?
            .assert_error_code(403, "FORBIDDEN")
            .await;
    }

    Ok(())
}

#[tokio::test]
async fn test_resource_rules_mode_checks_patterns() -> Result<(), anyhow::Error> {
    let server = TestGatewayServer::spawn_with_vars(&[
        ("GATEWAY_RESOURCE_ACCESS_MODE", "resource-rules"),
        (
            "GATEWAY_RESOURCE_RULES",
            "Administrator=*;Orchestrator=services/*|rules/*",
        ),
    ])
    .await?;

    let orchestrator = server
        .login(ORCHESTRATOR.username, ORCHESTRATOR.password)
        .await?;

    // The claimed role no longer matters
    server
        .client()
        .post(format!("{}/authorize-access", server.url()))
        .bearer_auth(&orchestrator)
        .json(&json!({ "resources": ["services/billing", "rules/retry"], "role": ADMIN.role }))
        .send()
        .await?
        .assert_ok_json()
        .await;

    server
        .client()
        .post(format!("{}/authorize-access", server.url()))
        .bearer_auth(&orchestrator)
        .json(&json!({ "resources": ["services/billing", "secrets/keys"], "role": ORCHESTRATOR.role }))
        .send()
        .await?
        .assert_error_code(403, "FORBIDDEN")
        .await;

    let user = server
        .login(STANDARD_USER.username, STANDARD_USER.password)
        .await?;
    server
        .client()
        .post(format!("{}/authorize-access", server.url()))
        .bearer_auth(&user)
        .json(&json!({ "resources": ["services/billing"], "role": STANDARD_USER.role }))
        .send()
        .await?
        .assert_error_code(403, "FORBIDDEN")
        .await;

    Ok(())
}
