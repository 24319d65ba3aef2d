//! E2E tests for orchestration and orchestration rule updates.

use gateway_test_utils::{
    ResponseAssertions, TestGatewayServer, ADMIN, ORCHESTRATOR, STANDARD_USER,
    TEST_SERVICE_BILLING,
};
use serde_json::json;

#[tokio::test]
async fn test_orchestrate_allowed_roles_echo_parameters() -> Result<(), anyhow::Error> {
    let server = TestGatewayServer::spawn().await?;
    let parameters = json!({ "replicas": 3, "region": "eu-west" });

    for user in [ADMIN, ORCHESTRATOR] {
        let token = server.login(user.username, user.password).await?;
        let body = server
            .client()
            .post(format!("{}/orchestrate", server.url()))
            .bearer_auth(&token)
            .json(&json!({
                "target_service": TEST_SERVICE_BILLING,
                "parameters": parameters
            }))
            .send()
            .await?
            .assert_ok_json()
            .await;

        assert_eq!(
            body["message"],
            format!("Service {} orchestrated successfully", TEST_SERVICE_BILLING)
        );
        assert_eq!(body["parameters"], parameters);
    }

    Ok(())
}

#[tokio::test]
async fn test_orchestrate_standard_user_returns_403() -> Result<(), anyhow::Error> {
    let server = TestGatewayServer::spawn().await?;
    let token = server
        .login(STANDARD_USER.username, STANDARD_USER.password)
        .await?;

    server
        .client()
        .post(format!("{}/orchestrate", server.url()))
        .bearer_auth(&token)
        .json(&json!({ "target_service": TEST_SERVICE_BILLING, "parameters": {} }))
        .send()
        .await?
        .assert_error_code(403, "FORBIDDEN")
        .await;

    Ok(())
}

#[tokio::test]
async fn test_update_rules_only_orchestrator() -> Result<(), anyhow::Error> {
    let server = TestGatewayServer::spawn().await?;
    let rules = json!({ "max_retries": 5, "strategy": "round-robin" });
    let request = json!({ "rules": rules });

    let orchestrator = server
        .login(ORCHESTRATOR.username, ORCHESTRATOR.password)
        .await?;
    let body = server
        .client()
        .put(format!("{}/update-orchestration-rules", server.url()))
        .bearer_auth(&orchestrator)
        .json(&request)
        .send()
        .await?
        .assert_ok_json()
        .await;
    assert_eq!(body["message"], "Orchestration rules updated");
    assert_eq!(body["rules"], rules);

    // Administrator does not inherit this permission
    for user in [ADMIN, STANDARD_USER] {
        let token = server.login(user.username, user.password).await?;
        server
            .client()
            .put(format!("{}/update-orchestration-rules", server.url()))
            .bearer_auth(&token)
            .json(&request)
            .send()
            .await?
            .assert_error_code(403, "FORBIDDEN")
            .await;
    }

    Ok(())
}
