//! Test server harness for E2E testing
//!
//! Provides TestGatewayServer for spawning real gateway instances in tests.

use anyhow::Context;
use gateway_service::config::Config;
use gateway_service::routes::{self, AppState};
use gateway_service::services::access_gateway::AccessGateway;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Test harness for spawning the gateway in E2E tests
///
/// Each instance owns its own in-memory stores, so tests never share tokens
/// or registered services.
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_login_e2e() -> Result<(), anyhow::Error> {
///     let server = TestGatewayServer::spawn().await?;
///     let token = server.login("admin", "1234").await?;
///     assert!(!token.is_empty());
///     Ok(())
/// }
/// ```
pub struct TestGatewayServer {
    addr: SocketAddr,
    config: Config,
    client: reqwest::Client,
    _handle: JoinHandle<()>,
}

impl TestGatewayServer {
    /// Spawn a server with the development seed and default settings.
    pub async fn spawn() -> Result<Self, anyhow::Error> {
        Self::spawn_with_vars(&[]).await
    }

    /// Spawn a server configured from the given `GATEWAY_*` variables.
    ///
    /// The process environment is not consulted.
    pub async fn spawn_with_vars(vars: &[(&str, &str)]) -> Result<Self, anyhow::Error> {
        let mut vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        vars.insert("BIND_ADDRESS".to_string(), "127.0.0.1:0".to_string());

        let config = Config::from_vars(&vars).context("Invalid test configuration")?;
        Self::spawn_with_config(config).await
    }

    /// Spawn a server with an explicit configuration.
    pub async fn spawn_with_config(config: Config) -> Result<Self, anyhow::Error> {
        let gateway = AccessGateway::from_config(&config)
            .map_err(|e| anyhow::anyhow!("Failed to build gateway: {}", e))?;

        let state = Arc::new(AppState {
            gateway,
            config: config.clone(),
        });

        // The global recorder can only be installed once per process. Later
        // servers get a standalone recorder that is never installed.
        let metrics_handle = match routes::init_metrics_recorder() {
            Ok(handle) => handle,
            Err(_) => {
                use metrics_exporter_prometheus::PrometheusBuilder;
                PrometheusBuilder::new().build_recorder().handle()
            }
        };

        let app = routes::build_routes(state, metrics_handle);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            config,
            client: reqwest::Client::new(),
            _handle: handle,
        })
    }

    /// Get the base URL of the test server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the socket address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Get reference to the server configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shared HTTP client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Log in and return the bearer token value.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, anyhow::Error> {
        let response = self
            .client
            .post(format!("{}/authenticate", self.url()))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!(
                "Login for {} failed with {}: {}",
                username,
                status,
                response.text().await.unwrap_or_default()
            );
        }

        let body: serde_json::Value = response.json().await?;
        body["access_token"]
            .as_str()
            .map(str::to_string)
            .context("Login response missing access_token")
    }

    /// Value for an `Authorization` header carrying `token`.
    pub fn auth_header(token: &str) -> String {
        common::bearer::bearer_header(token)
    }
}

impl Drop for TestGatewayServer {
    fn drop(&mut self) {
        self._handle.abort();
    }
}
