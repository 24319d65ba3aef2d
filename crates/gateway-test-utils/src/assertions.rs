//! Custom test assertions for gateway responses
//!
//! Every gateway failure has the body `{"error": {"code", "message"}}`.

use std::future::Future;

/// Assertions on a `reqwest::Response` that consume it.
///
/// # Example
/// ```rust,ignore
/// response.assert_error_code(403, "FORBIDDEN").await;
/// ```
pub trait ResponseAssertions {
    /// Assert the status and the `error.code` field, returning the parsed body.
    fn assert_error_code(
        self,
        status: u16,
        code: &str,
    ) -> impl Future<Output = serde_json::Value> + Send;

    /// Assert a 200 response and return the parsed JSON body.
    fn assert_ok_json(self) -> impl Future<Output = serde_json::Value> + Send;
}

impl ResponseAssertions for reqwest::Response {
    async fn assert_error_code(self, status: u16, code: &str) -> serde_json::Value {
        let actual = self.status().as_u16();
        let body: serde_json::Value = self.json().await.expect("error body should be JSON");

        assert_eq!(actual, status, "unexpected status, body: {}", body);
        assert_eq!(
            body["error"]["code"].as_str(),
            Some(code),
            "unexpected error code, body: {}",
            body
        );
        assert!(
            body["error"]["message"].is_string(),
            "error body must carry a message: {}",
            body
        );
        body
    }

    async fn assert_ok_json(self) -> serde_json::Value {
        let actual = self.status().as_u16();
        let body: serde_json::Value = self.json().await.expect("body should be JSON");
        assert_eq!(actual, 200, "expected 200, body: {}", body);
        body
    }
}
