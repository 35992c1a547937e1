//! Packaged generic REST operations
//!
//! The registry replaces reflective SDK dispatch with statically-registered
//! capabilities, and this module provides the set shipped with the service
//! binary: a generic `"http"` client whose methods call arbitrary REST
//! endpoints. Deployments wrap their cloud APIs by registering further
//! clients through [`OperationRegistry::register`].
//!
//! Parameter shape:
//!
//! ```json
//! {
//!   "Url": "https://api.example/v1/things",
//!   "Headers": { "authorization": "Bearer ..." },
//!   "Json": { "Name": "thing-1" }
//! }
//! ```
//!
//! `Json` takes precedence over `Body` (a raw string). The response tree is
//! `{ "StatusCode": n, "Headers": {...}, "Body": parsed-json-or-string }`;
//! a non-2xx status is an invocation error, since the external operation
//! itself failed.

use crate::registry::OperationRegistry;
use serde_json::{Map, Value, json};
use stackhook_core::{InvocationError, OperationFn, OperationFuture, OperationResult};
use std::sync::Arc;
use tracing::debug;

/// HTTP methods exposed under the `"http"` client
const HTTP_METHODS: [&str; 4] = ["get", "post", "put", "delete"];

/// Register the packaged `"http"` client on a registry
pub fn register_http_client(registry: &mut OperationRegistry) {
    for method in HTTP_METHODS {
        registry.register("http", method, http_operation(method));
    }
}

fn http_operation(method: &'static str) -> OperationFn {
    Arc::new(move |params: Value| {
        Box::pin(async move { execute_http(method, params).await }) as OperationFuture
    })
}

async fn execute_http(method: &str, params: Value) -> OperationResult {
    let url = params["Url"]
        .as_str()
        .ok_or_else(|| InvocationError::new("missing 'Url' parameter"))?;
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(InvocationError::new(
            "'Url' must start with http:// or https://",
        ));
    }

    let client = reqwest::Client::new();
    let mut request = match method {
        "get" => client.get(url),
        "post" => client.post(url),
        "put" => client.put(url),
        "delete" => client.delete(url),
        other => {
            return Err(InvocationError::new(format!(
                "unsupported http method: {other}"
            )));
        }
    };

    if let Some(headers) = params["Headers"].as_object() {
        for (key, value) in headers {
            if let Some(value) = value.as_str() {
                request = request.header(key, value);
            }
        }
    }

    if let Some(body) = params.get("Json").filter(|v| !v.is_null()) {
        request = request.json(body);
    } else if let Some(body) = params["Body"].as_str() {
        request = request.body(body.to_string());
    }

    debug!(method, url, "calling external endpoint");
    let response = request
        .send()
        .await
        .map_err(|e| InvocationError::new(format!("request failed: {e}")))?;

    let status = response.status();
    let headers: Map<String, Value> = response
        .headers()
        .iter()
        .map(|(k, v)| {
            (
                k.as_str().to_string(),
                Value::String(v.to_str().unwrap_or("<invalid>").to_string()),
            )
        })
        .collect();

    let text = response
        .text()
        .await
        .map_err(|e| InvocationError::new(format!("failed to read response body: {e}")))?;

    if !status.is_success() {
        return Err(InvocationError::new(format!(
            "endpoint returned {status}: {text}"
        )));
    }

    let body = serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text));
    Ok(json!({
        "StatusCode": status.as_u16(),
        "Headers": headers,
        "Body": body,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_registers_all_methods() {
        let mut registry = OperationRegistry::new();
        register_http_client(&mut registry);
        for m in HTTP_METHODS {
            assert!(registry.contains("http", m));
        }
    }

    #[tokio::test]
    async fn test_get_returns_parsed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/account"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Account": {"Name": "acct-1"}
            })))
            .mount(&server)
            .await;

        let response = execute_http("get", json!({"Url": format!("{}/v1/account", server.uri())}))
            .await
            .expect("should succeed");
        assert_eq!(response["StatusCode"], 200);
        assert_eq!(response["Body"]["Account"]["Name"], "acct-1");
    }

    #[tokio::test]
    async fn test_post_sends_json_and_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/things"))
            .and(header("x-api-key", "secret"))
            .and(body_json(json!({"Name": "thing-1"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"Id": "t-1"})))
            .expect(1)
            .mount(&server)
            .await;

        let response = execute_http(
            "post",
            json!({
                "Url": format!("{}/v1/things", server.uri()),
                "Headers": {"x-api-key": "secret"},
                "Json": {"Name": "thing-1"}
            }),
        )
        .await
        .expect("should succeed");
        assert_eq!(response["Body"]["Id"], "t-1");
    }

    #[tokio::test]
    async fn test_non_2xx_is_an_invocation_error() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = execute_http("delete", json!({"Url": format!("{}/x", server.uri())}))
            .await
            .expect_err("should fail");
        assert!(err.message.contains("500"));
    }

    #[tokio::test]
    async fn test_missing_url_is_an_invocation_error() {
        let err = execute_http("get", json!({}))
            .await
            .expect_err("should fail");
        assert!(err.message.contains("Url"));
    }

    #[tokio::test]
    async fn test_non_json_body_is_kept_as_string() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("plain text"))
            .mount(&server)
            .await;

        let response = execute_http("get", json!({"Url": format!("{}/x", server.uri())}))
            .await
            .expect("should succeed");
        assert_eq!(response["Body"], "plain text");
    }
}
