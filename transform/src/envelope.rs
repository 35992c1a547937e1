//! Transform request/response envelope
//!
//! Wire shape of one macro invocation: the orchestrator sends the template
//! fragment with its invocation metadata and always receives the same shape
//! back: rewritten on success, untouched with an error message on failure.
//! Transform failures are data, not transport errors.

use crate::config::RewriteConfig;
use crate::rewrite::rewrite_fragment;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

/// Inbound transform request
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransformRequest {
    /// Account the invocation originates from
    #[serde(rename = "accountId", default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    /// The template fragment to rewrite; must contain a `Resources` map
    pub fragment: Value,

    /// Identifier of the macro being invoked
    #[serde(rename = "transformId", default, skip_serializing_if = "Option::is_none")]
    pub transform_id: Option<String>,

    /// Unique id for this invocation, echoed in the response
    #[serde(rename = "requestId")]
    pub request_id: String,

    /// Region the invocation originates from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Parameters passed to the macro itself
    #[serde(default)]
    pub params: Value,

    /// Parameter values of the template under transformation
    #[serde(rename = "templateParameterValues", default)]
    pub template_parameter_values: Value,
}

/// Overall outcome of one transform invocation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformStatus {
    /// The fragment was rewritten
    Success,
    /// The fragment could not be rewritten and is returned unchanged
    Failure,
}

/// Outbound transform response
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransformResponse {
    /// Echo of the request id
    #[serde(rename = "requestId")]
    pub request_id: String,

    /// Overall outcome
    pub status: TransformStatus,

    /// The fragment: rewritten on success, original on failure
    pub fragment: Value,

    /// Failure detail, present when the status is `failure`
    #[serde(rename = "errorMessage", default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Run one transform invocation
///
/// Rewrites `fragment.Resources` per the configuration. A fragment without a
/// `Resources` map, or one containing a prefixed type with no service-token
/// entry, yields a failure response carrying the original fragment.
#[must_use]
pub fn transform(config: &RewriteConfig, request: TransformRequest) -> TransformResponse {
    let TransformRequest {
        request_id,
        mut fragment,
        ..
    } = request;

    match rewrite_in_fragment(config, &mut fragment) {
        Ok(rewritten) => {
            info!(request_id, rewritten, "fragment transformed");
            TransformResponse {
                request_id,
                status: TransformStatus::Success,
                fragment,
                error_message: None,
            }
        }
        // The rewriter mutates nothing on failure, so the fragment is still
        // the caller's original.
        Err(message) => {
            warn!(request_id, error = %message, "fragment transform failed");
            TransformResponse {
                request_id,
                status: TransformStatus::Failure,
                fragment,
                error_message: Some(message),
            }
        }
    }
}

fn rewrite_in_fragment(config: &RewriteConfig, fragment: &mut Value) -> Result<usize, String> {
    let resources = fragment
        .get_mut("Resources")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| "fragment has no Resources map".to_string())?;
    rewrite_fragment(config, resources).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::GENERIC_RESOURCE_TYPE;
    use serde_json::json;
    use std::collections::HashMap;

    fn config() -> RewriteConfig {
        RewriteConfig::new(
            "CustomResources::",
            HashMap::from([(
                "Boto::Hook".to_string(),
                "arn:aws:lambda:eu-west-1:123456789012:function:botohook".to_string(),
            )]),
        )
    }

    fn request(fragment: Value) -> TransformRequest {
        serde_json::from_value(json!({
            "accountId": "123456789012",
            "fragment": fragment,
            "transformId": "123456789012::StackhookMacro",
            "requestId": "tr-1",
            "region": "eu-west-1",
            "params": {},
            "templateParameterValues": {}
        }))
        .expect("valid request")
    }

    #[test]
    fn test_successful_transform_rewrites_resources() {
        let response = transform(
            &config(),
            request(json!({
                "AWSTemplateFormatVersion": "2010-09-09",
                "Resources": {
                    "Hook": {"Type": "CustomResources::Boto::Hook", "Properties": {}}
                }
            })),
        );

        assert_eq!(response.status, TransformStatus::Success);
        assert_eq!(response.request_id, "tr-1");
        assert!(response.error_message.is_none());
        // Sibling fragment keys survive the rewrite
        assert_eq!(response.fragment["AWSTemplateFormatVersion"], "2010-09-09");
        assert_eq!(response.fragment["Resources"]["Hook"]["Type"], GENERIC_RESOURCE_TYPE);
    }

    #[test]
    fn test_unknown_type_returns_failure_with_original_fragment() {
        let fragment = json!({
            "Resources": {
                "Bad": {"Type": "CustomResources::Unknown::Thing", "Properties": {}}
            }
        });
        let response = transform(&config(), request(fragment.clone()));

        assert_eq!(response.status, TransformStatus::Failure);
        assert_eq!(response.fragment, fragment);
        assert!(
            response
                .error_message
                .expect("error set")
                .contains("CustomResources::Unknown::Thing")
        );
    }

    #[test]
    fn test_fragment_without_resources_is_a_failure() {
        let fragment = json!({"Outputs": {}});
        let response = transform(&config(), request(fragment.clone()));

        assert_eq!(response.status, TransformStatus::Failure);
        assert_eq!(response.fragment, fragment);
        assert!(response.error_message.expect("error set").contains("Resources"));
    }

    #[test]
    fn test_response_wire_shape() {
        let response = transform(&config(), request(json!({"Resources": {}})));
        let wire = serde_json::to_value(&response).expect("serializes");
        assert_eq!(wire["requestId"], "tr-1");
        assert_eq!(wire["status"], "success");
        assert!(wire.get("errorMessage").is_none());
    }
}
