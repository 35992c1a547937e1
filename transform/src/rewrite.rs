//! Fragment rewriter
//!
//! Walks the `Resources` map of a template fragment and replaces every
//! declaration whose `Type` starts with the configured prefix: the type
//! becomes the generic custom-resource type and `Properties.ServiceToken`
//! is set from the service-token map entry for the suffix. Declarations
//! whose type does not match pass through untouched.
//!
//! The rewrite is a single pass and order-independent across resources. It
//! is also fail-fast: a prefixed type with no token mapping aborts the whole
//! invocation before anything is mutated, so partial rewrites are never
//! returned.

use crate::config::RewriteConfig;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// The generic type every intercepted resource is rewritten to
pub const GENERIC_RESOURCE_TYPE: &str = "AWS::CloudFormation::CustomResource";

/// Rewriter failures
#[derive(Debug, Error)]
pub enum RewriteError {
    /// A prefixed type has no entry in the service-token map
    #[error("resource '{logical_id}' has type '{resource_type}' with no service-token mapping")]
    UnknownResourceType {
        /// Logical name of the offending resource
        logical_id: String,
        /// Its declared type
        resource_type: String,
    },
}

/// Rewrite every prefixed resource declaration in `resources`, in place
///
/// Returns the number of declarations rewritten.
///
/// # Errors
///
/// Returns [`RewriteError::UnknownResourceType`] when a declaration's type
/// starts with the configured prefix but its suffix has no service-token
/// entry; `resources` is left unmodified then.
pub fn rewrite_fragment(
    config: &RewriteConfig,
    resources: &mut Map<String, Value>,
) -> Result<usize, RewriteError> {
    // Plan first so an unknown suffix aborts before any mutation.
    let mut plan: Vec<(String, String)> = Vec::new();
    for (logical_id, declaration) in resources.iter() {
        let Some(resource_type) = declaration.get("Type").and_then(Value::as_str) else {
            continue;
        };
        let Some(suffix) = resource_type.strip_prefix(&config.type_prefix) else {
            continue;
        };
        let token = config.service_tokens.get(suffix).ok_or_else(|| {
            RewriteError::UnknownResourceType {
                logical_id: logical_id.clone(),
                resource_type: resource_type.to_string(),
            }
        })?;
        plan.push((logical_id.clone(), token.clone()));
    }

    for (logical_id, token) in &plan {
        if let Some(declaration) = resources.get_mut(logical_id).and_then(Value::as_object_mut) {
            debug!(logical_id, "rewriting resource to the generic custom-resource type");
            declaration.insert(
                "Type".to_string(),
                Value::String(GENERIC_RESOURCE_TYPE.to_string()),
            );
            let properties = declaration
                .entry("Properties")
                .or_insert_with(|| Value::Object(Map::new()));
            if let Some(properties) = properties.as_object_mut() {
                properties.insert("ServiceToken".to_string(), Value::String(token.clone()));
            }
        }
    }

    Ok(plan.len())
}

#[cfg(test)]
mod tests {
    use super::*;
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

    fn resources(value: Value) -> Map<String, Value> {
        value.as_object().expect("object").clone()
    }

    #[test]
    fn test_prefixed_resource_is_rewritten() {
        let mut res = resources(json!({
            "Hook": {
                "Type": "CustomResources::Boto::Hook",
                "Properties": {"Create": {"Client": "s3", "Method": "create_bucket"}}
            }
        }));

        let rewritten = rewrite_fragment(&config(), &mut res).expect("should rewrite");
        assert_eq!(rewritten, 1);
        assert_eq!(res["Hook"]["Type"], GENERIC_RESOURCE_TYPE);
        assert_eq!(
            res["Hook"]["Properties"]["ServiceToken"],
            "arn:aws:lambda:eu-west-1:123456789012:function:botohook"
        );
        // All other properties untouched
        assert_eq!(res["Hook"]["Properties"]["Create"]["Client"], "s3");
    }

    #[test]
    fn test_non_matching_resource_passes_through_unchanged() {
        let bucket = json!({
            "Type": "AWS::S3::Bucket",
            "Properties": {"BucketName": "logs"}
        });
        let mut res = resources(json!({"Bucket": bucket.clone()}));

        let rewritten = rewrite_fragment(&config(), &mut res).expect("should pass");
        assert_eq!(rewritten, 0);
        assert_eq!(res["Bucket"], bucket);
    }

    #[test]
    fn test_unknown_suffix_fails_without_partial_rewrite() {
        let mut res = resources(json!({
            "Known": {"Type": "CustomResources::Boto::Hook", "Properties": {}},
            "Unknown": {"Type": "CustomResources::Unknown::Thing", "Properties": {}}
        }));
        let before = res.clone();

        let err = rewrite_fragment(&config(), &mut res).expect_err("should fail");
        match err {
            RewriteError::UnknownResourceType {
                logical_id,
                resource_type,
            } => {
                assert_eq!(logical_id, "Unknown");
                assert_eq!(resource_type, "CustomResources::Unknown::Thing");
            }
        }
        // Fail-fast: nothing was mutated, not even the known resource
        assert_eq!(res, before);
    }

    #[test]
    fn test_missing_properties_object_is_created() {
        let mut res = resources(json!({
            "Hook": {"Type": "CustomResources::Boto::Hook"}
        }));

        rewrite_fragment(&config(), &mut res).expect("should rewrite");
        assert_eq!(
            res["Hook"]["Properties"]["ServiceToken"],
            "arn:aws:lambda:eu-west-1:123456789012:function:botohook"
        );
    }

    #[test]
    fn test_declaration_without_type_passes_through() {
        let mut res = resources(json!({
            "Odd": {"Properties": {"A": 1}}
        }));
        let before = res.clone();

        let rewritten = rewrite_fragment(&config(), &mut res).expect("should pass");
        assert_eq!(rewritten, 0);
        assert_eq!(res, before);
    }

    #[test]
    fn test_existing_service_token_is_overwritten() {
        let mut res = resources(json!({
            "Hook": {
                "Type": "CustomResources::Boto::Hook",
                "Properties": {"ServiceToken": "stale"}
            }
        }));

        rewrite_fragment(&config(), &mut res).expect("should rewrite");
        assert_eq!(
            res["Hook"]["Properties"]["ServiceToken"],
            "arn:aws:lambda:eu-west-1:123456789012:function:botohook"
        );
    }
}
