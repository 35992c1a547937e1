//! Inbound lifecycle event model
//!
//! Wire shape of the event the orchestrator sends for each managed resource
//! at each lifecycle stage. The event is immutable for the duration of one
//! invocation and never persisted; identity and replay state live with the
//! caller.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle stage of the managed resource
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Initial provisioning of the external object
    Create,
    /// Re-provisioning with new parameters
    Update,
    /// Teardown of the external object
    Delete,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "Create"),
            Self::Update => write!(f, "Update"),
            Self::Delete => write!(f, "Delete"),
        }
    }
}

/// Handler configuration for one lifecycle stage
///
/// Authored in the declarative document; names the operation to invoke and
/// carries its parameter tree, which may contain coercion markers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HandlerConfig {
    /// Symbolic client name resolved through the operation registry
    #[serde(rename = "Client")]
    pub client: String,

    /// Method name resolved through the operation registry
    #[serde(rename = "Method")]
    pub method: String,

    /// Optional path expression deriving the durable identity from the response
    #[serde(rename = "PhysicalResourceId", default, skip_serializing_if = "Option::is_none")]
    pub identity_expression: Option<String>,

    /// Parameter tree passed to the operation after coercion
    #[serde(rename = "Parameters", default = "empty_object")]
    pub parameters: Value,
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Per-stage handler configurations under `ResourceProperties`
///
/// Any stage may be absent; the dispatcher's selection rules decide what an
/// absent stage means (fallback on Update, no-op otherwise).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ResourceProperties {
    /// Handler for the Create stage
    #[serde(rename = "Create", default, skip_serializing_if = "Option::is_none")]
    pub create: Option<HandlerConfig>,

    /// Handler for the Update stage
    #[serde(rename = "Update", default, skip_serializing_if = "Option::is_none")]
    pub update: Option<HandlerConfig>,

    /// Handler for the Delete stage
    #[serde(rename = "Delete", default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<HandlerConfig>,
}

impl ResourceProperties {
    /// Look up the handler configured for exactly this stage, no fallback
    #[must_use]
    pub const fn stage_config(&self, stage: Stage) -> Option<&HandlerConfig> {
        match stage {
            Stage::Create => self.create.as_ref(),
            Stage::Update => self.update.as_ref(),
            Stage::Delete => self.delete.as_ref(),
        }
    }
}

/// One lifecycle event, as received from the orchestrator
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LifecycleEvent {
    /// Which lifecycle stage this invocation serves
    #[serde(rename = "RequestType")]
    pub stage: Stage,

    /// Endpoint identifier of this handler, echoed by the orchestrator
    #[serde(rename = "ServiceToken", default, skip_serializing_if = "Option::is_none")]
    pub service_token: Option<String>,

    /// Callback address the signal outcome must be delivered to
    #[serde(rename = "ResponseURL")]
    pub response_url: String,

    /// Identifier of the stack operation this event belongs to
    #[serde(rename = "StackId")]
    pub stack_id: String,

    /// Unique id for this request; also the fallback identity
    #[serde(rename = "RequestId")]
    pub request_id: String,

    /// Logical name of the resource in the declarative document
    #[serde(rename = "LogicalResourceId")]
    pub logical_resource_id: String,

    /// Declared resource kind
    #[serde(rename = "ResourceType")]
    pub resource_type: String,

    /// Prior identity, present on Update and Delete
    #[serde(rename = "PhysicalResourceId", default, skip_serializing_if = "Option::is_none")]
    pub physical_resource_id: Option<String>,

    /// Per-stage handler configurations
    #[serde(rename = "ResourceProperties", default)]
    pub resource_properties: ResourceProperties,
}

impl LifecycleEvent {
    /// The identity to report when nothing better is known
    ///
    /// Prior identity when the orchestrator supplied one, otherwise the
    /// request id (every resource always has *some* identity).
    #[must_use]
    pub fn known_identity(&self) -> &str {
        self.physical_resource_id
            .as_deref()
            .unwrap_or(&self.request_id)
    }
}
