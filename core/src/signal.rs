//! Signal outcome model and delivery seam
//!
//! Exactly one [`SignalOutcome`] is produced per lifecycle event and exactly
//! one delivery attempt is made against the event's callback address. The
//! [`SignalChannel`] trait is the seam tests replace with a capturing double;
//! the production implementation lives in the lifecycle crate.

use crate::error::SignalDeliveryError;
use crate::event::LifecycleEvent;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Terminal status of one lifecycle invocation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalStatus {
    /// The stage completed and the reported identity is durable
    Success,
    /// The stage aborted; `Reason` carries the failure detail
    Failed,
}

/// Outcome reported back to the orchestrator over the callback address
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SignalOutcome {
    /// Terminal status of the invocation
    #[serde(rename = "Status")]
    pub status: SignalStatus,

    /// Human-readable failure reason, required when the status is FAILED
    #[serde(rename = "Reason", default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Durable identity of the external object
    #[serde(rename = "PhysicalResourceId")]
    pub physical_resource_id: String,

    /// Stack operation identifier, echoed from the event
    #[serde(rename = "StackId")]
    pub stack_id: String,

    /// Request identifier, echoed from the event
    #[serde(rename = "RequestId")]
    pub request_id: String,

    /// Logical resource name, echoed from the event
    #[serde(rename = "LogicalResourceId")]
    pub logical_resource_id: String,

    /// Raw response tree of the invoked operation, for downstream lookups
    #[serde(rename = "Data", default)]
    pub data: Map<String, Value>,
}

impl SignalOutcome {
    /// Build a SUCCESS outcome for `event` with the derived identity and data
    #[must_use]
    pub fn success(event: &LifecycleEvent, identity: String, data: Map<String, Value>) -> Self {
        Self {
            status: SignalStatus::Success,
            reason: None,
            physical_resource_id: identity,
            stack_id: event.stack_id.clone(),
            request_id: event.request_id.clone(),
            logical_resource_id: event.logical_resource_id.clone(),
            data,
        }
    }

    /// Build a FAILED outcome for `event` carrying a human-readable reason
    #[must_use]
    pub fn failure(event: &LifecycleEvent, identity: String, reason: String) -> Self {
        Self {
            status: SignalStatus::Failed,
            reason: Some(reason),
            physical_resource_id: identity,
            stack_id: event.stack_id.clone(),
            request_id: event.request_id.clone(),
            logical_resource_id: event.logical_resource_id.clone(),
            data: Map::new(),
        }
    }
}

/// Delivery seam for signal outcomes
///
/// Implementations deliver the outcome to the given callback address exactly
/// once; a transport failure is returned, never retried.
pub trait SignalChannel: Send + Sync {
    /// Deliver `outcome` to `url`
    ///
    /// # Errors
    ///
    /// Returns [`SignalDeliveryError`] when the transport fails or the
    /// callback endpoint rejects the delivery.
    fn deliver(
        &self,
        url: &str,
        outcome: &SignalOutcome,
    ) -> impl std::future::Future<Output = Result<(), SignalDeliveryError>> + Send;
}
