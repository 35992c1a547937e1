//! Lifecycle state machine
//!
//! One invocation handles one stage for one resource. The dispatcher selects
//! the handler configuration for the event's stage, resolves parameters
//! through the coercion resolver, invokes the operation through the registry,
//! derives the identity, and hands exactly one outcome to the signal channel.
//!
//! Selection rules:
//!
//! 1. `Create` uses the Create configuration; absent → no-op success.
//! 2. `Update` uses the Update configuration, falling back to the Create
//!    configuration re-invoked with the event's new parameters, so a single
//!    idempotent put-style configuration serves both provisioning and
//!    convergent re-provisioning. With neither present the no-op reports the
//!    request id, a fresh identity, which makes the orchestrator schedule a
//!    Delete of the old object under its old parameters.
//! 3. `Delete` uses the Delete configuration; absent → no-op success. A
//!    Delete that does run a handler keeps the prior identity; no extraction
//!    happens on Delete.
//!
//! Every [`HookError`] raised along the way funnels into a FAILED outcome
//! with the error's display string as the reason; nothing is retried.

use crate::registry::OperationRegistry;
use serde_json::{Map, Value};
use stackhook_core::{
    HandlerConfig, HookError, LifecycleEvent, SignalChannel, SignalDeliveryError, SignalOutcome,
    SignalStatus, Stage, coerce, extract_identity,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Budget reserved for identity extraction and signal delivery
///
/// A near-expired invocation prefers delivering a FAILED signal over
/// delivering none; past this threshold the stage aborts instead of starting
/// the extraction and signaling steps.
const SIGNAL_HEADROOM: Duration = Duration::from_secs(2);

/// The lifecycle dispatcher
///
/// Holds the read-only operation registry, the signal channel and the
/// wall-clock budget one invocation may spend. Stateless across invocations.
pub struct Dispatcher<S: SignalChannel> {
    registry: Arc<OperationRegistry>,
    signaler: S,
    budget: Duration,
}

impl<S: SignalChannel> Dispatcher<S> {
    /// Create a dispatcher over a registry and signal channel
    #[must_use]
    pub const fn new(registry: Arc<OperationRegistry>, signaler: S, budget: Duration) -> Self {
        Self {
            registry,
            signaler,
            budget,
        }
    }

    /// Handle one lifecycle event end to end
    ///
    /// Produces exactly one [`SignalOutcome`] (success or failure) and
    /// makes exactly one delivery attempt against the event's callback
    /// address. Returns the signaled status.
    ///
    /// # Errors
    ///
    /// Returns [`SignalDeliveryError`] only when the single delivery attempt
    /// itself fails; the orchestrator's own timeout governs recovery then.
    pub async fn dispatch(
        &self,
        event: &LifecycleEvent,
    ) -> Result<SignalStatus, SignalDeliveryError> {
        let deadline = Instant::now() + self.budget;

        let outcome = match self.run_stage(event, deadline).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(
                    stage = %event.stage,
                    resource = %event.logical_resource_id,
                    error = %err,
                    "stage aborted"
                );
                SignalOutcome::failure(event, event.known_identity().to_string(), err.to_string())
            }
        };

        info!(
            stage = %event.stage,
            resource = %event.logical_resource_id,
            status = ?outcome.status,
            identity = %outcome.physical_resource_id,
            "signaling outcome"
        );
        self.signaler
            .deliver(&event.response_url, &outcome)
            .await
            .map_err(|err| {
                error!(request_id = %event.request_id, error = %err, "signal delivery failed");
                err
            })?;

        Ok(outcome.status)
    }

    async fn run_stage(
        &self,
        event: &LifecycleEvent,
        deadline: Instant,
    ) -> Result<SignalOutcome, HookError> {
        let Some(config) = select_config(event) else {
            return Ok(no_op_outcome(event));
        };

        let params = coerce(config.parameters.clone())?;
        let operation = self.registry.resolve(&config.client, &config.method)?;

        info!(
            client = %config.client,
            method = %config.method,
            stage = %event.stage,
            "invoking operation"
        );
        let response = operation(params).await?;

        if deadline.saturating_duration_since(Instant::now()) < SIGNAL_HEADROOM {
            warn!(request_id = %event.request_id, "invocation budget exhausted");
            return Ok(SignalOutcome::failure(
                event,
                event.known_identity().to_string(),
                "invocation budget exhausted before identity extraction".to_string(),
            ));
        }

        let identity = match event.stage {
            Stage::Create | Stage::Update => extract_identity(
                config.identity_expression.as_deref(),
                &event.request_id,
                &response,
            )?,
            Stage::Delete => event.known_identity().to_string(),
        };

        if event.stage == Stage::Update {
            if let Some(prior) = event.physical_resource_id.as_deref() {
                if prior != identity {
                    info!(
                        prior,
                        new = %identity,
                        "identity changed; the orchestrator will delete the old object"
                    );
                }
            }
        }

        let mut data = response_data(response);
        if config.identity_expression.is_some() {
            data.insert("Ref".to_string(), Value::String(identity.clone()));
        }

        Ok(SignalOutcome::success(event, identity, data))
    }
}

/// Apply the stage selection rules, including the Update→Create fallback
fn select_config(event: &LifecycleEvent) -> Option<&HandlerConfig> {
    let props = &event.resource_properties;
    match event.stage {
        Stage::Create => props.create.as_ref(),
        Stage::Update => props.update.as_ref().or(props.create.as_ref()),
        Stage::Delete => props.delete.as_ref(),
    }
}

/// Success outcome for a stage with no handler configured
///
/// The request id stands in as the identity. On Update the fresh identity
/// differs from the prior one, which makes the orchestrator schedule a
/// Delete of the old object.
fn no_op_outcome(event: &LifecycleEvent) -> SignalOutcome {
    info!(
        stage = %event.stage,
        resource = %event.logical_resource_id,
        "no handler configured; reporting no-op success"
    );
    SignalOutcome::success(event, event.request_id.clone(), Map::new())
}

/// Expose the raw response tree as the outcome's data map
///
/// Non-object responses are wrapped under a `Result` key so scalar and array
/// responses stay addressable downstream.
fn response_data(response: Value) -> Map<String, Value> {
    match response {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("Result".to_string(), other);
            map
        }
    }
}
