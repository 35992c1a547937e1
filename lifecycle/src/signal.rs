//! HTTP delivery of signal outcomes
//!
//! The outcome is delivered with a single `PUT` of the JSON body to the
//! event's callback address. Delivery is attempted once: a transport failure
//! or a rejecting endpoint becomes a [`SignalDeliveryError`] and the
//! invocation ends. Silent success is never synthesized, and the
//! orchestrator's own timeout governs recovery from a dropped signal.

use reqwest::Client;
use stackhook_core::{SignalChannel, SignalDeliveryError, SignalOutcome};
use tracing::{debug, info};

/// Production signal channel delivering outcomes over HTTP
#[derive(Clone, Default)]
pub struct HttpSignaler {
    client: Client,
}

impl HttpSignaler {
    /// Create a signaler with its own HTTP client
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl SignalChannel for HttpSignaler {
    async fn deliver(
        &self,
        url: &str,
        outcome: &SignalOutcome,
    ) -> Result<(), SignalDeliveryError> {
        debug!(request_id = %outcome.request_id, "delivering signal outcome");

        let response = self
            .client
            .put(url)
            .json(outcome)
            .send()
            .await
            .map_err(|e| SignalDeliveryError {
                message: format!("transport failure: {e}"),
            })?;

        let status = response.status();
        if status.is_success() {
            info!(
                request_id = %outcome.request_id,
                status = ?outcome.status,
                "signal outcome delivered"
            );
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(SignalDeliveryError {
                message: format!("callback endpoint returned {status}: {body}"),
            })
        }
    }
}
