//! # Stackhook Testing
//!
//! Test doubles shared across the workspace:
//!
//! - Canned, failing and recording operations for exercising the dispatcher
//!   without a real external API
//! - [`mocks::CaptureSignaler`]: a delivery-counting signal channel double
//!   for asserting the exactly-once signaling contract
//!
//! ## Example
//!
//! ```ignore
//! use stackhook_testing::mocks::{canned_operation, CaptureSignaler};
//!
//! let mut registry = OperationRegistry::new();
//! registry.register("organizations", "create_account",
//!     canned_operation(json!({"Account": {"Id": "acct-1"}})));
//!
//! let signaler = CaptureSignaler::new();
//! let dispatcher = Dispatcher::new(Arc::new(registry), signaler.clone(), budget);
//! dispatcher.dispatch(&event).await?;
//! assert_eq!(signaler.delivery_count(), 1);
//! ```

/// Mock operations and signal channels for testing.
pub mod mocks {
    use serde_json::Value;
    use stackhook_core::{
        InvocationError, OperationFn, OperationFuture, SignalChannel, SignalDeliveryError,
        SignalOutcome,
    };
    use std::sync::{Arc, Mutex};

    /// An operation that always succeeds with a canned response tree
    #[must_use]
    pub fn canned_operation(response: Value) -> OperationFn {
        Arc::new(move |_params: Value| {
            let response = response.clone();
            Box::pin(async move { Ok(response) }) as OperationFuture
        })
    }

    /// An operation that always fails with the given message
    #[must_use]
    pub fn failing_operation(message: &str) -> OperationFn {
        let message = message.to_string();
        Arc::new(move |_params: Value| {
            let message = message.clone();
            Box::pin(async move { Err(InvocationError { message }) }) as OperationFuture
        })
    }

    /// An operation that records the parameters it was invoked with
    ///
    /// Returns the operation and a shared log of invocation parameter trees.
    #[must_use]
    pub fn recording_operation(response: Value) -> (OperationFn, Arc<Mutex<Vec<Value>>>) {
        let log: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));
        let shared = Arc::clone(&log);
        let operation: OperationFn = Arc::new(move |params: Value| {
            let response = response.clone();
            let shared = Arc::clone(&shared);
            Box::pin(async move {
                #[allow(clippy::expect_used)]
                shared
                    .lock()
                    .expect("recording lock poisoned - indicates a panic in another thread")
                    .push(params);
                Ok(response)
            }) as OperationFuture
        });
        (operation, log)
    }

    /// Signal channel double that captures deliveries instead of sending them
    ///
    /// Clones share the same capture log, so a clone can be handed to a
    /// dispatcher while the test keeps the original for assertions. With
    /// [`failing`](Self::failing) every delivery attempt is still recorded
    /// but reported as a transport failure.
    #[derive(Clone, Default)]
    pub struct CaptureSignaler {
        deliveries: Arc<Mutex<Vec<(String, SignalOutcome)>>>,
        fail: bool,
    }

    impl CaptureSignaler {
        /// Create a capturing signaler whose deliveries succeed
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a capturing signaler whose deliveries fail
        #[must_use]
        pub fn failing() -> Self {
            Self {
                deliveries: Arc::new(Mutex::new(Vec::new())),
                fail: true,
            }
        }

        /// All captured `(url, outcome)` deliveries, in order
        ///
        /// # Panics
        ///
        /// Panics if the capture lock is poisoned (indicates a panic in
        /// another thread).
        #[must_use]
        #[allow(clippy::expect_used)]
        pub fn deliveries(&self) -> Vec<(String, SignalOutcome)> {
            self.deliveries
                .lock()
                .expect("capture lock poisoned - indicates a panic in another thread")
                .clone()
        }

        /// Number of delivery attempts made against this channel
        ///
        /// # Panics
        ///
        /// Panics if the capture lock is poisoned (indicates a panic in
        /// another thread).
        #[must_use]
        #[allow(clippy::expect_used)]
        pub fn delivery_count(&self) -> usize {
            self.deliveries
                .lock()
                .expect("capture lock poisoned - indicates a panic in another thread")
                .len()
        }
    }

    impl SignalChannel for CaptureSignaler {
        async fn deliver(
            &self,
            url: &str,
            outcome: &SignalOutcome,
        ) -> Result<(), SignalDeliveryError> {
            #[allow(clippy::expect_used)]
            self.deliveries
                .lock()
                .expect("capture lock poisoned - indicates a panic in another thread")
                .push((url.to_string(), outcome.clone()));
            if self.fail {
                Err(SignalDeliveryError {
                    message: "capture signaler configured to fail".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }
}
