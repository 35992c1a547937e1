//! # Stackhook Lifecycle
//!
//! The lifecycle half of the stackhook toolkit: given a [`LifecycleEvent`]
//! from the orchestrator, select the handler configuration for the current
//! stage, resolve its parameters, invoke the configured operation, derive
//! the durable identity from the response, and report exactly one outcome
//! back over the event's callback address.
//!
//! ## Modules
//!
//! - `registry`: capability registry mapping `(client, method)` pairs to
//!   statically-registered operations
//! - `dispatcher`: the Create/Update/Delete state machine with its fallback
//!   and failure-funnel rules
//! - `signal`: HTTP delivery of signal outcomes
//! - `operations`: the packaged generic REST operation set
//!
//! Every invocation is stateless and self-contained; the registry is built
//! once at startup and read-only afterwards.

pub mod dispatcher;
pub mod operations;
pub mod registry;
pub mod signal;

pub use dispatcher::Dispatcher;
pub use registry::OperationRegistry;
pub use signal::HttpSignaler;

// Re-export the event/outcome model for callers wiring a dispatcher
pub use stackhook_core::{LifecycleEvent, SignalOutcome, SignalStatus};
