//! # Stackhook Core
//!
//! Core data model and traits for the stackhook custom-resource toolkit.
//!
//! This crate defines everything the lifecycle and transform crates share:
//!
//! - **Lifecycle events**: the inbound orchestrator event (`LifecycleEvent`,
//!   `HandlerConfig`, `Stage`) as it appears on the wire
//! - **Coercion**: the recursive resolver that turns `Type::Int` /
//!   `Type::Float` / `Type::Bool` markers into typed scalars
//! - **Identity extraction**: path-expression evaluation against an
//!   operation's response tree
//! - **Operations**: the callable shape stored in the operation registry
//! - **Signals**: the outbound outcome (`SignalOutcome`) and the
//!   `SignalChannel` delivery seam
//! - **Errors**: the closed set of failure kinds the dispatcher converts
//!   into FAILED outcomes
//!
//! ## Design Principles
//!
//! - Trees of unknown shape are `serde_json::Value`; nothing here assumes a
//!   schema beyond the wire envelope itself.
//! - All transforms are pure; no component keeps state between invocations.
//! - Traits sit at the seams that tests replace (`SignalChannel`), everything
//!   else is plain functions and data.

pub mod coerce;
pub mod error;
pub mod event;
pub mod extract;
pub mod operation;
pub mod signal;

pub use coerce::coerce;
pub use error::{HookError, SignalDeliveryError};
pub use event::{HandlerConfig, LifecycleEvent, ResourceProperties, Stage};
pub use extract::extract_identity;
pub use operation::{InvocationError, OperationFn, OperationFuture, OperationResult};
pub use signal::{SignalChannel, SignalOutcome, SignalStatus};
