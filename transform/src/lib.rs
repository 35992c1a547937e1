//! # Stackhook Transform
//!
//! The template rewriting macro of the stackhook toolkit: scans a document
//! fragment's `Resources` map and replaces every resource whose declared
//! type starts with a configured prefix by the generic custom-resource type,
//! bound to the service endpoint the suffix maps to.
//!
//! ## Modules
//!
//! - `config`: the rewrite configuration (prefix + service-token map), read
//!   once at process start
//! - `rewrite`: the single-pass, fail-fast fragment rewriter
//! - `envelope`: the transform request/response wire shape and the top-level
//!   [`transform`] entry point
//!
//! The rewriter never returns partial output: an unmapped prefixed type
//! aborts the whole invocation, and the envelope reports the original
//! fragment with a failure status instead.

pub mod config;
pub mod envelope;
pub mod rewrite;

pub use config::{ConfigError, RewriteConfig};
pub use envelope::{TransformRequest, TransformResponse, transform};
pub use rewrite::{GENERIC_RESOURCE_TYPE, RewriteError, rewrite_fragment};
