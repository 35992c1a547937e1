//! Process configuration for the service binary
//!
//! Read once at startup. Recognized variables:
//!
//! - `STACKHOOK_BIND_ADDR`: listen address, default `0.0.0.0:8080`
//! - `STACKHOOK_INVOCATION_BUDGET_SECS`: wall-clock budget per lifecycle
//!   invocation, default 30
//! - `RESOURCE_TYPE_PREFIX` / `RESOURCE_TYPE_SERVICE_TOKENS`: the rewrite
//!   configuration (see the transform crate)

use anyhow::Context;
use stackhook_transform::RewriteConfig;
use std::net::SocketAddr;
use std::time::Duration;

const BIND_ADDR_VAR: &str = "STACKHOOK_BIND_ADDR";
const BUDGET_VAR: &str = "STACKHOOK_INVOCATION_BUDGET_SECS";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_BUDGET_SECS: u64 = 30;

/// Service configuration, read-only after startup
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: SocketAddr,
    /// Wall-clock budget for one lifecycle invocation
    pub invocation_budget: Duration,
    /// Rewrite configuration for the transform handler
    pub rewrite: RewriteConfig,
}

impl ServiceConfig {
    /// Read the configuration from the process environment
    ///
    /// # Errors
    ///
    /// Fails when the bind address or budget do not parse, or when the
    /// rewrite configuration is missing or malformed.
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr = std::env::var(BIND_ADDR_VAR)
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .with_context(|| format!("parsing {BIND_ADDR_VAR}"))?;

        let budget_secs = match std::env::var(BUDGET_VAR) {
            Ok(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("parsing {BUDGET_VAR}"))?,
            Err(_) => DEFAULT_BUDGET_SECS,
        };

        let rewrite = RewriteConfig::from_env().context("loading rewrite configuration")?;

        Ok(Self {
            bind_addr,
            invocation_budget: Duration::from_secs(budget_secs),
            rewrite,
        })
    }
}
