//! Stackhook service binary
//!
//! Wires the operation registry, the lifecycle dispatcher and the rewrite
//! configuration, then serves the hook and transform routes.

use anyhow::Context;
use stackhook_lifecycle::operations::register_http_client;
use stackhook_lifecycle::{Dispatcher, HttpSignaler, OperationRegistry};
use stackhook_service::{AppState, ServiceConfig, router};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServiceConfig::from_env().context("loading service configuration")?;

    let mut registry = OperationRegistry::new();
    register_http_client(&mut registry);
    info!(operations = registry.count(), "operation registry initialized");

    let dispatcher = Dispatcher::new(
        Arc::new(registry),
        HttpSignaler::new(),
        config.invocation_budget,
    );
    let state = AppState::new(Arc::new(dispatcher), Arc::new(config.rewrite.clone()));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "stackhook service listening");

    axum::serve(listener, router(state))
        .await
        .context("serving")?;

    Ok(())
}
